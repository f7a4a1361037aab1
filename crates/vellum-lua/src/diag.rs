//! Diagnostics sink for script-side failures caught at the boundary.
//!
//! One record per failing call-in, tagged with the subsystem that owned the
//! callback. The default sink forwards to `tracing`; hosts (and tests) can
//! swap in their own.

use std::sync::{Arc, LazyLock, Mutex, RwLock};

/// Write-only sink contract: `(subsystem tag, message)`.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, subsystem: &str, message: &str);
}

struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, subsystem: &str, message: &str) {
        tracing::error!(target: "vellum_lua", "{subsystem}: {message}");
    }
}

static SINK: LazyLock<RwLock<Arc<dyn DiagnosticSink>>> =
    LazyLock::new(|| RwLock::new(Arc::new(TracingSink)));

static SWAP_GUARD: Mutex<()> = Mutex::new(());

/// Emit one diagnostic record through the current sink.
pub fn report(subsystem: &str, message: &str) {
    let sink = {
        let slot = SINK.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&*slot)
    };
    sink.report(subsystem, message);
}

/// Replace the process-wide sink.
pub fn set_sink(sink: Arc<dyn DiagnosticSink>) {
    let mut slot = SINK.write().unwrap_or_else(|e| e.into_inner());
    *slot = sink;
}

/// Run `f` with `sink` installed, restoring the previous sink afterwards.
/// Calls are serialized, so concurrent tests cannot observe each other's
/// records.
pub fn with_sink<R>(sink: Arc<dyn DiagnosticSink>, f: impl FnOnce() -> R) -> R {
    let _serial = SWAP_GUARD.lock().unwrap_or_else(|e| e.into_inner());
    let previous = {
        let mut slot = SINK.write().unwrap_or_else(|e| e.into_inner());
        std::mem::replace(&mut *slot, sink)
    };

    struct Restore(Option<Arc<dyn DiagnosticSink>>);
    impl Drop for Restore {
        fn drop(&mut self) {
            if let Some(previous) = self.0.take() {
                let mut slot = SINK.write().unwrap_or_else(|e| e.into_inner());
                *slot = previous;
            }
        }
    }
    let _restore = Restore(Some(previous));

    f()
}

/// A sink that records everything it sees; for hosts that capture
/// diagnostics and for tests.
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<Vec<(String, String)>>,
}

impl MemorySink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn records(&self) -> Vec<(String, String)> {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn count_for(&self, subsystem: &str) -> usize {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|(tag, _)| tag == subsystem)
            .count()
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, subsystem: &str, message: &str) {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((subsystem.to_string(), message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_sink_captures_and_restores() {
        let sink = MemorySink::new();
        with_sink(sink.clone(), || {
            report("Test subsystem", "boom");
        });
        assert_eq!(sink.records(), vec![("Test subsystem".into(), "boom".into())]);
        // outside the scope, records no longer land in the memory sink
        report("Test subsystem", "after");
        assert_eq!(sink.records().len(), 1);
    }
}
