//! Error types for the toolkit.

/// Errors surfaced by the backend event loop.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("poll failed: {0}")]
    Poll(#[from] std::io::Error),
}
