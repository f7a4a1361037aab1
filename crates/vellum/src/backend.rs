//! The single-threaded event loop: timers, idle callbacks, fd wakeups.
//!
//! Everything here runs on the thread that created the backend. The only
//! cross-thread surface is the `Arc<Timer>` handle, whose refcount and
//! state are thread-safe on their own.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::os::fd::RawFd;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::BackendError;
use crate::output::{Output, SystemIcons};
use crate::palette::Palette;
use crate::timer::Timer;
use crate::window::Window;

struct TimerEntry {
    timer: Arc<Timer>,
    callback: Box<dyn FnMut(Arc<Timer>)>,
}

struct FdEntry {
    fd: RawFd,
    callback: Rc<dyn Fn()>,
}

pub struct Backend {
    palette: Rc<Palette>,
    icons: SystemIcons,
    outputs: Vec<Rc<Output>>,
    timers: RefCell<Vec<TimerEntry>>,
    idles: RefCell<VecDeque<Box<dyn FnOnce()>>>,
    fds: RefCell<Vec<FdEntry>>,
    windows: RefCell<Vec<Rc<Window>>>,
    running: Cell<bool>,
}

impl Backend {
    pub fn create() -> Rc<Backend> {
        let palette = Palette::current();
        let icons = SystemIcons::new(palette.vars.icon_theme.clone());
        Rc::new(Backend {
            palette,
            icons,
            outputs: vec![Rc::new(Output::headless())],
            timers: RefCell::new(Vec::new()),
            idles: RefCell::new(VecDeque::new()),
            fds: RefCell::new(Vec::new()),
            windows: RefCell::new(Vec::new()),
            running: Cell::new(false),
        })
    }

    pub fn palette(&self) -> Rc<Palette> {
        Rc::clone(&self.palette)
    }

    pub fn system_icons(&self) -> &SystemIcons {
        &self.icons
    }

    pub fn outputs(&self) -> Vec<Rc<Output>> {
        self.outputs.clone()
    }

    pub fn windows(&self) -> Vec<Rc<Window>> {
        self.windows.borrow().clone()
    }

    pub(crate) fn register_window(&self, window: Rc<Window>) {
        self.windows.borrow_mut().push(window);
    }

    /// Arm a one-shot timer. The callback may re-arm the timer via
    /// `update_timeout` to keep it alive; otherwise its entry is dropped
    /// after firing.
    pub fn add_timer(
        &self,
        timeout: Duration,
        callback: impl FnMut(Arc<Timer>) + 'static,
    ) -> Arc<Timer> {
        let timer = Arc::new(Timer::new(timeout));
        self.timers.borrow_mut().push(TimerEntry {
            timer: Arc::clone(&timer),
            callback: Box::new(callback),
        });
        timer
    }

    /// Run a callback on the next loop turn.
    pub fn add_idle(&self, callback: impl FnOnce() + 'static) {
        self.idles.borrow_mut().push_back(Box::new(callback));
    }

    /// Invoke a callback whenever `fd` becomes readable.
    pub fn add_fd(&self, fd: RawFd, callback: impl Fn() + 'static) {
        self.fds.borrow_mut().push(FdEntry { fd, callback: Rc::new(callback) });
    }

    pub fn remove_fd(&self, fd: RawFd) {
        self.fds.borrow_mut().retain(|e| e.fd != fd);
    }

    /// Stop the loop after the current turn.
    pub fn destroy(&self) {
        self.running.set(false);
    }

    /// Run until destroyed or out of work. Work is pending timers, idle
    /// callbacks, or registered fds; an open window alone cannot receive
    /// events headlessly and does not keep the loop alive.
    pub fn enter_loop(&self) {
        self.running.set(true);
        while self.running.get() {
            self.drain_idles();
            self.fire_due_timers();
            if !self.running.get() {
                break;
            }
            if !self.idles.borrow().is_empty() {
                continue;
            }
            let timeout = self.next_timeout();
            let has_fds = !self.fds.borrow().is_empty();
            match (timeout, has_fds) {
                (None, false) => break,
                (Some(wait), false) => std::thread::sleep(wait),
                (_, true) => {
                    if let Err(err) = self.poll_fds(timeout) {
                        tracing::error!("backend poll failed: {err}");
                        break;
                    }
                }
            }
        }
        self.running.set(false);
    }

    fn drain_idles(&self) {
        loop {
            let next = self.idles.borrow_mut().pop_front();
            match next {
                Some(callback) => callback(),
                None => break,
            }
        }
    }

    fn fire_due_timers(&self) {
        let now = Instant::now();
        let mut due = Vec::new();
        {
            let mut timers = self.timers.borrow_mut();
            let mut i = 0;
            while i < timers.len() {
                if timers[i].timer.cancelled() {
                    timers.remove(i);
                } else if timers[i].timer.due(now) {
                    due.push(timers.remove(i));
                } else {
                    i += 1;
                }
            }
        }
        for mut entry in due {
            entry.timer.mark_fired();
            (entry.callback)(Arc::clone(&entry.timer));
            // the callback may have re-armed the timer
            if !entry.timer.cancelled() && !entry.timer.passed() {
                self.timers.borrow_mut().push(entry);
            }
        }
    }

    fn next_timeout(&self) -> Option<Duration> {
        let timers = self.timers.borrow();
        let nearest = timers
            .iter()
            .filter(|e| !e.timer.cancelled())
            .map(|e| e.timer.deadline())
            .min()?;
        Some(nearest.saturating_duration_since(Instant::now()))
    }

    fn poll_fds(&self, timeout: Option<Duration>) -> Result<(), BackendError> {
        let mut pollfds: Vec<libc::pollfd> = self
            .fds
            .borrow()
            .iter()
            .map(|e| libc::pollfd { fd: e.fd, events: libc::POLLIN, revents: 0 })
            .collect();
        let timeout_ms = match timeout {
            Some(t) => t.as_millis().min(i32::MAX as u128) as i32,
            None => -1,
        };
        let rc = unsafe {
            libc::poll(pollfds.as_mut_ptr(), pollfds.len() as libc::nfds_t, timeout_ms)
        };
        if rc < 0 {
            let err = std::io::Error::last_os_error();
            if err.kind() == std::io::ErrorKind::Interrupted {
                return Ok(());
            }
            return Err(BackendError::Poll(err));
        }
        if rc == 0 {
            return Ok(());
        }
        let ready: Vec<Rc<dyn Fn()>> = {
            let fds = self.fds.borrow();
            pollfds
                .iter()
                .filter(|p| (p.revents & (libc::POLLIN | libc::POLLHUP)) != 0)
                .filter_map(|p| {
                    fds.iter().find(|e| e.fd == p.fd).map(|e| Rc::clone(&e.callback))
                })
                .collect()
        };
        for callback in ready {
            callback();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn idles_run_in_order_then_loop_exits() {
        let backend = Backend::create();
        let log = Rc::new(RefCell::new(Vec::new()));
        for i in 0..3 {
            let log = Rc::clone(&log);
            backend.add_idle(move || log.borrow_mut().push(i));
        }
        backend.enter_loop();
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn timer_fires_once_and_loop_drains() {
        let backend = Backend::create();
        let fired = Rc::new(Cell::new(0));
        let fired2 = Rc::clone(&fired);
        let timer = backend.add_timer(Duration::from_millis(5), move |t| {
            fired2.set(fired2.get() + 1);
            assert!(t.passed());
        });
        backend.enter_loop();
        assert_eq!(fired.get(), 1);
        assert!(timer.passed());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let backend = Backend::create();
        let fired = Rc::new(Cell::new(false));
        let fired2 = Rc::clone(&fired);
        let timer = backend.add_timer(Duration::from_millis(1), move |_| {
            fired2.set(true);
        });
        timer.cancel();
        backend.enter_loop();
        assert!(!fired.get());
    }

    #[test]
    fn rearmed_timer_fires_again() {
        let backend = Backend::create();
        let count = Rc::new(Cell::new(0));
        let count2 = Rc::clone(&count);
        backend.add_timer(Duration::from_millis(1), move |t| {
            count2.set(count2.get() + 1);
            if count2.get() < 3 {
                t.update_timeout(Duration::from_millis(1));
            }
        });
        backend.enter_loop();
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn idle_added_from_callback_still_runs() {
        let backend = Backend::create();
        let ran = Rc::new(Cell::new(false));
        let ran2 = Rc::clone(&ran);
        let backend2 = Rc::clone(&backend);
        backend.add_idle(move || {
            let ran3 = Rc::clone(&ran2);
            backend2.add_idle(move || ran3.set(true));
        });
        backend.enter_loop();
        assert!(ran.get());
    }

    #[test]
    fn fd_callback_fires_on_readable() {
        let backend = Backend::create();
        let mut pipe_fds = [0 as RawFd; 2];
        let rc = unsafe { libc::pipe(pipe_fds.as_mut_ptr()) };
        assert_eq!(rc, 0);
        let [read_fd, write_fd] = pipe_fds;

        let got = Rc::new(Cell::new(false));
        let got2 = Rc::clone(&got);
        let backend2 = Rc::clone(&backend);
        backend.add_fd(read_fd, move || {
            got2.set(true);
            backend2.destroy();
        });
        unsafe {
            libc::write(write_fd, b"x".as_ptr().cast(), 1);
        }
        backend.enter_loop();
        assert!(got.get());
        backend.remove_fd(read_fd);
        unsafe {
            libc::close(read_fd);
            libc::close(write_fd);
        }
    }

    #[test]
    fn destroy_stops_a_pending_loop() {
        let backend = Backend::create();
        let backend2 = Rc::clone(&backend);
        // long timer would otherwise keep the loop alive
        backend.add_timer(Duration::from_secs(3600), |_| {});
        backend.add_idle(move || backend2.destroy());
        let start = Instant::now();
        backend.enter_loop();
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
