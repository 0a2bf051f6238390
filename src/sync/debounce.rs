//! Cancellable scheduled-task abstraction.
//!
//! Each `schedule` replaces the previously scheduled task, so a burst of
//! calls inside one window results in exactly one execution, at
//! last-call-time + window.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

struct Pending {
    handle: JoinHandle<()>,
    /// Set by the task itself once its window elapsed and its body began.
    started: Arc<AtomicBool>,
}

/// Runs a task after a fixed quiet window, resetting the window on every
/// new `schedule`.
pub struct Debouncer {
    window: Duration,
    pending: Mutex<Option<Pending>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: Mutex::new(None),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedules `task` to run once the window elapses without another
    /// call. Any previously pending task is aborted, including one whose
    /// timer already fired and whose body is still running; a body aborted
    /// mid-execution is simply abandoned, so tasks that must not be left
    /// half-done have to serialize and re-do their work themselves.
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let window = self.window;
        let started = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&started);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            flag.store(true, Ordering::SeqCst);
            task.await;
        });
        let mut pending = self.lock_pending();
        if let Some(previous) = pending.replace(Pending { handle, started }) {
            previous.handle.abort();
        }
    }

    /// Aborts the pending task, if any.
    pub fn cancel(&self) {
        if let Some(pending) = self.lock_pending().take() {
            pending.handle.abort();
        }
    }

    /// True while a scheduled task is still waiting out its window. A task
    /// whose body is already executing no longer counts as pending, so the
    /// body itself can ask whether a newer schedule superseded it.
    pub fn is_pending(&self) -> bool {
        self.lock_pending().as_ref().is_some_and(|pending| {
            !pending.started.load(Ordering::SeqCst) && !pending.handle.is_finished()
        })
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Option<Pending>> {
        // A panicked scheduling task cannot leave the slot inconsistent.
        self.pending
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
