use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Stop flags shared between the shell and one batch run.
///
/// `cancel` is cooperative: the worker checks it between files and, when
/// interrupting is enabled, while waiting on the encoder. `kill` always ends
/// the encoder in flight; it is used when the application exits.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    killed: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Cancel and also terminate any running encoder
    pub fn kill(&self) {
        self.killed.store(true, Ordering::Release);
        self.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    pub fn is_killed(&self) -> bool {
        self.killed.load(Ordering::Acquire)
    }

    /// Whether an encoder in flight should be terminated now
    pub fn should_interrupt(&self, interrupt_on_stop: bool) -> bool {
        self.is_killed() || (interrupt_on_stop && self.is_cancelled())
    }
}
