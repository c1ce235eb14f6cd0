//! Progress notifications for long searches.

use indicatif::ProgressBar;

/// Receives progress while the exhaustive search walks the guess pool.
///
/// Implementations must be thread-safe: the parallel search reports from
/// worker threads.
pub trait SearchProgress: Send + Sync {
    /// Called once before the first guess with the pool size.
    fn begin(&self, _total: usize) {}

    /// Called after each evaluated (or skipped) guess.
    fn advance(&self, _delta: usize) {}

    fn finish(&self) {}
}

/// Discards all notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl SearchProgress for NoProgress {}

impl SearchProgress for ProgressBar {
    fn begin(&self, total: usize) {
        // One bar is reused across rounds.
        self.reset();
        self.set_length(total as u64);
    }

    fn advance(&self, delta: usize) {
        self.inc(delta as u64);
    }

    fn finish(&self) {
        self.finish_and_clear();
    }
}
