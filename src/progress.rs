//! Progress reporting surface.
//!
//! The search reports through a caller-supplied sink: coarse `(current,
//! total)` ticks during model construction and at enumeration milestones,
//! plus free-text lines for run events. Both methods default to no-ops, are
//! infallible, and are invoked synchronously between solver iterations, so
//! implementations should return promptly.

/// Receiver for search progress.
///
/// Implement this on whatever feeds a UI or a log. [`NullProgress`] is the
/// silent default.
pub trait ProgressSink {
    /// Called with a position within a known total, e.g. steps processed
    /// during model construction or attempts against the attempt cap.
    fn on_progress(&self, _current: usize, _total: usize) {}

    /// Called with a human-readable run event.
    fn on_log(&self, _message: &str) {}
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {}
