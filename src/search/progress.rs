use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Snapshot of a bulk search's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchProgress {
    /// States popped from the frontier so far.
    pub explored: usize,
    /// Upper bound, normally the size of the start's reachability class.
    pub max_estimate: usize,
}

impl SearchProgress {
    pub fn new(max_estimate: usize) -> Self {
        Self {
            explored: 0,
            max_estimate,
        }
    }

    /// Fraction explored, clamped to `0.0..=1.0`.
    pub fn rate(&self) -> f32 {
        if self.max_estimate == 0 {
            return 1.0;
        }
        (self.explored as f32 / self.max_estimate as f32).min(1.0)
    }

    pub(crate) fn increment(&mut self) {
        self.explored += 1;
    }

    pub(crate) fn complete(&mut self) {
        self.explored = self.max_estimate;
    }
}

/// Receives a progress snapshot per popped node and once on completion.
pub type ProgressCallback = Box<dyn Fn(SearchProgress) + Send + Sync>;

/// Cooperative cancellation flag shared between a caller and a search.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Cancellation and progress hooks for one bulk run.
#[derive(Default)]
pub struct SearchControl {
    cancel: CancelToken,
    progress: Option<ProgressCallback>,
    max_estimate: Option<usize>,
}

impl SearchControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Overrides the default estimate of `(n²)!/2` reachable states.
    pub fn with_max_estimate(mut self, max_estimate: usize) -> Self {
        self.max_estimate = Some(max_estimate);
        self
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub(crate) fn max_estimate(&self) -> Option<usize> {
        self.max_estimate
    }

    pub(crate) fn report(&self, progress: SearchProgress) {
        if let Some(callback) = &self.progress {
            callback(progress);
        }
    }
}

impl fmt::Debug for SearchControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchControl")
            .field("cancel", &self.cancel)
            .field("progress", &self.progress.is_some())
            .field("max_estimate", &self.max_estimate)
            .finish()
    }
}
