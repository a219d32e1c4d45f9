use crate::{DEFAULT_MAX_COUNT, DEFAULT_MAX_DRAWS, RetryPolicy};

/// Tunables for a [`GenerationService`].
///
/// [`GenerationService`]: crate::GenerationService
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Upper bound on pallets per request.
    pub max_count: usize,
    /// Redraw bound per series code.
    pub max_series_draws: u32,
    /// Backoff policy for transient store failures.
    pub retry: RetryPolicy,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_count: DEFAULT_MAX_COUNT,
            max_series_draws: DEFAULT_MAX_DRAWS,
            retry: RetryPolicy::default(),
        }
    }
}
