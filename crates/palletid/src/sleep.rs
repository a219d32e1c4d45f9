use core::future::Future;
use core::time::Duration;

/// A trait that abstracts over how to sleep for a given [`Duration`] in
/// async contexts.
///
/// This keeps the retry driver generic over runtimes and lets tests run
/// backoff paths without real timers.
pub trait SleepProvider {
    /// Returns a future that completes after `dur`.
    ///
    /// The future must be `Send` so retries can run on multi-threaded
    /// executors.
    fn sleep_for(dur: Duration) -> impl Future<Output = ()> + Send;
}

/// A [`SleepProvider`] using Tokio's timer.
///
/// This is the default provider for async applications built on Tokio.
pub struct TokioSleep;

impl SleepProvider for TokioSleep {
    fn sleep_for(dur: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(dur)
    }
}

/// A [`SleepProvider`] that yields to the scheduler instead of sleeping.
///
/// Useful when backoff delay is irrelevant (tests, low-latency retry
/// against an in-process store) at the cost of tighter polling.
pub struct TokioYield;

impl SleepProvider for TokioYield {
    fn sleep_for(_dur: Duration) -> impl Future<Output = ()> + Send {
        tokio::task::yield_now()
    }
}
