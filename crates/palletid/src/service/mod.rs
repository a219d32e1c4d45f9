//! The generation orchestrator: the single public entry point.
//!
//! Validates the request, allocates the pallet range, generates matching
//! series codes, persists the pairs, and owns the retry policy. A request
//! either fully succeeds or fully fails; the two store phases are not
//! wrapped in one cross-store transaction, so a late failure can leak an
//! allocated-but-unused pallet range. That leak is accepted; exposing a
//! partial result or risking a duplicate is not.

mod config;

pub use config::*;

use crate::{
    CounterStore, Error, PalletHistory, PalletNumber, RandSource, Result, SequenceAllocator,
    SeriesCode, SeriesGenerator, SleepProvider, ThreadRandom, TokioSleep, run_with_retry,
};
use core::marker::PhantomData;
use tracing::Instrument;

/// A request for `count` matched pallet/series pairs.
///
/// `session_id` is carried into logs for incident review only; repeated
/// calls with the same id still allocate fresh disjoint ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationRequest {
    pub count: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub session_id: Option<String>,
}

impl GenerationRequest {
    /// Creates a request without a session id.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            session_id: None,
        }
    }

    /// Attaches a tracing session id.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

/// A fully successful generation: equal-length lists where
/// `pallet_numbers[i]` pairs with `series[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub pallet_numbers: Vec<PalletNumber>,
    pub series: Vec<SeriesCode>,
}

impl GenerationResult {
    /// The matched pairs in construction order.
    pub fn pairs(&self) -> impl Iterator<Item = (&PalletNumber, &SeriesCode)> {
        self.pallet_numbers.iter().zip(&self.series)
    }
}

/// The caller-facing response shape.
///
/// UI callers branch on `error` rather than on exceptions: either both
/// arrays are fully populated and `error` is `None`, or both arrays are
/// empty and `error` holds a human-readable diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationResponse {
    pub pallet_numbers: Vec<String>,
    pub series: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub error: Option<String>,
}

impl GenerationResponse {
    fn success(result: &GenerationResult) -> Self {
        Self {
            pallet_numbers: result.pallet_numbers.iter().map(ToString::to_string).collect(),
            series: result.series.iter().map(ToString::to_string).collect(),
            error: None,
        }
    }

    fn failure(err: &Error) -> Self {
        Self {
            pallet_numbers: Vec::new(),
            series: Vec::new(),
            error: Some(err.to_string()),
        }
    }
}

/// The identifier generation service.
///
/// Generic over the counter store `C`, the history `H`, the random source
/// `R`, and the backoff sleep provider `S`, so every collaborator can be
/// mocked in tests.
pub struct GenerationService<C, H, R = ThreadRandom, S = TokioSleep> {
    allocator: SequenceAllocator<C>,
    history: H,
    series: SeriesGenerator<R>,
    config: ServiceConfig,
    _sleep: PhantomData<S>,
}

impl<C, H> GenerationService<C, H>
where
    C: CounterStore,
    H: PalletHistory,
{
    /// Creates a service with default configuration and the thread-local
    /// RNG.
    pub fn new(counters: C, history: H) -> Self {
        Self::with_config(counters, history, ServiceConfig::default())
    }

    /// Creates a service with a custom configuration.
    pub fn with_config(counters: C, history: H, config: ServiceConfig) -> Self {
        Self::with_parts(counters, history, ThreadRandom, config)
    }
}

impl<C, H, R, S> GenerationService<C, H, R, S>
where
    C: CounterStore,
    H: PalletHistory,
    R: RandSource<u64>,
    S: SleepProvider,
{
    /// Creates a service from explicit collaborators.
    pub fn with_parts(counters: C, history: H, rng: R, config: ServiceConfig) -> Self {
        Self {
            allocator: SequenceAllocator::with_max_count(counters, config.max_count),
            history,
            series: SeriesGenerator::with_rand_source(rng).max_draws(config.max_series_draws),
            config,
            _sleep: PhantomData,
        }
    }

    /// Generates `request.count` matched pallet/series pairs, returning the
    /// caller-facing response shape.
    ///
    /// Never returns a partial result: on any failure both arrays are empty
    /// and `error` is populated.
    pub async fn generate(&self, request: &GenerationRequest) -> GenerationResponse {
        match self.try_generate(request).await {
            Ok(result) => GenerationResponse::success(&result),
            Err(err) => {
                tracing::error!(
                    count = request.count,
                    session_id = request.session_id.as_deref().unwrap_or("-"),
                    error = %err,
                    "generation failed"
                );
                GenerationResponse::failure(&err)
            }
        }
    }

    /// Typed counterpart of [`Self::generate`].
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidCount`] immediately, before any store call
    /// - [`Error::RetriesExhausted`] when a transient failure outlives the
    ///   retry policy
    /// - [`Error::MaxRetriesExceeded`] when a series code cannot be drawn
    ///   within the redraw bound
    pub async fn try_generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        let count = request.count;
        let session_id = request.session_id.as_deref().unwrap_or("-");
        let span = tracing::info_span!("generate", count, session_id);

        async move {
            if count == 0 || count > self.config.max_count {
                return Err(Error::InvalidCount {
                    count,
                    max: self.config.max_count,
                });
            }

            // Phase 1: reserve the pallet range. A failed attempt reserves
            // nothing or leaks an unhanded range; retrying cannot duplicate.
            let pallets = run_with_retry::<S, _, _, _>(&self.config.retry, |attempt| {
                tracing::debug!(attempt, "allocating pallet range");
                self.allocator.allocate(count)
            })
            .await?;

            // Phase 2: series codes are dated by the reservation, so a pair
            // never mixes dates across a midnight boundary.
            let date = pallets[0].date();
            let series = run_with_retry::<S, _, _, _>(&self.config.retry, |attempt| {
                tracing::debug!(attempt, "generating series codes");
                self.series.generate(&self.history, date, count)
            })
            .await?;

            // Phase 3: persist the matched pairs.
            let batch: Vec<(PalletNumber, SeriesCode)> = pallets
                .iter()
                .copied()
                .zip(series.iter().copied())
                .collect();
            run_with_retry::<S, _, _, _>(&self.config.retry, |attempt| {
                tracing::debug!(attempt, "recording issued identifiers");
                self.history.record(&batch)
            })
            .await?;

            tracing::debug!(first = %pallets[0], last = %pallets[count - 1], "generation complete");
            Ok(GenerationResult {
                pallet_numbers: pallets,
                series,
            })
        }
        .instrument(span)
        .await
    }
}
