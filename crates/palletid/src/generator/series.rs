use crate::{
    DatePart, Error, PalletHistory, RandSource, Result, SERIES_ALPHABET, SERIES_RANDOM_LEN,
    SeriesCode, ThreadRandom,
};
use std::collections::HashSet;

/// Default bound on redraws per series code.
///
/// At 36^6 possible random parts, collisions are negligible; the bound only
/// prevents an unbounded loop when the history is pathologically full.
pub const DEFAULT_MAX_DRAWS: u32 = 10;

/// Produces series codes that are unique among all ever-issued codes.
///
/// Each code is drawn at random, checked against the persisted history, and
/// redrawn on collision. A code is never accepted without a successful
/// check.
pub struct SeriesGenerator<R = ThreadRandom> {
    rng: R,
    max_draws: u32,
}

impl SeriesGenerator<ThreadRandom> {
    /// Creates a generator on the thread-local RNG.
    pub fn new() -> Self {
        Self::with_rand_source(ThreadRandom)
    }
}

impl Default for SeriesGenerator<ThreadRandom> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandSource<u64>> SeriesGenerator<R> {
    /// Creates a generator with a custom [`RandSource`].
    pub fn with_rand_source(rng: R) -> Self {
        Self {
            rng,
            max_draws: DEFAULT_MAX_DRAWS,
        }
    }

    /// Sets the redraw bound per code.
    pub fn max_draws(mut self, max_draws: u32) -> Self {
        self.max_draws = max_draws;
        self
    }

    /// Generates `count` series codes for `date`, each verified unique
    /// against `history` and against the codes drawn earlier in this batch.
    ///
    /// # Errors
    ///
    /// - [`Error::UniquenessCheckFailed`] / [`Error::StoreUnavailable`] if a
    ///   history lookup fails; the candidate is discarded, not accepted
    /// - [`Error::MaxRetriesExceeded`] if a code cannot be drawn within the
    ///   redraw bound; already-drawn codes are left untouched and the caller
    ///   decides whether the partial batch is usable
    pub async fn generate<H: PalletHistory>(
        &self,
        history: &H,
        date: DatePart,
        count: usize,
    ) -> Result<Vec<SeriesCode>> {
        let mut codes = Vec::with_capacity(count);
        let mut drawn = HashSet::with_capacity(count);
        for _ in 0..count {
            codes.push(self.draw_unique(history, date, &mut drawn).await?);
        }
        Ok(codes)
    }

    async fn draw_unique<H: PalletHistory>(
        &self,
        history: &H,
        date: DatePart,
        drawn: &mut HashSet<SeriesCode>,
    ) -> Result<SeriesCode> {
        for attempt in 1..=self.max_draws {
            let code = self.draw(date);
            if drawn.contains(&code) {
                continue;
            }
            if history.series_exists(&code).await? {
                tracing::debug!(code = %code, attempt, "series collision, redrawing");
                continue;
            }
            drawn.insert(code);
            return Ok(code);
        }
        Err(Error::MaxRetriesExceeded {
            attempts: self.max_draws,
        })
    }

    fn draw(&self, date: DatePart) -> SeriesCode {
        let mut random = [0u8; SERIES_RANDOM_LEN];
        for slot in &mut random {
            let index = (self.rng.rand() % SERIES_ALPHABET.len() as u64) as usize;
            *slot = SERIES_ALPHABET[index];
        }
        SeriesCode::from_parts(date, random)
    }
}
