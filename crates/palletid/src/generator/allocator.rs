use crate::{CounterStore, Error, PalletNumber, Result};

/// Default upper bound on pallets per request.
pub const DEFAULT_MAX_COUNT: usize = 500;

/// Reserves contiguous blocks of daily sequence numbers.
///
/// The allocator itself is stateless: every allocation is one
/// [`CounterStore::reserve`] round trip, which is the only critical section
/// in the whole request lifecycle. No duplicate can be issued even under
/// retries, because a failed round trip reserves either nothing or a range
/// that is simply never handed out (an accepted leak).
pub struct SequenceAllocator<C> {
    store: C,
    max_count: usize,
}

impl<C: CounterStore> SequenceAllocator<C> {
    /// Creates an allocator with the default per-request bound.
    pub fn new(store: C) -> Self {
        Self::with_max_count(store, DEFAULT_MAX_COUNT)
    }

    /// Creates an allocator with a custom per-request bound.
    pub fn with_max_count(store: C, max_count: usize) -> Self {
        Self { store, max_count }
    }

    /// The configured per-request bound.
    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// Atomically reserves `count` pallet numbers for the current date.
    ///
    /// The returned list is strictly increasing and contiguous, and the
    /// reservation is durable at the store before this returns.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidCount`] if `count` is zero or above the bound
    ///   (fatal, no store call is made)
    /// - [`Error::StoreUnavailable`] if the reserve round trip fails
    pub async fn allocate(&self, count: usize) -> Result<Vec<PalletNumber>> {
        let reserve: u32 = match count.try_into() {
            Ok(n) if count >= 1 && count <= self.max_count => n,
            _ => {
                return Err(Error::InvalidCount {
                    count,
                    max: self.max_count,
                });
            }
        };
        let reservation = self.store.reserve(reserve).await?;
        tracing::debug!(
            date = %reservation.date(),
            start = reservation.start(),
            count,
            "reserved pallet range"
        );
        Ok(reservation.pallet_numbers().collect())
    }
}
