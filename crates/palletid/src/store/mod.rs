//! Store traits the generation service is built against.
//!
//! The daily counter is the single shared mutable resource; all mutation
//! goes through [`CounterStore::reserve`], a single atomic increment at the
//! store (row lock, compare-and-swap, or an in-process critical section).
//! Application code never reads-then-writes the counter across two round
//! trips.

mod memory;

pub use memory::*;

use crate::{DatePart, PalletNumber, Result, SeriesCode};
use core::future::Future;
use std::sync::Arc;

/// A contiguous range of daily sequence numbers handed back by
/// [`CounterStore::reserve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reservation {
    date: DatePart,
    start: u64,
    count: u32,
}

impl Reservation {
    /// Creates a reservation covering `start..start + count`.
    pub fn new(date: DatePart, start: u64, count: u32) -> Self {
        debug_assert!(start >= 1);
        debug_assert!(count >= 1);
        Self { date, start, count }
    }

    /// The date observed inside the atomic reservation step.
    pub fn date(&self) -> DatePart {
        self.date
    }

    /// The first reserved sequence number (1-based).
    pub fn start(&self) -> u64 {
        self.start
    }

    /// The number of reserved sequences.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// The reserved sequence numbers, in increasing order.
    pub fn sequences(&self) -> impl Iterator<Item = u64> + use<> {
        self.start..self.start + u64::from(self.count)
    }

    /// The reserved range as formatted-ready pallet numbers.
    pub fn pallet_numbers(&self) -> impl Iterator<Item = PalletNumber> + use<> {
        let date = self.date;
        self.sequences()
            .map(move |sequence| PalletNumber::from_parts(date, sequence))
    }
}

/// The transactional daily counter.
///
/// Implementations must make `reserve` a single atomic operation: derive the
/// current date inside the critical section, advance the counter for that
/// date by `count`, and durably commit before returning. Two simultaneous
/// reservations must partition the range `{prior+1 ..= prior+n1+n2}` without
/// overlap. A committed reservation is final even if the response to the
/// caller is lost; an unused range is an accepted leak, a duplicate is not.
///
/// Round trips are expected to carry a bounded timeout; a timeout surfaces
/// as [`Error::StoreUnavailable`] and is subject to the caller's retry
/// policy.
///
/// [`Error::StoreUnavailable`]: crate::Error::StoreUnavailable
pub trait CounterStore: Send + Sync {
    /// Atomically reserves `count` contiguous sequence numbers for the
    /// current date.
    fn reserve(&self, count: u32) -> impl Future<Output = Result<Reservation>> + Send;
}

/// The history of issued pallet numbers and series codes.
///
/// Consulted by the series generator's uniqueness check (against *all*
/// history, not just today) and by counter recovery when a counter row is
/// missing or was reset.
pub trait PalletHistory: Send + Sync {
    /// Returns whether `code` was ever issued before.
    fn series_exists(&self, code: &SeriesCode) -> impl Future<Output = Result<bool>> + Send;

    /// Durably records a batch of matched pallet/series pairs.
    fn record(
        &self,
        batch: &[(PalletNumber, SeriesCode)],
    ) -> impl Future<Output = Result<()>> + Send;
}

impl<T: CounterStore> CounterStore for Arc<T> {
    fn reserve(&self, count: u32) -> impl Future<Output = Result<Reservation>> + Send {
        (**self).reserve(count)
    }
}

impl<T: PalletHistory> PalletHistory for Arc<T> {
    fn series_exists(&self, code: &SeriesCode) -> impl Future<Output = Result<bool>> + Send {
        (**self).series_exists(code)
    }

    fn record(
        &self,
        batch: &[(PalletNumber, SeriesCode)],
    ) -> impl Future<Output = Result<()>> + Send {
        (**self).record(batch)
    }
}
