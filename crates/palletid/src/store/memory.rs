use crate::{
    CounterStore, DatePart, DateSource, PalletHistory, PalletNumber, Reservation, Result,
    SeriesCode, WallClock,
};
use core::future::{Future, ready};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// An in-process store backend.
///
/// Holds one counter row per date plus the history of issued identifiers,
/// behind a single mutex so a reservation is one critical section. Used for
/// tests and single-node deployments; multi-node deployments implement the
/// store traits against a shared relational database.
pub struct MemoryStore<D = WallClock> {
    date: D,
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    counters: HashMap<DatePart, u64>,
    issued: HashMap<DatePart, u64>,
    series: HashSet<String>,
}

impl MemoryStore<WallClock> {
    /// Creates an empty store on the local wall clock.
    pub fn new() -> Self {
        Self::with_date_source(WallClock)
    }
}

impl Default for MemoryStore<WallClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DateSource> MemoryStore<D> {
    /// Creates an empty store with a custom [`DateSource`].
    pub fn with_date_source(date: D) -> Self {
        Self {
            date,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Sets the counter row for `date` to `value` (the high-water mark, not
    /// the next sequence).
    pub fn seed_counter(&self, date: DatePart, value: u64) -> Result<()> {
        let mut inner = self.inner.lock()?;
        inner.counters.insert(date, value);
        Ok(())
    }

    /// Deletes the counter row for `date`, as a reset or maintenance job
    /// would. The next reservation recovers from the issued history.
    pub fn drop_counter(&self, date: DatePart) -> Result<()> {
        let mut inner = self.inner.lock()?;
        inner.counters.remove(&date);
        Ok(())
    }

    /// Preloads formatted series codes into the history, for bring-up from
    /// an existing pallet-info table.
    pub fn seed_series<I>(&self, codes: I) -> Result<()>
    where
        I: IntoIterator<Item = String>,
    {
        let mut inner = self.inner.lock()?;
        inner.series.extend(codes);
        Ok(())
    }

    /// The highest recorded sequence for `date`, if any pallet was recorded.
    pub fn recorded_high_water(&self, date: DatePart) -> Result<Option<u64>> {
        let inner = self.inner.lock()?;
        Ok(inner.issued.get(&date).copied())
    }

    /// The number of series codes in the history.
    pub fn series_count(&self) -> Result<usize> {
        let inner = self.inner.lock()?;
        Ok(inner.series.len())
    }
}

impl<D> CounterStore for MemoryStore<D>
where
    D: DateSource + Send + Sync,
{
    fn reserve(&self, count: u32) -> impl Future<Output = Result<Reservation>> + Send {
        let result = (|| {
            let mut inner = self.inner.lock()?;
            // The date is read inside the critical section so a request
            // straddling midnight is dated at the moment of reservation.
            let date = self.date.today();
            let recovered = inner.issued.get(&date).copied().unwrap_or(0);
            let counter = inner.counters.entry(date).or_insert(recovered);
            let start = *counter + 1;
            *counter += u64::from(count);
            Ok(Reservation::new(date, start, count))
        })();
        ready(result)
    }
}

impl<D> PalletHistory for MemoryStore<D>
where
    D: DateSource + Send + Sync,
{
    fn series_exists(&self, code: &SeriesCode) -> impl Future<Output = Result<bool>> + Send {
        let result = self
            .inner
            .lock()
            .map(|inner| inner.series.contains(&code.to_string()))
            .map_err(Into::into);
        ready(result)
    }

    fn record(
        &self,
        batch: &[(PalletNumber, SeriesCode)],
    ) -> impl Future<Output = Result<()>> + Send {
        let result = (|| {
            let mut inner = self.inner.lock()?;
            for (pallet, series) in batch {
                let high_water = inner.issued.entry(pallet.date()).or_insert(0);
                *high_water = (*high_water).max(pallet.sequence());
                inner.series.insert(series.to_string());
            }
            Ok(())
        })();
        ready(result)
    }
}
