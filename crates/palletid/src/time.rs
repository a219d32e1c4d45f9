use crate::DatePart;
use chrono::Local;

/// A trait for sources of the current calendar date.
///
/// This abstraction allows you to plug in the real server clock or a mocked
/// date in tests. Store implementations must read the date *inside* their
/// atomic reservation step, so a request straddling midnight is dated by the
/// moment of reservation, not by request entry.
pub trait DateSource {
    /// Returns the current date as a [`DatePart`].
    fn today(&self) -> DatePart;
}

/// A [`DateSource`] backed by the server's local wall clock.
///
/// Daily sequences conceptually reset at local midnight, so the local date
/// (not UTC) is the scoping key.
#[derive(Debug, Default, Clone, Copy)]
pub struct WallClock;

impl DateSource for WallClock {
    fn today(&self) -> DatePart {
        DatePart::from_date(Local::now().date_naive())
    }
}
