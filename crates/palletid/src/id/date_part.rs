use crate::ParseIdError;
use chrono::{Datelike, NaiveDate};
use core::fmt;
use core::str::FromStr;

/// The 6-digit `DDMMYY` day-month-year encoding used as the daily scoping
/// key for pallet sequences.
///
/// A new calendar day starts a fresh sequence; the counter for a date is
/// lazily initialized on first use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DatePart {
    day: u8,
    month: u8,
    year: u8,
}

impl DatePart {
    /// The number of characters in the formatted representation.
    pub const LEN: usize = 6;

    /// Creates a date part from validated components.
    ///
    /// `year` is the two-digit year (0..=99).
    ///
    /// # Errors
    ///
    /// Returns [`ParseIdError::InvalidDate`] if any component is out of
    /// range.
    pub fn new(day: u8, month: u8, year: u8) -> Result<Self, ParseIdError> {
        if !(1..=31).contains(&day) || !(1..=12).contains(&month) || year > 99 {
            return Err(ParseIdError::InvalidDate {
                value: format!("{day:02}{month:02}{year:02}"),
            });
        }
        Ok(Self { day, month, year })
    }

    /// Creates a date part from a calendar date, truncating the year to its
    /// final two digits.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            day: date.day() as u8,
            month: date.month() as u8,
            year: date.year().rem_euclid(100) as u8,
        }
    }

    /// Day of month, 1-based.
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Month, 1-based.
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Two-digit year.
    pub fn year(&self) -> u8 {
        self.year
    }
}

impl fmt::Display for DatePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}{:02}", self.day, self.month, self.year)
    }
}

impl FromStr for DatePart {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != Self::LEN {
            return Err(ParseIdError::InvalidLength {
                expected: Self::LEN,
                got: s.len(),
            });
        }
        if let Some(index) = s.find(|c: char| !c.is_ascii_digit()) {
            return Err(ParseIdError::InvalidCharacter {
                found: s.as_bytes()[index] as char,
                index,
            });
        }
        let digit = |i: usize| s.as_bytes()[i] - b'0';
        Self::new(
            digit(0) * 10 + digit(1),
            digit(2) * 10 + digit(3),
            digit(4) * 10 + digit(5),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero_padded() {
        let date = DatePart::new(5, 5, 25).unwrap();
        assert_eq!(date.to_string(), "050525");
        let date = DatePart::new(31, 12, 9).unwrap();
        assert_eq!(date.to_string(), "311209");
    }

    #[test]
    fn parses_round_trip() {
        let date: DatePart = "050525".parse().unwrap();
        assert_eq!(date, DatePart::new(5, 5, 25).unwrap());
        assert_eq!(date.to_string(), "050525");
    }

    #[test]
    fn rejects_out_of_range_components() {
        assert!(matches!(
            DatePart::new(0, 5, 25),
            Err(ParseIdError::InvalidDate { .. })
        ));
        assert!(matches!(
            DatePart::new(32, 5, 25),
            Err(ParseIdError::InvalidDate { .. })
        ));
        assert!(matches!(
            DatePart::new(5, 13, 25),
            Err(ParseIdError::InvalidDate { .. })
        ));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            "05052".parse::<DatePart>(),
            Err(ParseIdError::InvalidLength { expected: 6, got: 5 })
        ));
        assert!(matches!(
            "05a525".parse::<DatePart>(),
            Err(ParseIdError::InvalidCharacter { found: 'a', index: 2 })
        ));
    }

    #[test]
    fn truncates_calendar_year() {
        let date = DatePart::from_date(NaiveDate::from_ymd_opt(2025, 5, 5).unwrap());
        assert_eq!(date.to_string(), "050525");
    }
}
