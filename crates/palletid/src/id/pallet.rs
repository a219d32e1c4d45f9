use crate::{DatePart, ParseIdError};
use core::fmt;
use core::str::FromStr;

/// A pallet number `DDMMYY/N`: the daily date part plus a 1-based sequence.
///
/// The sequence carries no width padding in the wire format (`/1`, `/23`,
/// `/456` are all valid), so callers must never assume a fixed width. For a
/// given date, issued sequences form a contiguous block starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PalletNumber {
    date: DatePart,
    sequence: u64,
}

impl PalletNumber {
    /// Creates a pallet number from a date part and a 1-based sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ParseIdError::InvalidSequence`] if `sequence` is zero.
    pub fn new(date: DatePart, sequence: u64) -> Result<Self, ParseIdError> {
        if sequence == 0 {
            return Err(ParseIdError::InvalidSequence {
                value: "0".into(),
            });
        }
        Ok(Self { date, sequence })
    }

    // Internal constructor for sequences already known to be >= 1.
    pub(crate) fn from_parts(date: DatePart, sequence: u64) -> Self {
        debug_assert!(sequence >= 1);
        Self { date, sequence }
    }

    /// The date part under which this number was allocated.
    pub fn date(&self) -> DatePart {
        self.date
    }

    /// The 1-based daily sequence.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl fmt::Display for PalletNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.date, self.sequence)
    }
}

impl FromStr for PalletNumber {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (date, seq) = s
            .split_once('/')
            .ok_or(ParseIdError::MissingSeparator { separator: '/' })?;
        let date: DatePart = date.parse()?;
        if seq.is_empty()
            || seq.bytes().any(|b| !b.is_ascii_digit())
            || (seq.len() > 1 && seq.starts_with('0'))
        {
            return Err(ParseIdError::InvalidSequence { value: seq.into() });
        }
        let sequence: u64 = seq
            .parse()
            .map_err(|_| ParseIdError::InvalidSequence { value: seq.into() })?;
        Self::new(date, sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> DatePart {
        DatePart::new(5, 5, 25).unwrap()
    }

    #[test]
    fn formats_without_padding() {
        assert_eq!(PalletNumber::new(date(), 1).unwrap().to_string(), "050525/1");
        assert_eq!(
            PalletNumber::new(date(), 23).unwrap().to_string(),
            "050525/23"
        );
        assert_eq!(
            PalletNumber::new(date(), 456).unwrap().to_string(),
            "050525/456"
        );
    }

    #[test]
    fn rejects_zero_sequence() {
        assert!(matches!(
            PalletNumber::new(date(), 0),
            Err(ParseIdError::InvalidSequence { .. })
        ));
    }

    #[test]
    fn parses_round_trip() {
        let pallet: PalletNumber = "050525/42".parse().unwrap();
        assert_eq!(pallet.date(), date());
        assert_eq!(pallet.sequence(), 42);
        assert_eq!(pallet.to_string(), "050525/42");
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            "05052542".parse::<PalletNumber>(),
            Err(ParseIdError::MissingSeparator { separator: '/' })
        ));
        assert!(matches!(
            "050525/".parse::<PalletNumber>(),
            Err(ParseIdError::InvalidSequence { .. })
        ));
        assert!(matches!(
            "050525/0".parse::<PalletNumber>(),
            Err(ParseIdError::InvalidSequence { .. })
        ));
        assert!(matches!(
            "050525/007".parse::<PalletNumber>(),
            Err(ParseIdError::InvalidSequence { .. })
        ));
        assert!(matches!(
            "050525/-1".parse::<PalletNumber>(),
            Err(ParseIdError::InvalidSequence { .. })
        ));
    }
}
