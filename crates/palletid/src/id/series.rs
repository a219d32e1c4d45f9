use crate::{DatePart, ParseIdError};
use core::fmt;
use core::str::FromStr;

/// The character set series codes are drawn from.
pub const SERIES_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// The number of random characters in a series code.
pub const SERIES_RANDOM_LEN: usize = 6;

/// A series code `DDMMYY-XXXXXX`: the daily date part plus six random
/// characters from [`SERIES_ALPHABET`].
///
/// Unlike pallet sequences, series uniqueness is global across all history,
/// not scoped to a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesCode {
    date: DatePart,
    random: [u8; SERIES_RANDOM_LEN],
}

impl SeriesCode {
    /// Creates a series code from a date part and a 6-character random part.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseIdError`] if the random part has the wrong length or
    /// contains characters outside `[A-Z0-9]`.
    pub fn new(date: DatePart, random_part: &str) -> Result<Self, ParseIdError> {
        if random_part.len() != SERIES_RANDOM_LEN {
            return Err(ParseIdError::InvalidLength {
                expected: SERIES_RANDOM_LEN,
                got: random_part.len(),
            });
        }
        let mut random = [0u8; SERIES_RANDOM_LEN];
        for (index, byte) in random_part.bytes().enumerate() {
            if !SERIES_ALPHABET.contains(&byte) {
                return Err(ParseIdError::InvalidCharacter {
                    found: byte as char,
                    index,
                });
            }
            random[index] = byte;
        }
        Ok(Self { date, random })
    }

    // Internal constructor for bytes already drawn from the alphabet.
    pub(crate) fn from_parts(date: DatePart, random: [u8; SERIES_RANDOM_LEN]) -> Self {
        debug_assert!(random.iter().all(|b| SERIES_ALPHABET.contains(b)));
        Self { date, random }
    }

    /// The date part under which this code was generated.
    pub fn date(&self) -> DatePart {
        self.date
    }

    /// The 6-character random part.
    pub fn random_part(&self) -> &str {
        // Always ASCII by construction.
        core::str::from_utf8(&self.random).expect("series random part is ASCII")
    }
}

impl fmt::Display for SeriesCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.date, self.random_part())
    }
}

impl FromStr for SeriesCode {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (date, random) = s
            .split_once('-')
            .ok_or(ParseIdError::MissingSeparator { separator: '-' })?;
        Self::new(date.parse()?, random)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> DatePart {
        DatePart::new(5, 5, 25).unwrap()
    }

    #[test]
    fn formats_date_dash_random() {
        let code = SeriesCode::new(date(), "A1B2C3").unwrap();
        assert_eq!(code.to_string(), "050525-A1B2C3");
        assert_eq!(code.random_part(), "A1B2C3");
    }

    #[test]
    fn parses_round_trip() {
        let code: SeriesCode = "050525-ZZ9900".parse().unwrap();
        assert_eq!(code.date(), date());
        assert_eq!(code.to_string(), "050525-ZZ9900");
    }

    #[test]
    fn rejects_bad_random_part() {
        assert!(matches!(
            SeriesCode::new(date(), "A1B2C"),
            Err(ParseIdError::InvalidLength { expected: 6, got: 5 })
        ));
        assert!(matches!(
            SeriesCode::new(date(), "a1b2c3"),
            Err(ParseIdError::InvalidCharacter { found: 'a', index: 0 })
        ));
        assert!(matches!(
            "050525A1B2C3".parse::<SeriesCode>(),
            Err(ParseIdError::MissingSeparator { separator: '-' })
        ));
    }
}
