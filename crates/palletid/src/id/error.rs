/// Errors that can occur while parsing formatted identifiers.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ParseIdError {
    /// The input has the wrong number of characters.
    #[error("expected {expected} characters, got {got}")]
    InvalidLength { expected: usize, got: usize },

    /// The input contains a character outside the allowed set.
    #[error("invalid character {found:?} at index {index}")]
    InvalidCharacter { found: char, index: usize },

    /// The expected separator between date and suffix is missing.
    #[error("missing {separator:?} separator")]
    MissingSeparator { separator: char },

    /// The date components do not form a valid `DDMMYY` date.
    #[error("invalid date part: {value}")]
    InvalidDate { value: String },

    /// The sequence suffix is empty, zero, or not a natural number.
    #[error("invalid sequence number: {value}")]
    InvalidSequence { value: String },
}
