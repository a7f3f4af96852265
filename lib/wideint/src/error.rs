//! Text parsing error type.

use core::fmt::{self, Debug, Display};

/// Result type.
///
/// A result with the [`ParseIntegerError`] type.
pub type Result<T> = core::result::Result<T, ParseIntegerError>;

/// Reason a text could not be parsed as an integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum IntegerErrorKind {
    /// No digits after the sign and the radix prefix.
    Empty,
    /// A character outside the alphabet of the radix.
    InvalidDigit,
    /// A well-formed value the target type cannot represent.
    OutOfRange,
}

/// Error returned when parsing an integer from text fails.
///
/// Only malformed data is reported this way: a radix outside `2..=36` is a
/// programming error and panics instead.
#[derive(Clone, PartialEq, Eq)]
pub struct ParseIntegerError {
    kind: IntegerErrorKind,
}

impl ParseIntegerError {
    /// Create a new error of the given `kind`.
    #[must_use]
    pub const fn new(kind: IntegerErrorKind) -> Self {
        Self { kind }
    }

    /// Returns the reason of the failure.
    #[must_use]
    pub const fn kind(&self) -> IntegerErrorKind {
        self.kind
    }
}

impl Debug for ParseIntegerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParseIntegerError {{ kind: {:?} }}", self.kind)
    }
}

impl Display for ParseIntegerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.kind {
            IntegerErrorKind::Empty => "cannot parse integer from empty string",
            IntegerErrorKind::InvalidDigit => "invalid digit found in string",
            IntegerErrorKind::OutOfRange => "number out of range for the type",
        })
    }
}

impl core::error::Error for ParseIntegerError {}
