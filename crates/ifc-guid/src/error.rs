//! Error types for GUID decoding.

use std::fmt;

use thiserror::Error;

/// Which textual form was being decoded when an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuidForm {
    /// 22-character IFC GUID.
    Compact,
    /// Dashed hexadecimal UUID text.
    Canonical,
}

impl fmt::Display for GuidForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuidForm::Compact => f.write_str("compact"),
            GuidForm::Canonical => f.write_str("canonical"),
        }
    }
}

/// Error categories, independent of the offending values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// G001: Input has the wrong length
    InvalidLength,
    /// G002: Character outside the alphabet / hex digit set
    InvalidCharacter,
    /// G003: First compact symbol does not fit in 2 bits
    InvalidLeadingSymbol,
}

impl ErrorKind {
    /// Returns the error code string (e.g., "G001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidLength => "G001",
            ErrorKind::InvalidCharacter => "G002",
            ErrorKind::InvalidLeadingSymbol => "G003",
        }
    }
}

/// Error while decoding either textual form of a GUID.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuidError {
    #[error("[G001] {form} GUID must have {expected} characters, found {actual}")]
    InvalidLength {
        form: GuidForm,
        expected: usize,
        actual: usize,
    },

    #[error("[G002] invalid character {found:?} at position {position} in {form} GUID")]
    InvalidCharacter {
        form: GuidForm,
        position: usize,
        found: char,
    },

    #[error("[G003] leading symbol {found:?} has index {index}, which does not fit in 2 bits")]
    InvalidLeadingSymbol { found: char, index: u8 },
}

impl GuidError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GuidError::InvalidLength { .. } => ErrorKind::InvalidLength,
            GuidError::InvalidCharacter { .. } => ErrorKind::InvalidCharacter,
            GuidError::InvalidLeadingSymbol { .. } => ErrorKind::InvalidLeadingSymbol,
        }
    }

    /// Returns the form being decoded when the error occurred.
    pub fn form(&self) -> GuidForm {
        match self {
            GuidError::InvalidLength { form, .. } | GuidError::InvalidCharacter { form, .. } => {
                *form
            }
            GuidError::InvalidLeadingSymbol { .. } => GuidForm::Compact,
        }
    }
}
