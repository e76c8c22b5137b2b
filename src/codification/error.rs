//! Error types for codification operations.

use crate::frame::FrameError;
use std::fmt;

/// Error type for codification operations.
///
/// Every error surfaces synchronously and aborts the current call; there is
/// no retry or partial recovery.
#[derive(Debug)]
pub enum CodificationError {
    /// A codec with the same column name is already registered.
    DuplicateName(String),
    /// Structural mismatch between the registered codecs and the data.
    ShapeMismatch { expected: String, got: String },
    /// Positional transform/revert given more items than registered codecs.
    TooManyValues { given: usize, codecs: usize },
    /// Revert of a code that was never assigned.
    UnknownCode { column: String, code: i64 },
    /// Named lookup against a column with no registered codec.
    UnknownColumn(String),
    /// Single-column revert against a multi-codec engine.
    AmbiguousColumn { registered: usize },
    /// Missing input where no replacement value is configured.
    MissingValue { column: String },
    /// Numeric coercion of a value that is not a number.
    InvalidNumeric { column: String, value: String },
    /// Operation is unimplemented by design.
    NotSupported(String),
    /// Frame construction failed during table rewriting.
    Frame(FrameError),
    /// Serialization or deserialization error.
    Serialization(String),
    /// I/O error during file operations.
    Io(String),
}

impl fmt::Display for CodificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodificationError::DuplicateName(name) => {
                write!(f, "Duplicate column name: {}", name)
            }
            CodificationError::ShapeMismatch { expected, got } => {
                write!(f, "Shape mismatch: expected {}, got {}", expected, got)
            }
            CodificationError::TooManyValues { given, codecs } => {
                write!(
                    f,
                    "Too many values: {} given for {} registered codecs",
                    given, codecs
                )
            }
            CodificationError::UnknownCode { column, code } => {
                write!(f, "Unknown code {} for column {}", code, column)
            }
            CodificationError::UnknownColumn(name) => {
                write!(f, "Unknown column: {}", name)
            }
            CodificationError::AmbiguousColumn { registered } => {
                write!(
                    f,
                    "Ambiguous column: single-column revert needs exactly one codec, {} registered",
                    registered
                )
            }
            CodificationError::MissingValue { column } => {
                write!(
                    f,
                    "Missing value in column {} with no replacement configured",
                    column
                )
            }
            CodificationError::InvalidNumeric { column, value } => {
                write!(f, "Invalid numeric value {:?} in column {}", value, column)
            }
            CodificationError::NotSupported(what) => {
                write!(f, "Not supported: {}", what)
            }
            CodificationError::Frame(err) => {
                write!(f, "Frame error: {}", err)
            }
            CodificationError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            CodificationError::Io(msg) => {
                write!(f, "I/O error: {}", msg)
            }
        }
    }
}

impl std::error::Error for CodificationError {}

impl From<FrameError> for CodificationError {
    fn from(err: FrameError) -> Self {
        CodificationError::Frame(err)
    }
}

impl From<std::io::Error> for CodificationError {
    fn from(err: std::io::Error) -> Self {
        CodificationError::Io(err.to_string())
    }
}

impl From<bincode::Error> for CodificationError {
    fn from(err: bincode::Error) -> Self {
        CodificationError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_duplicate_name() {
        let err = CodificationError::DuplicateName("age".to_string());
        assert!(err.to_string().contains("Duplicate column name"));
    }

    #[test]
    fn test_error_display_shape_mismatch() {
        let err = CodificationError::ShapeMismatch {
            expected: "3 columns".to_string(),
            got: "2 columns".to_string(),
        };
        assert!(err.to_string().contains("Shape mismatch"));
    }

    #[test]
    fn test_error_display_too_many_values() {
        let err = CodificationError::TooManyValues {
            given: 4,
            codecs: 2,
        };
        assert!(err.to_string().contains("Too many values"));
    }

    #[test]
    fn test_error_display_unknown_code() {
        let err = CodificationError::UnknownCode {
            column: "color".to_string(),
            code: 9,
        };
        assert!(err.to_string().contains("Unknown code 9"));
    }

    #[test]
    fn test_error_display_ambiguous_column() {
        let err = CodificationError::AmbiguousColumn { registered: 3 };
        assert!(err.to_string().contains("Ambiguous column"));
    }

    #[test]
    fn test_error_display_not_supported() {
        let err = CodificationError::NotSupported("weighted fitting".to_string());
        assert!(err.to_string().contains("Not supported"));
    }

    #[test]
    fn test_error_from_frame_error() {
        let err: CodificationError = FrameError::UnknownColumn("x".to_string()).into();
        assert!(matches!(err, CodificationError::Frame(_)));
        assert!(err.to_string().contains("Unknown column"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: CodificationError = io_err.into();
        assert!(matches!(err, CodificationError::Io(_)));
    }

    #[test]
    fn test_error_is_std_error() {
        let err = CodificationError::UnknownColumn("x".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
