//! Error types for archive operations
//!
//! Every fallible archiver operation returns [`ArchiveResult<T>`]. Value
//! level problems (a string that is not a valid integer, a host type with no
//! scalar form) are not errors at this layer; they surface as `None` or an
//! empty string from `arbor_val`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for archive operations
///
/// # Examples
///
/// ```rust
/// use arbor_archive::ArchiveError;
///
/// let err = ArchiveError::RootMismatch {
///     expected: "root".to_string(),
///     found: "config".to_string(),
/// };
///
/// assert_eq!(err.to_string(), "root mismatch: expected <root>, found <config>");
/// ```
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The file behind a path could not be opened
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading or writing the stream failed part way through
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// The input text is not a well-formed document of the format
    #[error("parse error: {format} - {message}")]
    Parse {
        /// The format being decoded (e.g., "XML", "JSON")
        format: String,
        message: String,
    },

    /// The top-level element does not carry the requested root name
    #[error("root mismatch: expected <{expected}>, found <{found}>")]
    RootMismatch { expected: String, found: String },

    /// The input or produced bytes are not valid UTF-8
    #[error("encoding error: {0}")]
    Encoding(String),

    /// A root, attribute or child name cannot be written in the format
    #[error("invalid name: {name:?}")]
    InvalidName { name: String },

    /// A value exists but the format has no way to express it
    #[error("unrepresentable value for {name:?}: {reason}")]
    Unrepresentable { name: String, reason: String },
}

impl ArchiveError {
    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        ArchiveError::Parse {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn root_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        ArchiveError::RootMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn invalid_name(name: impl Into<String>) -> Self {
        ArchiveError::InvalidName { name: name.into() }
    }
}

/// Result type for archive operations
pub type ArchiveResult<T> = Result<T, ArchiveError>;
