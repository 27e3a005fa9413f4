//! Error types for SpellFS operations.
//!
//! This module provides the error type shared by the container layer and the
//! CLI. Codec-specific failures keep their own error type and are carried
//! through [`SpellFsError::Decompression`] as the error source.

use std::io;
use thiserror::Error;

/// Boxed error source used for codec failures.
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for SpellFS operations.
#[derive(Debug, Error)]
pub enum SpellFsError {
    /// I/O error from the underlying file or writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The archive could not be opened.
    #[error("Cannot open \"{path}\": {source}")]
    CannotOpen {
        /// Path that failed to open.
        path: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Invalid directory or header data.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header error.
        message: String,
    },

    /// Unexpected end of file.
    #[error("Unexpected end of file: expected {expected} more bytes")]
    UnexpectedEof {
        /// Number of bytes that were expected but not available.
        expected: usize,
    },

    /// Entry not found in archive.
    #[error("Entry not found: {name}")]
    EntryNotFound {
        /// Name of the missing entry.
        name: String,
    },

    /// Entry index outside of the directory.
    #[error("Entry index {index} out of range (archive has {count} entries)")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of entries in the archive.
        count: usize,
    },

    /// Entry name that cannot be stored in the 13-byte name field.
    #[error("Invalid entry name \"{name}\": {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Malformed wildcard pattern.
    #[error("Invalid wildcard pattern \"{pattern}\": {message}")]
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
        /// Parser message.
        message: String,
    },

    /// Unusable open or codec options.
    #[error("Invalid option: {message}")]
    InvalidOption {
        /// Description of the problem.
        message: String,
    },

    /// A member's packed stream failed to decode.
    #[error("DeLZ of file \"{name}\" failed at depth {depth}: {source}")]
    Decompression {
        /// Entry (or file) name.
        name: String,
        /// Zero-based decode pass that failed.
        depth: usize,
        /// Codec error.
        source: BoxedSource,
    },
}

/// Result type alias for SpellFS operations.
pub type Result<T> = std::result::Result<T, SpellFsError>;

impl SpellFsError {
    /// Create a cannot-open error.
    pub fn cannot_open(path: impl Into<String>, source: io::Error) -> Self {
        Self::CannotOpen {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(expected: usize) -> Self {
        Self::UnexpectedEof { expected }
    }

    /// Create an entry not found error.
    pub fn entry_not_found(name: impl Into<String>) -> Self {
        Self::EntryNotFound { name: name.into() }
    }

    /// Create an index out of range error.
    pub fn index_out_of_range(index: usize, count: usize) -> Self {
        Self::IndexOutOfRange { index, count }
    }

    /// Create an invalid name error.
    pub fn invalid_name(name: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason,
        }
    }

    /// Create an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create an invalid option error.
    pub fn invalid_option(message: impl Into<String>) -> Self {
        Self::InvalidOption {
            message: message.into(),
        }
    }

    /// Create a decompression error.
    pub fn decompression(
        name: impl Into<String>,
        depth: usize,
        source: impl Into<BoxedSource>,
    ) -> Self {
        Self::Decompression {
            name: name.into(),
            depth,
            source: source.into(),
        }
    }

    /// Whether this error means "absent" rather than "broken".
    pub fn is_lookup_miss(&self) -> bool {
        matches!(
            self,
            Self::EntryNotFound { .. } | Self::IndexOutOfRange { .. }
        )
    }
}
