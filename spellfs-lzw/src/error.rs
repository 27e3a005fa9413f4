//! LZW-specific error types.

use thiserror::Error;

/// LZ stream decoding/encoding errors.
///
/// A failed decode never yields partial output; the caller gets one of these.
#[derive(Debug, Error)]
pub enum LzwError {
    /// Stream header is malformed or shorter than it claims.
    #[error("Invalid LZ header: {message}")]
    InvalidHeader {
        /// Description of the header problem.
        message: String,
    },

    /// Invalid bit width in the header or reached while decoding.
    #[error("Invalid bit width: {0}")]
    InvalidBitWidth(u8),

    /// Code that does not exist in the dictionary yet.
    #[error("Invalid LZW code {code} (table has {table_len} entries) at bit {position}")]
    InvalidCode {
        /// The offending code.
        code: u32,
        /// Dictionary size when the code was read.
        table_len: usize,
        /// Bit position after the code.
        position: u64,
    },

    /// Input ended before the CLEAR CLEAR terminator.
    #[error("Unexpected end of data at bit position {position}")]
    UnexpectedEof {
        /// Bit position where EOF occurred.
        position: u64,
    },

    /// Decoded output grew past the configured limit.
    #[error("Decoded output exceeds limit of {limit} bytes")]
    OutputLimit {
        /// The configured limit.
        limit: usize,
    },

    /// Unusable configuration.
    #[error("Invalid LZW configuration: {0}")]
    InvalidConfig(&'static str),
}

impl LzwError {
    /// Create an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }
}

/// Result type for LZW operations.
pub type Result<T> = std::result::Result<T, LzwError>;
