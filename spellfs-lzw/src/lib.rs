//! # SpellFS-LZW: Spellcross LZ codec
//!
//! This crate decodes and encodes the LZW variant used by Spellcross for its
//! `.LZ` and `.LZ0` assets.
//!
//! ## Stream format
//!
//! - **Header**: `u16` dictionary size, `u8` initial code width, and an inline
//!   initial dictionary when the size is below 256
//! - **MSB-first codes** whose width grows as the table fills
//! - **CLEAR code** equal to the dictionary size, restoring the initial table
//! - **Two consecutive CLEARs** terminate the stream
//!
//! Decoded data may itself be another LZ stream ("double-packed" assets);
//! [`looks_like_compressed`] is the heuristic used to detect that.
//!
//! ## Example
//!
//! ```rust
//! use spellfs_lzw::{LzwConfig, compress, decompress};
//!
//! let original = b"TOBEORNOTTOBEORTOBEORNOT";
//! let packed = compress(original, LzwConfig::SPELLCROSS).unwrap();
//! let unpacked = decompress(&packed, LzwConfig::SPELLCROSS).unwrap();
//! assert_eq!(unpacked, original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod bitstream_msb;
mod config;
mod decoder;
mod dictionary;
mod encoder;
mod error;
mod header;

pub use config::LzwConfig;
pub use decoder::LzwDecoder;
pub use encoder::LzwEncoder;
pub use error::{LzwError, Result};
pub use header::{StreamHeader, looks_like_compressed};

/// Decompress one LZ stream with the given configuration.
///
/// Creates a throwaway decoder; reuse an [`LzwDecoder`] when decoding many
/// streams.
pub fn decompress(data: &[u8], config: LzwConfig) -> Result<Vec<u8>> {
    let mut decoder = LzwDecoder::new(config)?;
    decoder.decode_to_vec(data)
}

/// Compress data into one LZ stream with the given configuration.
///
/// # Example
///
/// ```rust
/// use spellfs_lzw::{LzwConfig, compress, looks_like_compressed};
///
/// let packed = compress(b"hello hello hello", LzwConfig::SPELLCROSS).unwrap();
/// assert!(looks_like_compressed(&packed));
/// ```
pub fn compress(data: &[u8], config: LzwConfig) -> Result<Vec<u8>> {
    let mut encoder = LzwEncoder::new(config)?;
    encoder.encode(data)
}

/// Compress data `layers` times, producing a nested stream.
///
/// `layers == 0` returns the input unchanged.
pub fn compress_layers(data: &[u8], layers: usize, config: LzwConfig) -> Result<Vec<u8>> {
    let mut encoder = LzwEncoder::new(config)?;
    let mut current = data.to_vec();
    for _ in 0..layers {
        current = encoder.encode(&current)?;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let original = b"This is a test of compression! ".repeat(10);
        let packed = compress(&original, LzwConfig::SPELLCROSS).unwrap();
        let unpacked = decompress(&packed, LzwConfig::SPELLCROSS).unwrap();
        assert_eq!(unpacked, original);
    }

    #[test]
    fn test_layers() {
        let packed = compress_layers(b"world", 2, LzwConfig::SPELLCROSS).unwrap();
        let once = decompress(&packed, LzwConfig::SPELLCROSS).unwrap();
        assert!(looks_like_compressed(&once));
        let twice = decompress(&once, LzwConfig::SPELLCROSS).unwrap();
        assert_eq!(twice, b"world");
        assert!(!looks_like_compressed(&twice));

        assert_eq!(
            compress_layers(b"raw", 0, LzwConfig::SPELLCROSS).unwrap(),
            b"raw"
        );
    }

    #[test]
    fn test_truncated_stream_fails() {
        let original = b"The quick brown fox jumps over the lazy dog. ".repeat(20);
        let packed = compress(&original, LzwConfig::SPELLCROSS).unwrap();
        for cut in [0, 1, 2, 3, 10, packed.len() / 2, packed.len() - 2] {
            assert!(
                decompress(&packed[..cut], LzwConfig::SPELLCROSS).is_err(),
                "cut at {} must fail",
                cut
            );
        }
    }
}
