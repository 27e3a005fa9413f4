//! Nested LZ unpacking.
//!
//! Some assets are double-packed: the first decode of a `.LZ` member yields
//! another LZ stream. Decoding is repeated while the output still passes
//! [`looks_like_compressed`], up to a fixed number of passes.

use spellfs_core::SpellFsError;
use spellfs_lzw::{LzwDecoder, LzwError, looks_like_compressed};
use thiserror::Error;

/// A decode pass failed.
#[derive(Debug, Error)]
#[error("decode pass {depth} failed: {source}")]
pub struct DelzError {
    /// Zero-based pass that failed.
    pub depth: usize,
    /// Codec error.
    #[source]
    pub source: LzwError,
}

impl DelzError {
    /// Attach the member name, producing the archive-level error.
    pub fn for_member(self, name: &str) -> SpellFsError {
        SpellFsError::decompression(name, self.depth, self.source)
    }
}

/// Result of [`unpack_nested`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unpacked {
    /// Final decoded bytes.
    pub data: Vec<u8>,
    /// Number of decode passes applied (at least one).
    pub passes: usize,
    /// The pass cap was hit while the output still looked packed.
    pub capped: bool,
}

/// Decode `data` once, then again while the output looks like another
/// stream, applying at most `max_depth` passes (minimum one).
///
/// Any failing pass fails the whole unpack; no partial output is kept.
///
/// # Example
///
/// ```rust
/// use spellfs_archive::unpack_nested;
/// use spellfs_lzw::{LzwConfig, LzwDecoder, compress_layers};
///
/// let packed = compress_layers(b"world", 2, LzwConfig::SPELLCROSS).unwrap();
/// let mut decoder = LzwDecoder::default();
/// let unpacked = unpack_nested(&mut decoder, &packed, 4).unwrap();
/// assert_eq!(unpacked.data, b"world");
/// assert_eq!(unpacked.passes, 2);
/// ```
pub fn unpack_nested(
    decoder: &mut LzwDecoder,
    data: &[u8],
    max_depth: usize,
) -> Result<Unpacked, DelzError> {
    let max_depth = max_depth.max(1);

    let mut current = decoder
        .decode_to_vec(data)
        .map_err(|source| DelzError { depth: 0, source })?;
    let mut passes = 1;

    while passes < max_depth && looks_like_compressed(&current) {
        current = decoder
            .decode_to_vec(&current)
            .map_err(|source| DelzError {
                depth: passes,
                source,
            })?;
        passes += 1;
    }

    let capped = passes == max_depth && looks_like_compressed(&current);
    if capped {
        tracing::debug!(passes, "nested unpack stopped at the pass limit");
    } else {
        tracing::trace!(passes, len = current.len(), "nested unpack done");
    }

    Ok(Unpacked {
        data: current,
        passes,
        capped,
    })
}
