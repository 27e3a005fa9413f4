//! LZ stream header and the nested-stream heuristic.
//!
//! ```text
//! u16  dict_size       little endian
//! u8   initial_bits
//! u8[dict_size]        initial dictionary, present only when dict_size < 256
//! ...                  MSB-first code stream
//! ```
//!
//! A `dict_size` of 256 or more means the full byte alphabet; it is not
//! stored because it would just be `0..=255`.

use crate::error::{LzwError, Result};

/// Size of the fixed part of the header.
pub const FIXED_HEADER_LEN: usize = 3;

/// Number of symbols in the implicit full alphabet.
pub const FULL_ALPHABET: usize = 256;

/// Parsed stream header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamHeader<'a> {
    /// Stored dictionary length field.
    pub dict_size: u16,
    /// Code width at the start of the stream (and after every CLEAR).
    pub initial_bits: u8,
    /// Inline dictionary, `None` for the implicit full alphabet.
    pub dictionary: Option<&'a [u8]>,
}

impl<'a> StreamHeader<'a> {
    /// Parse the header at the start of `input`.
    ///
    /// Returns the header and the offset of the first code byte.
    pub fn parse(input: &'a [u8]) -> Result<(Self, usize)> {
        if input.len() < FIXED_HEADER_LEN {
            return Err(LzwError::invalid_header(format!(
                "stream is {} bytes, shorter than the {}-byte header",
                input.len(),
                FIXED_HEADER_LEN
            )));
        }

        let dict_size = u16::from_le_bytes([input[0], input[1]]);
        let initial_bits = input[2];

        if dict_size == 0 {
            return Err(LzwError::invalid_header("empty initial dictionary"));
        }

        let mut offset = FIXED_HEADER_LEN;
        let dictionary = if usize::from(dict_size) < FULL_ALPHABET {
            let end = offset + usize::from(dict_size);
            let dict = input.get(offset..end).ok_or_else(|| {
                LzwError::invalid_header(format!(
                    "inline dictionary of {} bytes truncated",
                    dict_size
                ))
            })?;
            offset = end;
            Some(dict)
        } else {
            None
        };

        Ok((
            Self {
                dict_size,
                initial_bits,
                dictionary,
            },
            offset,
        ))
    }

    /// Number of literal codes before CLEAR.
    pub fn alphabet_len(&self) -> usize {
        match self.dictionary {
            Some(dict) => dict.len(),
            None => FULL_ALPHABET,
        }
    }

    /// Literal byte for a code below [`alphabet_len`](Self::alphabet_len).
    #[inline]
    pub fn literal(&self, code: usize) -> u8 {
        match self.dictionary {
            Some(dict) => dict[code],
            None => code as u8,
        }
    }

    /// Serialize the header.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.dict_size.to_le_bytes());
        out.push(self.initial_bits);
        if let Some(dict) = self.dictionary {
            out.extend_from_slice(dict);
        }
    }
}

/// Smallest code width able to express every code up to and including CLEAR.
pub fn initial_bits_for(alphabet_len: usize) -> u8 {
    let mut bits = 1u8;
    while (1usize << bits) <= alphabet_len {
        bits += 1;
    }
    bits
}

/// Conservative check whether a buffer looks like another LZ stream.
///
/// Used only to decide whether a decoded member should be decoded once more.
/// It accepts `dict_len` in `2..=512` and a bit width in `8..=13`, and needs
/// at least one code byte after the header. False positives over-decode and
/// false negatives stop one layer early, so callers treat it as best effort.
pub fn looks_like_compressed(buf: &[u8]) -> bool {
    if buf.len() < 4 {
        return false;
    }

    let dict_len = u16::from_le_bytes([buf[0], buf[1]]);
    let bit_width = buf[2];

    if !(2..=512).contains(&dict_len) {
        return false;
    }
    if !(8..=13).contains(&bit_width) {
        return false;
    }

    let mut header = FIXED_HEADER_LEN;
    if dict_len & 0x100 == 0 {
        header += usize::from(dict_len);
    }

    header < buf.len()
}
