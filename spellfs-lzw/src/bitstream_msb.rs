//! MSB-first bit stream operations for Spellcross LZ.
//!
//! Codes are packed from the most significant bit of each byte downwards.

use crate::config::LzwConfig;
use crate::error::{LzwError, Result};

/// MSB-first bit reader for LZ decompression.
#[derive(Debug)]
pub struct MsbBitReader<'a> {
    /// Input data.
    data: &'a [u8],
    /// Current byte position.
    byte_pos: usize,
    /// Bit buffer (MSB-first, valid bits in the low end).
    buffer: u64,
    /// Number of valid bits in buffer.
    bits_in_buffer: u8,
    /// Total bits read (for error reporting).
    total_bits_read: u64,
}

impl<'a> MsbBitReader<'a> {
    /// Create a new MSB bit reader.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            byte_pos: 0,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_read: 0,
        }
    }

    /// Read `count` bits (1..=24), or `None` if fewer remain.
    pub fn read_bits(&mut self, count: u8) -> Result<Option<u32>> {
        if count == 0 || count > LzwConfig::MAX_SUPPORTED_BITS {
            return Err(LzwError::InvalidBitWidth(count));
        }

        while self.bits_in_buffer < count {
            let Some(&byte) = self.data.get(self.byte_pos) else {
                return Ok(None);
            };
            self.byte_pos += 1;
            self.buffer = (self.buffer << 8) | u64::from(byte);
            self.bits_in_buffer += 8;
        }

        let shift = self.bits_in_buffer - count;
        let mask = (1u64 << count) - 1;
        let value = (self.buffer >> shift) & mask;

        self.bits_in_buffer -= count;
        self.total_bits_read += u64::from(count);

        Ok(Some(value as u32))
    }

    /// Get total bits read.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }
}

/// MSB-first bit writer for LZ compression.
#[derive(Debug)]
pub struct MsbBitWriter {
    /// Output buffer.
    output: Vec<u8>,
    /// Bit buffer (MSB-first).
    buffer: u64,
    /// Number of bits in buffer.
    bits_in_buffer: u8,
}

impl MsbBitWriter {
    /// Create a writer that appends to an existing buffer (e.g. after a header).
    pub fn with_output(output: Vec<u8>) -> Self {
        Self {
            output,
            buffer: 0,
            bits_in_buffer: 0,
        }
    }

    /// Write `count` bits (1..=24) of `value`.
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        if count == 0 || count > LzwConfig::MAX_SUPPORTED_BITS {
            return Err(LzwError::InvalidBitWidth(count));
        }

        let mask = (1u64 << count) - 1;
        self.buffer = (self.buffer << count) | (u64::from(value) & mask);
        self.bits_in_buffer += count;

        while self.bits_in_buffer >= 8 {
            let byte = (self.buffer >> (self.bits_in_buffer - 8)) as u8;
            self.output.push(byte);
            self.bits_in_buffer -= 8;
        }

        Ok(())
    }

    /// Pad the last partial byte with zeros and return the output.
    pub fn into_vec(mut self) -> Vec<u8> {
        if self.bits_in_buffer > 0 {
            let remaining = 8 - self.bits_in_buffer;
            let byte = ((self.buffer << remaining) & 0xFF) as u8;
            self.output.push(byte);
        }
        self.output
    }
}

impl Default for MsbBitWriter {
    fn default() -> Self {
        Self::with_output(Vec::new())
    }
}
