//! LZ encoder (compression).
//!
//! Produces streams in the game's format: full 256-symbol alphabet (no
//! inline dictionary), 9-bit start width, CLEAR before the width would pass
//! `reset_bits`, and a CLEAR CLEAR terminator.

use crate::bitstream_msb::MsbBitWriter;
use crate::config::LzwConfig;
use crate::error::{LzwError, Result};
use crate::header::{FULL_ALPHABET, StreamHeader, initial_bits_for};
use std::collections::HashMap;

/// LZ encoder for compression.
#[derive(Debug)]
pub struct LzwEncoder {
    config: LzwConfig,
    /// (prefix code, next byte) -> code
    table: HashMap<(u32, u8), u32>,
}

/// Code-width bookkeeping shared by every emitted code.
struct CodeWriter {
    writer: MsbBitWriter,
    initial_bits: u8,
    bits: u8,
    /// Length of the decoder's table after the codes written so far.
    table_len: usize,
}

impl CodeWriter {
    fn emit(&mut self, code: u32) -> Result<()> {
        self.writer.write_bits(code, self.bits)?;
        // the decoder appends an entry after every non-CLEAR code
        self.table_len += 1;
        if self.table_len + 1 > (1usize << self.bits) {
            self.bits += 1;
        }
        Ok(())
    }

    fn emit_clear(&mut self, clear_code: u32) -> Result<()> {
        self.writer.write_bits(clear_code, self.bits)?;
        self.bits = self.initial_bits;
        self.table_len = clear_code as usize + 1;
        Ok(())
    }
}

impl LzwEncoder {
    /// Create a new encoder with the given configuration.
    pub fn new(config: LzwConfig) -> Result<Self> {
        if !config.is_valid() {
            return Err(LzwError::InvalidConfig("bit widths out of range"));
        }
        Ok(Self {
            config,
            table: HashMap::new(),
        })
    }

    /// Compress `input` into a complete stream, header included.
    pub fn encode(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let clear_code = FULL_ALPHABET as u32;
        let initial_bits = initial_bits_for(FULL_ALPHABET);
        let max_table = 1usize << self.config.reset_bits;

        let header = StreamHeader {
            dict_size: FULL_ALPHABET as u16,
            initial_bits,
            dictionary: None,
        };
        let mut out = Vec::with_capacity(input.len() / 2 + 8);
        header.write_to(&mut out);

        let mut codes = CodeWriter {
            writer: MsbBitWriter::with_output(out),
            initial_bits,
            bits: initial_bits,
            table_len: clear_code as usize + 1,
        };

        self.table.clear();
        let mut next_code = clear_code + 1;
        let mut current: Option<u32> = None;

        for &byte in input {
            let Some(prefix) = current else {
                current = Some(u32::from(byte));
                continue;
            };

            if let Some(&code) = self.table.get(&(prefix, byte)) {
                current = Some(code);
                continue;
            }

            codes.emit(prefix)?;
            self.table.insert((prefix, byte), next_code);
            next_code += 1;

            // one more entry would widen codes past reset_bits
            if codes.table_len + 1 >= max_table {
                codes.emit_clear(clear_code)?;
                self.table.clear();
                next_code = clear_code + 1;
            }

            current = Some(u32::from(byte));
        }

        if let Some(prefix) = current {
            codes.emit(prefix)?;
        }

        codes.emit_clear(clear_code)?;
        codes.emit_clear(clear_code)?;

        tracing::trace!(
            input_len = input.len(),
            "encoded LZ stream"
        );
        Ok(codes.writer.into_vec())
    }
}

impl Default for LzwEncoder {
    fn default() -> Self {
        Self {
            config: LzwConfig::SPELLCROSS,
            table: HashMap::new(),
        }
    }
}
