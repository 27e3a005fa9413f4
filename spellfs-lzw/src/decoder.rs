//! LZ decoder (decompression).
//!
//! One decoder is meant to be created per archive and reused for every
//! member: the code table and output buffer keep their allocations between
//! calls, while all decoding state is rebuilt at the start of each stream.

use crate::bitstream_msb::MsbBitReader;
use crate::config::LzwConfig;
use crate::dictionary::CodeTable;
use crate::error::{LzwError, Result};
use crate::header::StreamHeader;

/// Reusable Spellcross LZ decoder.
#[derive(Debug)]
pub struct LzwDecoder {
    config: LzwConfig,
    table: CodeTable,
    output: Vec<u8>,
}

impl LzwDecoder {
    /// Create a new decoder with the given configuration.
    pub fn new(config: LzwConfig) -> Result<Self> {
        if !config.is_valid() {
            return Err(LzwError::InvalidConfig("bit widths out of range"));
        }

        Ok(Self {
            config,
            table: CodeTable::default(),
            output: Vec::with_capacity(config.output_capacity),
        })
    }

    /// The configuration this decoder was built with.
    pub fn config(&self) -> &LzwConfig {
        &self.config
    }

    /// Decode one complete stream.
    ///
    /// The returned slice borrows the decoder's internal buffer and is
    /// overwritten by the next call. On error nothing is returned: a
    /// truncated or corrupt stream never yields partial output.
    pub fn decode(&mut self, input: &[u8]) -> Result<&[u8]> {
        self.output.clear();

        if let Err(e) = self.decode_stream(input) {
            self.output.clear();
            tracing::trace!(input_len = input.len(), error = %e, "LZ stream rejected");
            return Err(e);
        }

        tracing::trace!(
            input_len = input.len(),
            output_len = self.output.len(),
            "decoded LZ stream"
        );
        Ok(&self.output)
    }

    /// Decode one complete stream into an owned buffer.
    pub fn decode_to_vec(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        self.decode(input).map(<[u8]>::to_vec)
    }

    fn decode_stream(&mut self, input: &[u8]) -> Result<()> {
        let (header, offset) = StreamHeader::parse(input)?;
        if header.initial_bits == 0 || header.initial_bits > self.config.max_code_bits {
            return Err(LzwError::InvalidBitWidth(header.initial_bits));
        }

        self.table.init(&header);
        let clear_code = self.table.clear_code();
        let mut bits = header.initial_bits;
        let mut reader = MsbBitReader::new(&input[offset..]);
        let mut previous_was_clear = false;

        loop {
            if bits > self.config.max_code_bits {
                return Err(LzwError::InvalidBitWidth(bits));
            }

            let Some(code) = reader.read_bits(bits)? else {
                if self.config.require_end_marker {
                    return Err(LzwError::UnexpectedEof {
                        position: reader.bits_read(),
                    });
                }
                break;
            };
            let code = code as usize;

            if code == clear_code {
                if previous_was_clear {
                    // CLEAR CLEAR terminates the stream
                    break;
                }
                self.table.restore();
                bits = header.initial_bits;
                previous_was_clear = true;
                continue;
            }
            previous_was_clear = false;

            if code >= self.table.len() {
                return Err(LzwError::InvalidCode {
                    code: code as u32,
                    table_len: self.table.len(),
                    position: reader.bits_read(),
                });
            }

            self.table.complete_pending(code);
            self.table.write_string(code, &mut self.output);

            if let Some(limit) = self.config.output_limit {
                if self.output.len() > limit {
                    return Err(LzwError::OutputLimit { limit });
                }
            }

            self.table.push_incomplete(code);
            if self.table.len() + 1 > (1usize << bits) {
                bits += 1;
            }
        }

        Ok(())
    }
}

impl Default for LzwDecoder {
    fn default() -> Self {
        Self {
            config: LzwConfig::SPELLCROSS,
            table: CodeTable::default(),
            output: Vec::with_capacity(LzwConfig::SPELLCROSS.output_capacity),
        }
    }
}
