//! LZW codec configuration.

/// LZW configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzwConfig {
    /// Capacity reserved once for the decoder's reusable output buffer.
    ///
    /// This is a preallocation hint only; larger outputs still decode.
    pub output_capacity: usize,
    /// Hard limit on decoded bytes per stream, if any.
    pub output_limit: Option<usize>,
    /// Widest code the decoder accepts before giving up on a stream.
    pub max_code_bits: u8,
    /// Widest code the encoder produces; it emits CLEAR before growing past it.
    pub reset_bits: u8,
    /// Whether a stream must end with the CLEAR CLEAR terminator.
    ///
    /// When disabled, running out of input bits ends the stream silently.
    pub require_end_marker: bool,
}

impl LzwConfig {
    /// Widest code the MSB bit reader can deliver.
    pub const MAX_SUPPORTED_BITS: u8 = 24;

    /// Settings matching the game's own `.LZ` / `.LZ0` assets.
    ///
    /// - 1 MB preallocated output buffer
    /// - no output limit
    /// - codes up to 24 bits accepted, 12-bit codes produced
    /// - CLEAR CLEAR terminator required
    pub const SPELLCROSS: Self = Self {
        output_capacity: 1_000_000,
        output_limit: None,
        max_code_bits: Self::MAX_SUPPORTED_BITS,
        reset_bits: 12,
        require_end_marker: true,
    };

    /// Lenient variant that accepts streams cut off before the terminator.
    pub const LENIENT: Self = Self {
        require_end_marker: false,
        ..Self::SPELLCROSS
    };

    /// Set the hard output limit.
    pub fn with_output_limit(mut self, limit: usize) -> Self {
        self.output_limit = Some(limit);
        self
    }

    /// Set the encoder's widest code.
    pub fn with_reset_bits(mut self, bits: u8) -> Self {
        self.reset_bits = bits;
        self
    }

    /// Check that the bit-width settings are usable.
    pub fn is_valid(&self) -> bool {
        (9..=Self::MAX_SUPPORTED_BITS).contains(&self.reset_bits)
            && (1..=Self::MAX_SUPPORTED_BITS).contains(&self.max_code_bits)
    }
}

impl Default for LzwConfig {
    fn default() -> Self {
        Self::SPELLCROSS
    }
}
