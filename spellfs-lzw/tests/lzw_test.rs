//! Integration tests for the Spellcross LZ codec public API.

use spellfs_lzw::{
    LzwConfig, LzwDecoder, LzwEncoder, LzwError, StreamHeader, compress, compress_layers,
    decompress, looks_like_compressed,
};

/// Deterministic pseudo-random bytes drawn from `alphabet`.
fn noise(len: usize, alphabet: &[u8], mut seed: u32) -> Vec<u8> {
    (0..len)
        .map(|_| {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            alphabet[(seed >> 16) as usize % alphabet.len()]
        })
        .collect()
}

#[test]
fn test_roundtrip_text() {
    let original = b"Spellcross: the last battle. Units, terrain and sprites. ".repeat(50);
    let packed = compress(&original, LzwConfig::SPELLCROSS).unwrap();
    assert!(packed.len() < original.len());
    assert_eq!(decompress(&packed, LzwConfig::SPELLCROSS).unwrap(), original);
}

#[test]
fn test_roundtrip_binary() {
    let original: Vec<u8> = (0..20_000u32).map(|i| (i * 7 % 251) as u8).collect();
    let packed = compress(&original, LzwConfig::SPELLCROSS).unwrap();
    assert_eq!(decompress(&packed, LzwConfig::SPELLCROSS).unwrap(), original);
}

#[test]
fn test_roundtrip_many_table_resets() {
    let original = noise(200_000, b"0123456789abcdef", 0xC0FFEE);
    let packed = compress(&original, LzwConfig::SPELLCROSS).unwrap();
    assert_eq!(decompress(&packed, LzwConfig::SPELLCROSS).unwrap(), original);
}

#[test]
fn test_encoder_output_header() {
    let packed = compress(b"abc", LzwConfig::SPELLCROSS).unwrap();
    let (header, offset) = StreamHeader::parse(&packed).unwrap();
    assert_eq!(header.dict_size, 256);
    assert_eq!(header.initial_bits, 9);
    assert!(header.dictionary.is_none());
    assert_eq!(offset, 3);
    assert!(looks_like_compressed(&packed));
}

#[test]
fn test_empty_input() {
    let packed = compress(b"", LzwConfig::SPELLCROSS).unwrap();
    assert_eq!(decompress(&packed, LzwConfig::SPELLCROSS).unwrap(), b"");
}

#[test]
fn test_nested_layers_peel_one_at_a_time() {
    let original = b"double packed sprite table";
    let packed = compress_layers(original, 3, LzwConfig::SPELLCROSS).unwrap();

    let mut decoder = LzwDecoder::new(LzwConfig::SPELLCROSS).unwrap();
    let mut current = packed;
    let mut layers = 0;
    while looks_like_compressed(&current) {
        current = decoder.decode_to_vec(&current).unwrap();
        layers += 1;
    }
    assert_eq!(layers, 3);
    assert_eq!(current, original);
}

#[test]
fn test_decoder_reuse_across_streams() {
    let mut encoder = LzwEncoder::default();
    let mut decoder = LzwDecoder::default();

    let inputs: Vec<Vec<u8>> = (0..8u32)
        .map(|i| noise(1_000 + i as usize * 700, b"ABCD", i))
        .collect();
    for input in &inputs {
        let packed = encoder.encode(input).unwrap();
        assert_eq!(decoder.decode(&packed).unwrap(), input.as_slice());
    }
}

#[test]
fn test_garbage_is_rejected() {
    let mut decoder = LzwDecoder::default();
    assert!(decoder.decode(&[]).is_err());
    assert!(decoder.decode(b"hello").is_err());
    assert!(decoder.decode(&[0x00, 0x01, 9]).is_err());
}

#[test]
fn test_truncation_never_yields_output() {
    let original = noise(5_000, b"xyz ", 7);
    let packed = compress(&original, LzwConfig::SPELLCROSS).unwrap();
    let mut decoder = LzwDecoder::default();

    for cut in (0..packed.len() - 2).step_by(97) {
        assert!(decoder.decode(&packed[..cut]).is_err(), "cut at {}", cut);
    }
}

#[test]
fn test_lenient_accepts_missing_terminator() {
    let original = b"ABABABABABAB";
    let packed = compress(original, LzwConfig::SPELLCROSS).unwrap();
    // drop the trailing terminator bytes
    let cut = &packed[..packed.len() - 3];

    assert!(decompress(cut, LzwConfig::SPELLCROSS).is_err());
    let lenient = decompress(cut, LzwConfig::LENIENT).unwrap();
    assert!(original.starts_with(&lenient));
}

#[test]
fn test_output_limit_applies() {
    let original = vec![0u8; 100_000];
    let packed = compress(&original, LzwConfig::SPELLCROSS).unwrap();
    let config = LzwConfig::SPELLCROSS.with_output_limit(10_000);
    assert!(matches!(
        decompress(&packed, config),
        Err(LzwError::OutputLimit { limit: 10_000 })
    ));
}

#[test]
fn test_invalid_config_rejected() {
    let config = LzwConfig::SPELLCROSS.with_reset_bits(30);
    assert!(matches!(
        LzwDecoder::new(config),
        Err(LzwError::InvalidConfig(_))
    ));
    assert!(LzwEncoder::new(config).is_err());
}
