//! Performance benchmarks for spellfs-lzw
//!
//! This benchmark suite evaluates:
//! - Compression/decompression speed (throughput)
//! - Nested (double-packed) decoding as done when loading archive members
//! - Performance across typical asset sizes

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use spellfs_lzw::{LzwConfig, LzwDecoder, compress, compress_layers, looks_like_compressed};
use std::hint::black_box;

/// Type alias for pattern generator functions
type PatternGenerator = fn(usize) -> Vec<u8>;

/// Generate test data patterns for benchmarking
mod test_data {
    /// Uniform data - all bytes are the same (best compression)
    pub fn uniform(size: usize) -> Vec<u8> {
        vec![0xAA; size]
    }

    /// Random data - no patterns (worst compression)
    pub fn random(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x1234_5678_9ABC_DEF0;
        for _ in 0..size {
            seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            data.push((seed >> 32) as u8);
        }
        data
    }

    /// Sprite-like data - short runs of a small palette
    pub fn sprite_like(size: usize) -> Vec<u8> {
        let palette = [0u8, 0, 0, 17, 17, 42, 42, 42, 200, 0];
        let mut data = Vec::with_capacity(size);
        let mut i = 0usize;
        while data.len() < size {
            let run = 1 + (i * 7) % 5;
            let value = palette[i % palette.len()];
            for _ in 0..run.min(size - data.len()) {
                data.push(value);
            }
            i += 1;
        }
        data
    }

    /// Text-like data - mission briefings and string tables
    pub fn text_like(size: usize) -> Vec<u8> {
        let text = b"Enemy forces have been spotted near the river crossing. \
                     Hold the bridge until reinforcements arrive. ";
        let mut data = Vec::with_capacity(size);
        while data.len() < size {
            let remaining = size - data.len();
            data.extend_from_slice(&text[..remaining.min(text.len())]);
        }
        data
    }
}

/// Typical asset sizes
mod asset_sizes {
    /// Small asset, e.g. a text file
    pub const SMALL: usize = 16 * 1024;

    /// Medium asset, e.g. a sprite sheet
    pub const MEDIUM: usize = 128 * 1024;

    /// Large asset, e.g. a terrain map
    pub const LARGE: usize = 640 * 1024;
}

const SIZES: [(&str, usize); 3] = [
    ("small_16KB", asset_sizes::SMALL),
    ("medium_128KB", asset_sizes::MEDIUM),
    ("large_640KB", asset_sizes::LARGE),
];

const PATTERNS: [(&str, PatternGenerator); 4] = [
    ("uniform", test_data::uniform as PatternGenerator),
    ("random", test_data::random as PatternGenerator),
    ("sprite", test_data::sprite_like as PatternGenerator),
    ("text", test_data::text_like as PatternGenerator),
];

fn bench_compression_speed(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression_speed");

    for (size_name, size) in SIZES {
        for (pattern_name, generator) in PATTERNS {
            let data = generator(size);
            let id = format!("{}/{}", size_name, pattern_name);

            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(BenchmarkId::from_parameter(&id), &data, |b, data| {
                b.iter(|| {
                    let compressed = compress(black_box(data), LzwConfig::SPELLCROSS).unwrap();
                    black_box(compressed);
                });
            });
        }
    }

    group.finish();
}

/// Decoding with one reused decoder, the way an archive loads its members
fn bench_decompression_speed(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompression_speed");

    for (size_name, size) in SIZES {
        for (pattern_name, generator) in PATTERNS {
            let compressed = compress(&generator(size), LzwConfig::SPELLCROSS).unwrap();
            let id = format!("{}/{}", size_name, pattern_name);
            let mut decoder = LzwDecoder::new(LzwConfig::SPELLCROSS).unwrap();

            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(
                BenchmarkId::from_parameter(&id),
                &compressed,
                |b, compressed| {
                    b.iter(|| {
                        let len = decoder.decode(black_box(compressed)).unwrap().len();
                        black_box(len);
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_nested_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested_decoding");
    let data = test_data::sprite_like(asset_sizes::MEDIUM);

    for layers in 1..=4usize {
        let packed = compress_layers(&data, layers, LzwConfig::SPELLCROSS).unwrap();
        let mut decoder = LzwDecoder::new(LzwConfig::SPELLCROSS).unwrap();

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(layers), &packed, |b, packed| {
            b.iter(|| {
                let mut current = decoder.decode_to_vec(black_box(packed)).unwrap();
                while looks_like_compressed(&current) {
                    current = decoder.decode_to_vec(&current).unwrap();
                }
                black_box(current);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_compression_speed,
    bench_decompression_speed,
    bench_nested_decoding
);
criterion_main!(benches);
