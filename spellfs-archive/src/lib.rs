//! # SpellFS Archive
//!
//! Spellcross `.FS` archive container support.
//!
//! An FS file is a flat directory of fixed-width records (13-byte name,
//! offset, length) followed by the member payloads. Members named `*.LZ` or
//! `*.LZ0` usually hold [Spellcross LZ](spellfs_lzw) streams, sometimes
//! packed more than once.
//!
//! This crate provides:
//!
//! - [`FsArchive`]: reader with eager or lazy loading, eviction, lookups,
//!   wildcard listing and folder export
//! - [`FsWriter`]: builds new FS files
//! - [`unpack_nested`]: the repeated-decode policy used for packed members
//!
//! ## Example
//!
//! ```rust
//! use spellfs_archive::{FsArchive, FsWriter, OpenFlags, OpenOptions};
//! use spellfs_lzw::{LzwConfig, compress_layers};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("DATA.FS");
//!
//! let mut writer = FsWriter::new(std::fs::File::create(&path).unwrap());
//! writer.add_file("A.TXT", b"hello").unwrap();
//! let packed = compress_layers(b"world", 2, LzwConfig::SPELLCROSS).unwrap();
//! writer.add_file("B.LZ", &packed).unwrap();
//! writer.finish().unwrap();
//!
//! let mut archive = FsArchive::open(&path, OpenOptions::new(OpenFlags::DELZ_LZ)).unwrap();
//! assert_eq!(archive.len(), 2);
//! assert_eq!(archive.file("a.txt").unwrap(), b"hello");
//! assert_eq!(archive.file("B.LZ").unwrap(), b"world");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![forbid(unsafe_code)]

pub mod delz;
mod dump;
pub mod entry;
pub mod header;
pub mod options;
mod reader;
mod writer;

// Re-exports
pub use delz::{DelzError, Unpacked, unpack_nested};
pub use dump::DumpSummary;
pub use entry::{EntryId, FsEntry};
pub use options::{MAX_NESTED_DEPTH, OpenFlags, OpenOptions};
pub use reader::FsArchive;
pub use writer::FsWriter;
