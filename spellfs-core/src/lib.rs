//! # SpellFS Core
//!
//! Core components shared by the SpellFS crates.
//!
//! - [`error`]: Error types
//! - [`bytes`]: Little-endian integer helpers for the on-disk formats
//! - [`name`]: Fixed-width member names, sanitisation and wildcard matching
//!
//! ## Architecture
//!
//! SpellFS is layered the same way as the game's asset pipeline:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L4: CLI                                                 │
//! │     list / extract / delz / mklz / create               │
//! ├─────────────────────────────────────────────────────────┤
//! │ L3: Container                                           │
//! │     FS directory, lazy loading, nested unpacking        │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     Spellcross LZW (.LZ / .LZ0)                         │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Core (this crate)                                   │
//! │     errors, little-endian helpers, names                │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use spellfs_core::name::{WildcardPattern, decode_name};
//!
//! let name = decode_name(b"FOO.PCX\0\0\0\0\0\0");
//! let pattern = WildcardPattern::new("*.pcx").unwrap();
//! assert!(pattern.matches(&name));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bytes;
pub mod error;
pub mod name;

// Re-exports for convenience
pub use error::{Result, SpellFsError};
pub use name::{NAME_LEN, WildcardPattern};
