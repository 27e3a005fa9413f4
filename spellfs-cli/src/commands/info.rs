//! Info command implementation.

use crate::utils::{format_size, read_options};
use spellfs_archive::FsArchive;
use spellfs_archive::header::directory_len;
use spellfs_core::name::extension;
use std::path::Path;

pub fn cmd_info(archive: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let fs = FsArchive::open(archive, read_options(false, 1))?;
    let metadata = std::fs::metadata(archive)?;
    let entries = fs.entries();

    let count_ext = |wanted: &str| {
        entries
            .iter()
            .filter(|e| extension(e.name()).is_some_and(|ext| ext.eq_ignore_ascii_case(wanted)))
            .count()
    };
    let stored: u64 = entries.iter().map(|e| u64::from(e.stored_size())).sum();

    println!("Archive Information");
    println!("===================");
    println!("File: {}", archive.display());
    println!("Size: {} bytes", metadata.len());
    println!();
    println!("Contents:");
    println!("  Entries: {}", fs.len());
    println!("  .LZ entries: {}", count_ext(".LZ"));
    println!("  .LZ0 entries: {}", count_ext(".LZ0"));
    println!("  Directory size: {} bytes", directory_len(fs.len() as u64));
    println!("  Stored payloads: {} ({} bytes)", format_size(stored), stored);

    if let Some(largest) = entries.iter().max_by_key(|e| e.stored_size()) {
        println!(
            "  Largest entry: {} ({})",
            largest.name(),
            format_size(u64::from(largest.stored_size()))
        );
    }

    let unaccounted = metadata
        .len()
        .saturating_sub(directory_len(fs.len() as u64) + stored);
    if unaccounted > 0 {
        println!("  Unreferenced bytes: {}", unaccounted);
    }

    Ok(())
}
