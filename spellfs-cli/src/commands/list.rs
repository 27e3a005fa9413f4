//! List command implementation.

use crate::utils::{is_packed_name, print_entries, read_options};
use serde::Serialize;
use spellfs_archive::{FsArchive, FsEntry};
use spellfs_core::WildcardPattern;
use std::path::Path;

/// JSON serializable entry data for archive listings.
#[derive(Debug, Serialize)]
struct EntryJson<'a> {
    index: usize,
    name: &'a str,
    offset: u32,
    size: u32,
    packed: bool,
}

impl<'a> EntryJson<'a> {
    fn from_entry(index: usize, entry: &'a FsEntry) -> Self {
        Self {
            index,
            name: entry.name(),
            offset: entry.offset(),
            size: entry.stored_size(),
            packed: is_packed_name(entry.name()),
        }
    }
}

/// JSON output for archive listing.
#[derive(Debug, Serialize)]
struct ArchiveListJson<'a> {
    archive: &'a str,
    pattern: &'a str,
    total_entries: usize,
    entries: Vec<EntryJson<'a>>,
}

pub fn cmd_list(
    archive: &Path,
    pattern: &str,
    verbose: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let fs = FsArchive::open(archive, read_options(false, 1))?;

    if !verbose && !json {
        for name in fs.file_names(pattern)? {
            println!("{}", name);
        }
        return Ok(());
    }

    let filter = WildcardPattern::new(pattern)?;
    let matched: Vec<(usize, &FsEntry)> = fs
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, e)| filter.matches(e.name()))
        .collect();

    if json {
        let listing = ArchiveListJson {
            archive: fs.archive_name(true),
            pattern,
            total_entries: fs.len(),
            entries: matched
                .iter()
                .map(|&(index, entry)| EntryJson::from_entry(index, entry))
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("Archive: {}", archive.display());
    println!();
    print_entries(&matched, verbose);
    Ok(())
}
