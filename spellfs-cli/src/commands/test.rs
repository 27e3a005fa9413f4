//! Test command implementation.

use crate::utils::read_options;
use spellfs_archive::FsArchive;
use std::path::Path;

pub fn cmd_test(archive: &Path, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut fs = FsArchive::open(archive, read_options(true, spellfs_archive::MAX_NESTED_DEPTH))?;

    println!("Testing {} ({} entries)", archive.display(), fs.len());

    let mut ok_count = 0usize;
    let mut errors: Vec<(String, String)> = Vec::new();

    for index in 0..fs.len() {
        match fs.file_at(index) {
            Ok((name, data)) => {
                ok_count += 1;
                if verbose {
                    println!("  OK: {} ({} bytes)", name, data.len());
                }
            }
            Err(e) => {
                let name = fs.file_name(index).unwrap_or_default().to_string();
                if verbose {
                    println!("  FAILED: {} - {}", name, e);
                }
                errors.push((name, e.to_string()));
            }
        }
        // keep memory flat on large archives
        fs.free_at(index)?;
    }

    println!();
    println!("Results: {} OK, {} failed", ok_count, errors.len());

    if !errors.is_empty() {
        if !verbose {
            println!();
            println!("Errors:");
            for (name, err) in &errors {
                println!("  {}: {}", name, err);
            }
        }
        return Err(format!("{} entries failed", errors.len()).into());
    }

    println!("All entries OK");
    Ok(())
}
