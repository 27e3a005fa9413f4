//! Create command implementation.

use spellfs_archive::FsWriter;
use spellfs_core::name::encode_name;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

pub fn cmd_create(
    archive: &Path,
    files: &[PathBuf],
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Validate and read everything before touching the output file
    let mut members = Vec::with_capacity(files.len());
    for path in files {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| format!("Not a usable file name: {}", path.display()))?
            .to_string();
        encode_name(&name)?;
        let data = std::fs::read(path)?;
        members.push((name, data));
    }

    let mut writer = FsWriter::new(BufWriter::new(File::create(archive)?));
    let mut total = 0u64;
    for (name, data) in &members {
        writer.add_file(name, data)?;
        total += data.len() as u64;
        if verbose {
            println!("  adding: {} ({} bytes)", name, data.len());
        }
    }
    writer.finish()?;

    println!(
        "Created {} with {} entries ({} bytes of payload)",
        archive.display(),
        members.len(),
        total
    );
    Ok(())
}
