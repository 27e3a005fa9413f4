//! Cat command implementation.

use crate::utils::read_options;
use encoding_rs::Encoding;
use spellfs_archive::FsArchive;
use std::path::Path;

pub fn cmd_cat(
    archive: &Path,
    name: &str,
    delz: bool,
    encoding: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let encoding = Encoding::for_label(encoding.as_bytes())
        .ok_or_else(|| format!("Unknown encoding: {}", encoding))?;

    let mut fs = FsArchive::open(archive, read_options(delz, spellfs_archive::MAX_NESTED_DEPTH))?;
    let text = match fs.file_text(name, encoding) {
        Ok(text) => text,
        Err(e) if e.is_lookup_miss() => {
            return Err(format!(
                "{} has no entry named {} (see `spellfs list`)",
                archive.display(),
                name
            )
            .into());
        }
        Err(e) => return Err(e.into()),
    };
    print!("{}", text);
    if !text.ends_with('\n') {
        println!();
    }
    Ok(())
}
