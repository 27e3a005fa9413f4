//! Extract command implementation.

use crate::utils::{create_progress_bar, expand_inputs, format_size, is_fs_name, read_options};
use spellfs_archive::{DumpSummary, FsArchive};
use std::path::{Path, PathBuf};

/// Options for extracting archives.
pub struct ExtractOptions {
    pub output: PathBuf,
    pub skip_existing: bool,
    pub delz: bool,
    pub depth: usize,
    pub progress: bool,
}

/// Extract every archive named on the command line.
///
/// Directories contribute the `.FS` files below them. A failing archive is
/// reported and the remaining ones are still extracted.
pub fn cmd_extract(
    archives: &[PathBuf],
    options: &ExtractOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let files = expand_inputs(archives, is_fs_name)?;
    if files.is_empty() {
        return Err("No .FS archives found".into());
    }

    if let [file] = files.as_slice() {
        let summary = extract_one(&file.path, options)?;
        print_summary(&summary);
        return Ok(());
    }

    let mut failed = 0usize;
    for file in &files {
        match extract_one(&file.path, options) {
            Ok(summary) => print_summary(&summary),
            Err(e) => {
                eprintln!("{}: {}", file.path.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(format!("{} of {} archives failed", failed, files.len()).into());
    }
    Ok(())
}

fn print_summary(summary: &DumpSummary) {
    println!(
        "Extracted {} files ({}) to {}",
        summary.written,
        format_size(summary.bytes),
        summary.folder.display()
    );
    if summary.skipped > 0 {
        println!("Skipped {} existing files", summary.skipped);
    }
}

fn extract_one(
    archive: &Path,
    options: &ExtractOptions,
) -> Result<DumpSummary, Box<dyn std::error::Error>> {
    let mut fs = FsArchive::open(archive, read_options(options.delz, options.depth))?;

    let pb = create_progress_bar(fs.len() as u64, options.progress);
    let result = fs.dump_with_progress(&options.output, options.skip_existing, |_, name| {
        pb.set_message(name.to_string());
        pb.inc(1);
    });

    match result {
        Ok(summary) => {
            pb.finish_and_clear();
            Ok(summary)
        }
        Err(e) => {
            pb.abandon();
            Err(e.into())
        }
    }
}
