//! Delz command implementation.

use crate::utils::{
    batch_target, create_progress_bar, expand_inputs, is_loose_packed_name, unpacked_file_name,
};
use spellfs_archive::{Unpacked, unpack_nested};
use spellfs_lzw::{LzwConfig, LzwDecoder};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Options for unpacking loose streams.
pub struct DelzOptions {
    pub output: Option<PathBuf>,
    pub depth: usize,
    pub lenient: bool,
    pub skip_existing: bool,
    pub progress: bool,
}

pub fn cmd_delz(
    inputs: &[PathBuf],
    options: &DelzOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = if options.lenient {
        LzwConfig::LENIENT
    } else {
        LzwConfig::SPELLCROSS
    };
    let mut decoder = LzwDecoder::new(config)?;

    if inputs.len() == 1 && !inputs[0].is_dir() {
        return delz_single(&mut decoder, &inputs[0], options);
    }

    let files = expand_inputs(inputs, is_loose_packed_name)?;
    if files.is_empty() {
        return Err("No .LZ, .LZ0 or .LZW files found".into());
    }
    if let Some(dir) = &options.output {
        std::fs::create_dir_all(dir)?;
    }

    let pb = create_progress_bar(files.len() as u64, options.progress);
    let mut written = 0usize;
    let mut skipped = 0usize;
    let mut errors: Vec<(PathBuf, String)> = Vec::new();

    for file in &files {
        pb.set_message(file.relative.display().to_string());
        let name = unpacked_file_name(&file.path);
        let target = batch_target(file, options.output.as_deref(), &name);

        if options.skip_existing && is_non_empty_file(&target) {
            skipped += 1;
            pb.inc(1);
            continue;
        }

        match unpack_file(&mut decoder, &file.path, options.depth) {
            Ok(unpacked) => {
                if let Some(parent) = target.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&target, &unpacked.data)?;
                written += 1;
            }
            Err(e) => {
                tracing::debug!(path = %file.path.display(), error = %e, "unpack failed");
                errors.push((file.path.clone(), e.to_string()));
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!(
        "Unpacked {} of {} files ({} skipped, {} failed)",
        written,
        files.len(),
        skipped,
        errors.len()
    );
    if !errors.is_empty() {
        for (path, err) in &errors {
            eprintln!("  {}: {}", path.display(), err);
        }
        return Err(format!("{} files failed", errors.len()).into());
    }
    Ok(())
}

fn delz_single(
    decoder: &mut LzwDecoder,
    input: &Path,
    options: &DelzOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(output) = options.output.as_deref() else {
        let unpacked = unpack_file(decoder, input, options.depth)?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&unpacked.data)?;
        stdout.flush()?;
        return Ok(());
    };

    let target: PathBuf = if output.is_dir() {
        output.join(unpacked_file_name(input))
    } else {
        output.to_path_buf()
    };
    if options.skip_existing && is_non_empty_file(&target) {
        eprintln!("{} exists, skipped", target.display());
        return Ok(());
    }

    let unpacked = unpack_file(decoder, input, options.depth)?;
    std::fs::write(&target, &unpacked.data)?;

    eprintln!(
        "{} -> {} ({} bytes, {} pass{})",
        input.display(),
        target.display(),
        unpacked.data.len(),
        unpacked.passes,
        if unpacked.passes == 1 { "" } else { "es" }
    );
    Ok(())
}

fn unpack_file(
    decoder: &mut LzwDecoder,
    input: &Path,
    depth: usize,
) -> Result<Unpacked, Box<dyn std::error::Error>> {
    let data = std::fs::read(input)?;
    let name = input.display().to_string();
    let unpacked = unpack_nested(decoder, &data, depth).map_err(|e| e.for_member(&name))?;

    if unpacked.capped {
        tracing::warn!(
            path = %name,
            passes = unpacked.passes,
            "output still looks packed after the pass limit"
        );
    }
    Ok(unpacked)
}

/// Whether `path` is a regular file with content; empty outputs are redone.
fn is_non_empty_file(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|m| m.is_file() && m.len() > 0)
}
