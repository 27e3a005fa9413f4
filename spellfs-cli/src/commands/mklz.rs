//! Mklz command implementation.

use crate::utils::{batch_target, expand_inputs, is_loose_packed_name};
use spellfs_lzw::{LzwConfig, compress_layers};
use std::path::{Path, PathBuf};

pub fn cmd_mklz(
    inputs: &[PathBuf],
    output: Option<&Path>,
    layers: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    if layers == 0 {
        return Err("at least one layer is required".into());
    }

    if inputs.len() == 1 && !inputs[0].is_dir() {
        let input = &inputs[0];
        let target = match output {
            Some(path) if path.is_dir() => path.join(packed_file_name(input)),
            Some(path) => path.to_path_buf(),
            None => input.with_file_name(packed_file_name(input)),
        };
        return pack_file(input, &target, layers);
    }

    // already packed files are left alone when walking directories
    let files = expand_inputs(inputs, |name| !is_loose_packed_name(name))?;
    if files.is_empty() {
        return Err("No input files found".into());
    }
    if let Some(dir) = output {
        std::fs::create_dir_all(dir)?;
    }

    for file in &files {
        let target = batch_target(file, output, &packed_file_name(&file.path));
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        pack_file(&file.path, &target, layers)?;
    }
    println!("Packed {} files", files.len());
    Ok(())
}

/// `<name>.LZ` next to the original name.
fn packed_file_name(input: &Path) -> String {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    format!("{}.LZ", name)
}

fn pack_file(
    input: &Path,
    target: &Path,
    layers: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = std::fs::read(input)?;
    let packed = compress_layers(&data, layers, LzwConfig::SPELLCROSS)?;
    std::fs::write(target, &packed)?;

    println!(
        "{} -> {} ({} -> {} bytes, {} layer{})",
        input.display(),
        target.display(),
        data.len(),
        packed.len(),
        layers,
        if layers == 1 { "" } else { "s" }
    );
    Ok(())
}
