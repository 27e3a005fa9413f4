//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use spellfs_archive::{FsEntry, OpenFlags, OpenOptions};
use spellfs_core::name::extension;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions of loose LZ streams, matched without regard to case.
const LOOSE_PACKED_EXTENSIONS: [&str; 3] = [".LZ", ".LZ0", ".LZW"];

/// A file picked up from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    /// Path to read.
    pub path: PathBuf,
    /// Path below the directory argument it was found in, or the bare file
    /// name for explicit file arguments.
    pub relative: PathBuf,
}

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    let template = "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";
    if let Ok(style) = ProgressStyle::default_bar().template(template) {
        pb.set_style(style.progress_chars("█▓▒░ "));
    }
    pb
}

/// Open options for commands that read an archive.
///
/// Payloads are always loaded on demand; `delz` unpacks both packed kinds.
pub fn read_options(delz: bool, depth: usize) -> OpenOptions {
    let mut flags = OpenFlags::NO_LOAD;
    if delz {
        flags |= OpenFlags::DELZ_ALL;
    }
    OpenOptions::new(flags).with_max_nested_depth(depth)
}

/// Whether an entry name marks a packed member.
pub fn is_packed_name(name: &str) -> bool {
    OpenOptions::new(OpenFlags::DELZ_ALL).wants_delz(name)
}

/// Whether a loose file name carries an LZ stream extension.
pub fn is_loose_packed_name(name: &str) -> bool {
    extension(name).is_some_and(|ext| {
        LOOSE_PACKED_EXTENSIONS
            .iter()
            .any(|packed| ext.eq_ignore_ascii_case(packed))
    })
}

/// Whether a file name looks like an FS archive.
pub fn is_fs_name(name: &str) -> bool {
    extension(name).is_some_and(|ext| ext.eq_ignore_ascii_case(".FS"))
}

/// Expand command-line inputs into files.
///
/// Explicit files are kept as given. Directories are walked recursively in
/// file-name order and contribute the files whose name passes `keep`.
pub fn expand_inputs(
    inputs: &[PathBuf],
    keep: impl Fn(&str) -> bool,
) -> Result<Vec<InputFile>, Box<dyn std::error::Error>> {
    let mut files = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            let relative = input.file_name().map(PathBuf::from).unwrap_or_default();
            files.push(InputFile {
                path: input.clone(),
                relative,
            });
            continue;
        }

        for entry in WalkDir::new(input).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() || !keep(&entry.file_name().to_string_lossy()) {
                continue;
            }
            let relative = entry.path().strip_prefix(input)?.to_path_buf();
            files.push(InputFile {
                path: entry.into_path(),
                relative,
            });
        }
    }
    Ok(files)
}

/// Where a batch job writes the result for `input`.
///
/// With an output directory the input's relative path is mirrored below it;
/// otherwise the result lands next to the input.
pub fn batch_target(input: &InputFile, output: Option<&Path>, file_name: &str) -> PathBuf {
    match output {
        Some(dir) => dir.join(&input.relative).with_file_name(file_name),
        None => input.path.with_file_name(file_name),
    }
}

/// Print entries in a formatted table.
pub fn print_entries(entries: &[(usize, &FsEntry)], verbose: bool) {
    if verbose {
        println!("{:>5} {:>10} {:>10}  Name", "Index", "Offset", "Size");
        println!("{}", "-".repeat(45));

        let mut total_size = 0u64;
        for (index, entry) in entries {
            let marker = if is_packed_name(entry.name()) { "*" } else { " " };
            println!(
                "{:>5} {:>10} {:>10} {}{}",
                index,
                entry.offset(),
                entry.stored_size(),
                marker,
                entry.name()
            );
            total_size += u64::from(entry.stored_size());
        }

        println!("{}", "-".repeat(45));
        println!("{:>5} {:>10} {:>10}  {} files", "", "", total_size, entries.len());
    } else {
        for (_, entry) in entries {
            println!("{}", entry.name());
        }
    }
}

/// Default name for an unpacked loose stream.
///
/// `BUY.LZ` becomes `BUY.bin`, `MAP.DEF.LZ` becomes `MAP.DEF`, and anything
/// without a packed extension (`.LZ`, `.LZ0`, `.LZW`) gets `.bin` appended.
pub fn unpacked_file_name(input: &Path) -> String {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());

    if !is_loose_packed_name(&name) {
        return format!("{}.bin", name);
    }

    let stem = &name[..name.rfind('.').unwrap_or(name.len())];
    if stem.contains('.') {
        stem.to_string()
    } else {
        format!("{}.bin", stem)
    }
}

/// Human-readable byte count.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpacked_file_name() {
        assert_eq!(unpacked_file_name(Path::new("BUY.LZ")), "BUY.bin");
        assert_eq!(unpacked_file_name(Path::new("dir/BUY.lz0")), "BUY.bin");
        assert_eq!(unpacked_file_name(Path::new("MAP.DEF.LZ")), "MAP.DEF");
        assert_eq!(unpacked_file_name(Path::new("RAW.DAT")), "RAW.DAT.bin");
        assert_eq!(unpacked_file_name(Path::new("PAL.lzw")), "PAL.bin");
        assert_eq!(unpacked_file_name(Path::new("UNIT.DEF.LZW")), "UNIT.DEF");
    }

    #[test]
    fn test_loose_packed_names() {
        assert!(is_loose_packed_name("A.LZ"));
        assert!(is_loose_packed_name("a.lz0"));
        assert!(is_loose_packed_name("B.Lzw"));
        assert!(!is_loose_packed_name("LZ"));
        assert!(!is_loose_packed_name("A.LZX"));
        assert!(!is_packed_name("B.LZW"));
    }

    #[test]
    fn test_expand_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(dir.path().join("B.LZ"), b"b").unwrap();
        std::fs::write(dir.path().join("NOTE.TXT"), b"n").unwrap();
        std::fs::write(sub.join("A.lz0"), b"a").unwrap();
        let loose = dir.path().join("NOTE.TXT");

        let inputs = vec![dir.path().to_path_buf(), loose.clone()];
        let files = expand_inputs(&inputs, is_loose_packed_name).unwrap();
        let relative: Vec<_> = files.iter().map(|f| f.relative.clone()).collect();
        assert_eq!(
            relative,
            vec![
                PathBuf::from("B.LZ"),
                Path::new("sub").join("A.lz0"),
                PathBuf::from("NOTE.TXT"),
            ]
        );
        assert_eq!(files[2].path, loose);
    }

    #[test]
    fn test_batch_target() {
        let input = InputFile {
            path: PathBuf::from("in/sub/A.LZ"),
            relative: Path::new("sub").join("A.LZ"),
        };
        assert_eq!(
            batch_target(&input, Some(Path::new("out")), "A.bin"),
            Path::new("out").join("sub").join("A.bin")
        );
        assert_eq!(
            batch_target(&input, None, "A.bin"),
            Path::new("in/sub").join("A.bin")
        );
    }

    #[test]
    fn test_read_options() {
        let plain = read_options(false, 4);
        assert!(!plain.loads_eagerly());
        assert!(!plain.wants_decoder());

        let delz = read_options(true, 2);
        assert!(delz.wants_delz("A.LZ0"));
        assert_eq!(delz.max_nested_depth, 2);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
