//! Bulk export of an archive to a folder.

use crate::entry::EntryId;
use crate::reader::FsArchive;
use spellfs_core::name::sanitize_component;
use spellfs_core::{Result, SpellFsError};
use std::fs;
use std::path::{Path, PathBuf};

/// What [`FsArchive::dump_to_folder`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpSummary {
    /// Folder the entries were written to.
    pub folder: PathBuf,
    /// Entries written.
    pub written: usize,
    /// Entries skipped because the target already existed.
    pub skipped: usize,
    /// Total bytes written.
    pub bytes: u64,
}

impl FsArchive {
    /// Write every entry to `<folder>/<archive base name>/<entry name>`.
    ///
    /// Directories are created as needed. With `skip_existing`, entries
    /// whose target already exists are neither loaded nor written. The
    /// first failure stops the dump; files already written stay in place.
    pub fn dump_to_folder(
        &mut self,
        folder: impl AsRef<Path>,
        skip_existing: bool,
    ) -> Result<DumpSummary> {
        self.dump_with_progress(folder, skip_existing, |_, _| {})
    }

    /// [`dump_to_folder`](Self::dump_to_folder) with a callback after each
    /// entry, receiving its index and name.
    pub fn dump_with_progress<F>(
        &mut self,
        folder: impl AsRef<Path>,
        skip_existing: bool,
        mut progress: F,
    ) -> Result<DumpSummary>
    where
        F: FnMut(usize, &str),
    {
        let target = folder.as_ref().join(self.archive_name(false));
        fs::create_dir_all(&target)?;

        let mut summary = DumpSummary {
            folder: target.clone(),
            ..DumpSummary::default()
        };

        for index in 0..self.len() {
            let stored = self.entries()[index].name();
            let file_name = sanitize_component(stored)
                .ok_or_else(|| SpellFsError::invalid_name(stored, "not usable as a file name"))?;
            let out_path = target.join(&file_name);

            if skip_existing && out_path.exists() {
                summary.skipped += 1;
                progress(index, &file_name);
                continue;
            }

            let data = self.load(EntryId(index))?;
            fs::write(&out_path, data)?;
            summary.written += 1;
            summary.bytes += data.len() as u64;
            progress(index, &file_name);
        }

        tracing::debug!(
            folder = %summary.folder.display(),
            written = summary.written,
            skipped = summary.skipped,
            "dumped archive"
        );
        Ok(summary)
    }
}
