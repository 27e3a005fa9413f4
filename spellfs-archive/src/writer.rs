//! FS archive writer.

use crate::header::{DirRecord, directory_len};
use spellfs_core::bytes::write_u32_le;
use spellfs_core::name::{NAME_LEN, encode_name};
use spellfs_core::{Result, SpellFsError};
use std::io::Write;

/// FS archive writer.
///
/// The directory precedes the payloads and stores absolute offsets, so
/// members are buffered until [`finish`](Self::finish) writes the file.
///
/// # Example
///
/// ```rust
/// use spellfs_archive::FsWriter;
///
/// let mut writer = FsWriter::new(Vec::new());
/// writer.add_file("A.TXT", b"hello").unwrap();
/// let bytes = writer.finish().unwrap();
/// assert_eq!(bytes.len(), 4 + 21 + 5);
/// ```
pub struct FsWriter<W: Write> {
    writer: W,
    members: Vec<([u8; NAME_LEN], Vec<u8>)>,
    payload_len: u64,
}

impl<W: Write> FsWriter<W> {
    /// Create a new FS writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            members: Vec::new(),
            payload_len: 0,
        }
    }

    /// Add a member.
    ///
    /// Names must fit the 13-byte field and may not contain NUL or path
    /// separators. Duplicate names are stored as given; readers return the
    /// first one.
    pub fn add_file(&mut self, name: &str, data: &[u8]) -> Result<()> {
        let field = encode_name(name)?;

        let end =
            directory_len(self.members.len() as u64 + 1) + self.payload_len + data.len() as u64;
        if end > u64::from(u32::MAX) {
            return Err(SpellFsError::invalid_header(format!(
                "adding \"{}\" would grow the archive past 4 GiB",
                name
            )));
        }

        self.members.push((field, data.to_vec()));
        self.payload_len += data.len() as u64;
        Ok(())
    }

    /// Number of members added so far.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether no member was added.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Write the directory and payloads, returning the inner writer.
    pub fn finish(mut self) -> Result<W> {
        let count = self.members.len() as u32;
        write_u32_le(&mut self.writer, count)?;

        let mut offset = directory_len(u64::from(count)) as u32;
        for (name, data) in &self.members {
            let record = DirRecord {
                name: *name,
                offset,
                size: data.len() as u32,
            };
            record.write(&mut self.writer)?;
            offset += record.size;
        }

        for (_, data) in &self.members {
            self.writer.write_all(data)?;
        }
        self.writer.flush()?;

        tracing::debug!(entries = count, "wrote FS archive");
        Ok(self.writer)
    }
}
