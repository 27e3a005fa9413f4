//! Archive members.

use crate::header::DirRecord;

/// Stable handle of an entry: its zero-based position in directory order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub(crate) usize);

/// One member of an FS archive.
///
/// The payload is `None` until loaded and again after eviction.
#[derive(Debug, Clone)]
pub struct FsEntry {
    pub(crate) name: String,
    pub(crate) offset: u32,
    pub(crate) size: u32,
    pub(crate) data: Option<Vec<u8>>,
    pub(crate) source: usize,
}

impl FsEntry {
    pub(crate) fn from_record(record: &DirRecord, source: usize) -> Self {
        Self {
            name: record.decoded_name(),
            offset: record.offset,
            size: record.size,
            data: None,
            source,
        }
    }

    /// Member name as stored in the directory.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Offset of the stored bytes within their container file.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Length of the stored (possibly packed) bytes.
    pub fn stored_size(&self) -> u32 {
        self.size
    }

    /// Whether the payload is in memory.
    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    /// The payload, if loaded. Unpacked when the policy asked for it.
    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// Index of the container file this entry came from, in open order.
    pub fn source(&self) -> usize {
        self.source
    }
}
