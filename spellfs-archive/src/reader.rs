//! FS archive reader.

use crate::delz::unpack_nested;
use crate::entry::{EntryId, FsEntry};
use crate::header::read_directory;
use crate::options::OpenOptions;
use encoding_rs::Encoding;
use spellfs_core::bytes::read_exact_or_eof;
use spellfs_core::name::names_equal;
use spellfs_core::{Result, SpellFsError, WildcardPattern};
use spellfs_lzw::{LzwConfig, LzwDecoder};
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// One opened container file and the policy its entries load with.
#[derive(Debug, Clone)]
struct Source {
    path: PathBuf,
    options: OpenOptions,
}

/// An FS archive: the merged directory of one or more container files.
///
/// Entries keep directory order across [`append`](Self::append) calls and
/// name lookup returns the first match. Payloads are either read while the
/// directory is parsed or on first access, and may be evicted with
/// [`free`](Self::free) to be reloaded transparently later.
///
/// # Example
///
/// ```no_run
/// use spellfs_archive::{FsArchive, OpenFlags, OpenOptions};
///
/// let mut archive = FsArchive::open(
///     "COMMON.FS",
///     OpenOptions::new(OpenFlags::NO_LOAD | OpenFlags::DELZ_ALL),
/// )
/// .unwrap();
///
/// for name in archive.file_names("*.PAL").unwrap() {
///     println!("{}", name);
/// }
/// let terrain = archive.file("TERRAIN.LZ").unwrap();
/// println!("{} bytes", terrain.len());
/// ```
#[derive(Debug)]
pub struct FsArchive {
    name: String,
    sources: Vec<Source>,
    entries: Vec<FsEntry>,
    decoder: Option<LzwDecoder>,
}

impl FsArchive {
    /// Open a container file.
    ///
    /// Fails if the file cannot be opened, its directory is malformed, or
    /// (when loading eagerly) any payload cannot be read or unpacked.
    pub fn open(path: impl AsRef<Path>, options: OpenOptions) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut archive = Self {
            name,
            sources: Vec::new(),
            entries: Vec::new(),
            decoder: None,
        };
        archive.append(path, options)?;
        Ok(archive)
    }

    /// Add another container's entries to this archive.
    ///
    /// Returns the number of entries added. On error the archive is left
    /// exactly as it was.
    pub fn append(&mut self, path: impl AsRef<Path>, options: OpenOptions) -> Result<usize> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| SpellFsError::cannot_open(path.display().to_string(), e))?;
        let mut reader = BufReader::new(file);

        let records = read_directory(&mut reader)?;
        tracing::debug!(
            path = %path.display(),
            entries = records.len(),
            eager = options.loads_eagerly(),
            "parsed FS directory"
        );

        if options.wants_decoder() {
            decoder_for(&mut self.decoder, options.lzw)?;
        }

        let source = self.sources.len();
        let mut added = Vec::with_capacity(records.len());
        for record in &records {
            let mut entry = FsEntry::from_record(record, source);
            if options.loads_eagerly() {
                let raw = read_payload(&mut reader, entry.offset, entry.size)?;
                entry.data = Some(unpack_member(&mut self.decoder, &options, &entry.name, raw)?);
            }
            added.push(entry);
        }

        let count = added.len();
        self.sources.push(Source {
            path: path.to_path_buf(),
            options,
        });
        self.entries.extend(added);
        Ok(count)
    }

    /// Make sure an entry's payload is in memory and return it.
    ///
    /// Reopens the entry's own container file and applies that file's
    /// unpacking policy. A failed load leaves the entry not loaded.
    pub fn load(&mut self, id: EntryId) -> Result<&[u8]> {
        self.ensure_loaded(id)?;
        Ok(self.entries[id.0].data.as_deref().unwrap_or_default())
    }

    fn ensure_loaded(&mut self, id: EntryId) -> Result<()> {
        let count = self.entries.len();
        let entry = self
            .entries
            .get(id.0)
            .ok_or_else(|| SpellFsError::index_out_of_range(id.0, count))?;
        if entry.is_loaded() {
            return Ok(());
        }

        let source = &self.sources[entry.source];
        let mut file = File::open(&source.path)
            .map_err(|e| SpellFsError::cannot_open(source.path.display().to_string(), e))?;
        let raw = read_payload(&mut file, entry.offset, entry.size)?;
        let data = unpack_member(&mut self.decoder, &source.options, &entry.name, raw)?;

        tracing::debug!(name = %entry.name, len = data.len(), "loaded entry");
        self.entries[id.0].data = Some(data);
        Ok(())
    }

    /// Drop a loaded payload; it is reloaded on next access.
    ///
    /// Freeing an entry that is not loaded is a no-op.
    pub fn free(&mut self, id: EntryId) -> Result<()> {
        let count = self.entries.len();
        let entry = self
            .entries
            .get_mut(id.0)
            .ok_or_else(|| SpellFsError::index_out_of_range(id.0, count))?;
        if entry.data.take().is_some() {
            tracing::trace!(name = %entry.name, "evicted entry");
        }
        Ok(())
    }

    /// Evict the first entry with this name.
    pub fn free_by_name(&mut self, name: &str) -> Result<()> {
        let id = self
            .find(name)
            .ok_or_else(|| SpellFsError::entry_not_found(name))?;
        self.free(id)
    }

    /// Evict the entry at a directory index.
    pub fn free_at(&mut self, index: usize) -> Result<()> {
        self.free(EntryId(index))
    }

    /// First entry with this name, ignoring ASCII case.
    pub fn find(&self, name: &str) -> Option<EntryId> {
        self.entries
            .iter()
            .position(|e| names_equal(&e.name, name))
            .map(EntryId)
    }

    /// Payload of the first entry with this name, loading it if needed.
    pub fn file(&mut self, name: &str) -> Result<&[u8]> {
        let id = self
            .find(name)
            .ok_or_else(|| SpellFsError::entry_not_found(name))?;
        self.load(id)
    }

    /// Payload of a named entry decoded as text.
    ///
    /// Game text is single-byte (typically `windows-1250` for the Czech
    /// release). Malformed sequences become U+FFFD.
    pub fn file_text(&mut self, name: &str, encoding: &'static Encoding) -> Result<String> {
        let data = self.file(name)?;
        let (text, _) = encoding.decode_without_bom_handling(data);
        Ok(text.into_owned())
    }

    /// Name and payload of the entry at a directory index.
    pub fn file_at(&mut self, index: usize) -> Result<(&str, &[u8])> {
        self.ensure_loaded(EntryId(index))?;
        let entry = &self.entries[index];
        Ok((entry.name.as_str(), entry.data.as_deref().unwrap_or_default()))
    }

    /// Name of the entry at a directory index.
    pub fn file_name(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(FsEntry::name)
    }

    /// Names matching a wildcard pattern, in directory order.
    pub fn file_names(&self, pattern: &str) -> Result<Vec<&str>> {
        let pattern = WildcardPattern::new(pattern)?;
        Ok(self
            .entries
            .iter()
            .filter(|e| pattern.matches(&e.name))
            .map(FsEntry::name)
            .collect())
    }

    /// Number of entries across all opened files.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the archive has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in directory order.
    pub fn entries(&self) -> &[FsEntry] {
        &self.entries
    }

    /// Entry metadata by handle.
    pub fn entry(&self, id: EntryId) -> Option<&FsEntry> {
        self.entries.get(id.0)
    }

    /// File name of the first opened container.
    pub fn archive_name(&self, with_extension: bool) -> &str {
        if with_extension {
            return &self.name;
        }
        Path::new(&self.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.name)
    }

    /// Paths of the opened container files, in open order.
    pub fn source_paths(&self) -> impl Iterator<Item = &Path> {
        self.sources.iter().map(|s| s.path.as_path())
    }
}

/// Read `size` bytes at `offset`, leaving the stream position where it was.
///
/// The range is checked against the stream length before any buffer is
/// allocated.
fn read_payload<R: Read + Seek>(reader: &mut R, offset: u32, size: u32) -> Result<Vec<u8>> {
    let resume = reader.stream_position()?;
    let stream_len = reader.seek(SeekFrom::End(0))?;
    let end = u64::from(offset) + u64::from(size);
    if end > stream_len {
        reader.seek(SeekFrom::Start(resume))?;
        return Err(SpellFsError::unexpected_eof((end - stream_len) as usize));
    }

    reader.seek(SeekFrom::Start(u64::from(offset)))?;
    let mut data = vec![0u8; size as usize];
    read_exact_or_eof(reader, &mut data)?;
    reader.seek(SeekFrom::Start(resume))?;
    Ok(data)
}

/// Apply the source's unpacking policy to a raw payload.
fn unpack_member(
    decoder: &mut Option<LzwDecoder>,
    options: &OpenOptions,
    name: &str,
    raw: Vec<u8>,
) -> Result<Vec<u8>> {
    if !options.wants_delz(name) {
        return Ok(raw);
    }

    let decoder = decoder_for(decoder, options.lzw)?;
    let unpacked = unpack_nested(decoder, &raw, options.max_nested_depth)
        .map_err(|e| e.for_member(name))?;
    tracing::trace!(name, passes = unpacked.passes, "unpacked entry");
    Ok(unpacked.data)
}

/// The shared decoder, created or rebuilt when the config differs.
fn decoder_for(slot: &mut Option<LzwDecoder>, config: LzwConfig) -> Result<&mut LzwDecoder> {
    let decoder = match slot.take() {
        Some(decoder) if *decoder.config() == config => decoder,
        _ => LzwDecoder::new(config).map_err(|e| SpellFsError::invalid_option(e.to_string()))?,
    };
    Ok(slot.insert(decoder))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_payload_restores_position() {
        let mut cursor = Cursor::new(b"0123456789".to_vec());
        cursor.seek(SeekFrom::Start(2)).unwrap();

        let data = read_payload(&mut cursor, 5, 3).unwrap();
        assert_eq!(data, b"567");
        assert_eq!(cursor.stream_position().unwrap(), 2);
    }

    #[test]
    fn test_read_payload_short() {
        let mut cursor = Cursor::new(b"0123".to_vec());
        assert!(matches!(
            read_payload(&mut cursor, 2, 10),
            Err(SpellFsError::UnexpectedEof { expected: 8 })
        ));
    }

    #[test]
    fn test_read_payload_huge_size_rejected_up_front() {
        let mut cursor = Cursor::new(b"0123456789".to_vec());
        cursor.seek(SeekFrom::Start(4)).unwrap();

        let err = read_payload(&mut cursor, 6, 0xFFFF_FFF0).unwrap_err();
        assert!(matches!(
            err,
            SpellFsError::UnexpectedEof { expected } if expected == 0xFFFF_FFF0 - 4
        ));
        assert_eq!(cursor.stream_position().unwrap(), 4);
    }

    #[test]
    fn test_decoder_reused_for_same_config() {
        let mut slot = None;
        decoder_for(&mut slot, LzwConfig::SPELLCROSS).unwrap();
        assert!(slot.is_some());

        let config = decoder_for(&mut slot, LzwConfig::LENIENT).unwrap().config();
        assert!(!config.require_end_marker);

        let bad = LzwConfig::SPELLCROSS.with_reset_bits(40);
        assert!(matches!(
            decoder_for(&mut slot, bad),
            Err(SpellFsError::InvalidOption { .. })
        ));
    }

    #[test]
    fn test_unpack_member_respects_policy() {
        let mut slot = None;
        let raw = b"not packed".to_vec();
        let options = OpenOptions::default();
        let out = unpack_member(&mut slot, &options, "A.LZ", raw.clone()).unwrap();
        assert_eq!(out, raw);
        assert!(slot.is_none());
    }
}
