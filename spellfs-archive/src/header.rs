//! FS directory structures.
//!
//! ```text
//! u32                     entry count (little endian)
//! record[count]:
//!   u8[13]                name, NUL padded
//!   u32                   payload offset from the start of the file
//!   u32                   payload length
//! ...                     payloads, anywhere in the file
//! ```

use spellfs_core::bytes::{read_exact_or_eof, read_u32_le, write_u32_le};
use spellfs_core::name::{NAME_LEN, decode_name};
use spellfs_core::{Result, SpellFsError};
use std::io::{Read, Seek, SeekFrom, Write};

/// Size of the leading entry count.
pub const COUNT_LEN: u64 = 4;

/// Size of one directory record.
pub const RECORD_LEN: u64 = NAME_LEN as u64 + 8;

/// One directory record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirRecord {
    /// Raw name field.
    pub name: [u8; NAME_LEN],
    /// Payload offset.
    pub offset: u32,
    /// Payload length.
    pub size: u32,
}

impl DirRecord {
    /// Read one record.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut name = [0u8; NAME_LEN];
        read_exact_or_eof(reader, &mut name)?;
        let offset = read_u32_le(reader)?;
        let size = read_u32_le(reader)?;
        Ok(Self { name, offset, size })
    }

    /// Write one record.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.name)?;
        write_u32_le(writer, self.offset)?;
        write_u32_le(writer, self.size)?;
        Ok(())
    }

    /// Decoded member name.
    pub fn decoded_name(&self) -> String {
        decode_name(&self.name)
    }
}

/// Byte length of a directory holding `count` records.
pub fn directory_len(count: u64) -> u64 {
    COUNT_LEN + count * RECORD_LEN
}

/// Read the whole directory from the start of `reader`.
///
/// The count is checked against the stream length before anything is
/// allocated, so a corrupt count fails instead of reserving gigabytes.
pub fn read_directory<R: Read + Seek>(reader: &mut R) -> Result<Vec<DirRecord>> {
    let stream_len = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(0))?;

    let count = read_u32_le(reader)?;
    let needed = directory_len(u64::from(count));
    if needed > stream_len {
        return Err(SpellFsError::invalid_header(format!(
            "directory of {} entries needs {} bytes, file has {}",
            count, needed, stream_len
        )));
    }

    let mut records = Vec::with_capacity(count as usize);
    for _ in 0..count {
        records.push(DirRecord::read(reader)?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn record(name: &[u8], offset: u32, size: u32) -> DirRecord {
        let mut field = [0u8; NAME_LEN];
        field[..name.len()].copy_from_slice(name);
        DirRecord {
            name: field,
            offset,
            size,
        }
    }

    #[test]
    fn test_record_layout() {
        let rec = record(b"UNITS.LZ", 0x0102_0304, 7);
        let mut buf = Vec::new();
        rec.write(&mut buf).unwrap();

        assert_eq!(buf.len() as u64, RECORD_LEN);
        assert_eq!(&buf[..8], b"UNITS.LZ");
        assert_eq!(&buf[13..17], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(&buf[17..21], &[7, 0, 0, 0]);

        let parsed = DirRecord::read(&mut Cursor::new(&buf)).unwrap();
        assert_eq!(parsed, rec);
        assert_eq!(parsed.decoded_name(), "UNITS.LZ");
    }

    #[test]
    fn test_full_width_name() {
        let rec = record(b"ABCDEFGHI.JKL", 0, 0);
        assert_eq!(rec.decoded_name(), "ABCDEFGHI.JKL");
    }

    #[test]
    fn test_read_directory() {
        let mut buf = Vec::new();
        write_u32_le(&mut buf, 2).unwrap();
        record(b"A.TXT", 46, 5).write(&mut buf).unwrap();
        record(b"B.LZ", 51, 0).write(&mut buf).unwrap();
        buf.extend_from_slice(b"hello");

        let records = read_directory(&mut Cursor::new(&buf)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].decoded_name(), "A.TXT");
        assert_eq!(records[1].offset, 51);
    }

    #[test]
    fn test_read_directory_rejects_oversized_count() {
        let mut buf = Vec::new();
        write_u32_le(&mut buf, 1_000_000).unwrap();
        buf.extend_from_slice(&[0u8; 64]);

        let err = read_directory(&mut Cursor::new(&buf)).unwrap_err();
        assert!(matches!(err, SpellFsError::InvalidHeader { .. }));
    }

    #[test]
    fn test_read_directory_short_file() {
        let err = read_directory(&mut Cursor::new(&[1u8, 0][..])).unwrap_err();
        assert!(matches!(err, SpellFsError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_empty_directory() {
        let records = read_directory(&mut Cursor::new(&[0u8, 0, 0, 0][..])).unwrap();
        assert!(records.is_empty());
        assert_eq!(directory_len(0), 4);
        assert_eq!(directory_len(2), 46);
    }
}
