//! Little-endian read/write helpers.
//!
//! Every integer in the FS container is a little-endian `u32`. These helpers wrap `read_exact`/`write_all` so that a short
//! read surfaces as [`SpellFsError::UnexpectedEof`] instead of a bare I/O error.

use crate::error::{Result, SpellFsError};
use std::io::{self, Read, Write};

/// Fill `buf` completely or fail with an EOF error sized to the request.
pub fn read_exact_or_eof<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            SpellFsError::unexpected_eof(buf.len())
        } else {
            SpellFsError::Io(e)
        }
    })
}

/// Read a little-endian `u32`.
pub fn read_u32_le<R: Read>(reader: &mut R) -> Result<u32> {
    let mut buf = [0u8; 4];
    read_exact_or_eof(reader, &mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Write a little-endian `u32`.
pub fn write_u32_le<W: Write>(writer: &mut W, value: u32) -> Result<()> {
    writer.write_all(&value.to_le_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_le_values() {
        let mut cursor = Cursor::new(vec![0x78, 0x56, 0x34, 0x12, 0x01, 0x00, 0x00, 0x00]);
        assert_eq!(read_u32_le(&mut cursor).unwrap(), 0x1234_5678);
        assert_eq!(read_u32_le(&mut cursor).unwrap(), 1);
    }

    #[test]
    fn test_short_read_is_eof() {
        let mut cursor = Cursor::new(vec![0x01, 0x02]);
        let err = read_u32_le(&mut cursor).unwrap_err();
        assert!(matches!(err, SpellFsError::UnexpectedEof { expected: 4 }));
    }

    #[test]
    fn test_write_le_values() {
        let mut out = Vec::new();
        write_u32_le(&mut out, 0xDEAD_BEEF).unwrap();
        write_u32_le(&mut out, 21).unwrap();
        assert_eq!(out, vec![0xEF, 0xBE, 0xAD, 0xDE, 21, 0, 0, 0]);
    }
}
