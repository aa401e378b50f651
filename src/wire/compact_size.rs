// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Variable-length unsigned integers.
//!
//! Format:
//! ```text
//! n < 0xfd          [u8] n
//! n <= 0xffff       [u8] 0xfd, [u16 LE] n
//! n <= 0xffffffff   [u8] 0xfe, [u32 LE] n
//! otherwise         [u8] 0xff, [u64 LE] n
//! ```
//! Decoding rejects any value written in a wider form than necessary.

use crate::error::{CodecError, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

const TAG_U16: u8 = 0xfd;
const TAG_U32: u8 = 0xfe;
const TAG_U64: u8 = 0xff;

pub fn write_compact_size<W: Write>(wtr: &mut W, n: u64) -> Result<()> {
    if n < u64::from(TAG_U16) {
        wtr.write_u8(n as u8)?;
    } else if n <= u64::from(u16::MAX) {
        wtr.write_u8(TAG_U16)?;
        wtr.write_u16::<LittleEndian>(n as u16)?;
    } else if n <= u64::from(u32::MAX) {
        wtr.write_u8(TAG_U32)?;
        wtr.write_u32::<LittleEndian>(n as u32)?;
    } else {
        wtr.write_u8(TAG_U64)?;
        wtr.write_u64::<LittleEndian>(n)?;
    }
    Ok(())
}

pub fn read_compact_size<R: Read>(rdr: &mut R) -> Result<u64> {
    let (value, min) = match rdr.read_u8()? {
        TAG_U16 => (u64::from(rdr.read_u16::<LittleEndian>()?), u64::from(TAG_U16)),
        TAG_U32 => (u64::from(rdr.read_u32::<LittleEndian>()?), 0x1_0000),
        TAG_U64 => (rdr.read_u64::<LittleEndian>()?, 0x1_0000_0000),
        small => return Ok(u64::from(small)),
    };
    if value < min {
        return Err(CodecError::NonCanonicalCompactSize);
    }
    Ok(value)
}

/// Reads a vector length prefix, rejecting anything above `max`.
pub fn read_length<R: Read>(rdr: &mut R, max: u64) -> Result<usize> {
    let len = read_compact_size(rdr)?;
    if len > max {
        return Err(CodecError::OversizedVector { len, max });
    }
    usize::try_from(len).map_err(|_| CodecError::OversizedVector { len, max })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode(n: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        write_compact_size(&mut buf, n).unwrap();
        buf
    }

    #[test]
    fn test_widths_at_boundaries() {
        for (n, width) in [
            (0u64, 1usize),
            (252, 1),
            (253, 3),
            (0xffff, 3),
            (0x1_0000, 5),
            (0xffff_ffff, 5),
            (0x1_0000_0000, 9),
            (u64::MAX, 9),
        ] {
            let bytes = encode(n);
            assert_eq!(bytes.len(), width, "width of {}", n);
            assert_eq!(read_compact_size(&mut Cursor::new(bytes)).unwrap(), n);
        }
    }

    #[test]
    fn test_non_canonical_rejected() {
        // 5 written with the u16 tag
        let bytes = [0xfdu8, 0x05, 0x00];
        let err = read_compact_size(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, CodecError::NonCanonicalCompactSize));

        let bytes = [0xfeu8, 0xff, 0xff, 0x00, 0x00];
        let err = read_compact_size(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, CodecError::NonCanonicalCompactSize));
    }

    #[test]
    fn test_truncated_is_io_error() {
        let err = read_compact_size(&mut Cursor::new([0xfeu8, 0x01])).unwrap_err();
        assert!(matches!(err, CodecError::Io(_)));
    }

    #[test]
    fn test_length_limit() {
        let bytes = encode(11);
        let err = read_length(&mut Cursor::new(bytes), 10).unwrap_err();
        assert!(matches!(err, CodecError::OversizedVector { len: 11, max: 10 }));
    }
}
