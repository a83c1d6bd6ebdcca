//! Minimal variable-width integer codec for the match index payload.
//!
//! Unsigned LEB128 capped at `u32`. Counts and string lengths in the index
//! are small, so most values fit one byte; five bytes is the hard ceiling
//! and anything wider (or a fifth byte carrying bits beyond `u32`) decodes
//! as a corrupt payload.

use crate::error::DeepLinkError;

/// Append `value` to `out` as an unsigned LEB128 varint.
pub(crate) fn write_u32(out: &mut Vec<u8>, value: u32) {
    let mut v = value;
    loop {
        let byte = (v & 0x7f) as u8;
        v >>= 7;
        if v == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// Decode a varint from `buf` starting at `*pos`, advancing `*pos` past it.
pub(crate) fn read_u32(buf: &[u8], pos: &mut usize) -> Result<u32, DeepLinkError> {
    let start = *pos;
    let mut value: u32 = 0;
    let mut shift = 0u32;
    loop {
        let byte = *buf
            .get(*pos)
            .ok_or_else(|| DeepLinkError::corrupt(start, "truncated varint"))?;
        *pos += 1;
        let bits = u32::from(byte & 0x7f);
        if shift == 28 && bits > 0x0f {
            return Err(DeepLinkError::corrupt(start, "varint exceeds u32 range"));
        }
        value |= bits << shift;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
        shift += 7;
        if shift > 28 {
            return Err(DeepLinkError::corrupt(start, "varint longer than 5 bytes"));
        }
    }
}
