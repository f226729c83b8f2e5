//! Unsigned LEB128.

use super::CodecError;

pub(super) fn write(buf: &mut Vec<u8>, mut value: u32) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            return;
        }
        buf.push(byte | 0x80);
    }
}

pub(super) fn write_usize(buf: &mut Vec<u8>, value: usize) {
    write(buf, value as u32);
}

/// Cursor over a blob.
pub(super) struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(super) fn new(bytes: &'a [u8], pos: usize) -> Self {
        Self { bytes, pos }
    }

    pub(super) fn read(&mut self) -> Result<u32, CodecError> {
        let start = self.pos;
        let mut result: u32 = 0;
        let mut shift = 0;
        loop {
            let byte = *self
                .bytes
                .get(self.pos)
                .ok_or(CodecError::UnexpectedEnd(self.pos))?;
            self.pos += 1;
            if shift == 28 && byte > 0x0F {
                return Err(CodecError::VarintOverflow(start));
            }
            result |= u32::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 {
                return Ok(result);
            }
            shift += 7;
        }
    }

    /// Read a count, bounded by the bytes left so garbage cannot force huge allocations.
    pub(super) fn read_len(&mut self) -> Result<usize, CodecError> {
        let at = self.pos;
        let len = self.read()? as usize;
        if len > self.bytes.len().saturating_sub(self.pos) {
            return Err(CodecError::UnexpectedEnd(at));
        }
        Ok(len)
    }
}
