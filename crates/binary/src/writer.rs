//! Byte-level writer.

use alloc::vec::Vec;
use sqlexpr_core::{Error, Result};

/// Anything that can write itself into a `BinaryWriter`.
///
/// Implementors own their framing: a node writes its own tags before its
/// payload so a list of heterogeneous nodes can be read back in order.
pub trait Serializable {
    fn serialize(&self, writer: &mut BinaryWriter);
}

/// Append-only little-endian byte buffer.
///
/// Writes never fail. A length that does not fit its `u32` prefix is
/// remembered and reported by [`BinaryWriter::finish`].
#[derive(Debug, Default, Clone)]
pub struct BinaryWriter {
    buffer: Vec<u8>,
    overflow: Option<usize>,
}

impl BinaryWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    #[inline]
    pub fn write_bool(&mut self, value: bool) {
        self.buffer.push(if value { 1 } else { 0 });
    }

    #[inline]
    pub fn write_u32(&mut self, value: u32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    #[inline]
    pub fn write_i32(&mut self, value: i32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    #[inline]
    pub fn write_i64(&mut self, value: i64) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    #[inline]
    pub fn write_f64(&mut self, value: f64) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a `u32` length prefix (list counts, field block sizes).
    pub fn write_len(&mut self, len: usize) {
        match u32::try_from(len) {
            Ok(len) => self.write_u32(len),
            Err(_) => {
                self.record_overflow(len);
                self.write_u32(u32::MAX);
            }
        }
    }

    pub(crate) fn record_overflow(&mut self, len: usize) {
        self.overflow.get_or_insert(len);
    }

    pub(crate) fn overflow(&self) -> Option<usize> {
        self.overflow
    }

    /// Writes a LEB128 varint.
    pub fn write_varint(&mut self, value: u64) {
        let mut v = value;
        loop {
            let mut byte = (v & 0x7F) as u8;
            v >>= 7;
            if v != 0 {
                byte |= 0x80;
            }
            self.buffer.push(byte);
            if v == 0 {
                break;
            }
        }
    }

    /// Writes raw bytes with no length prefix.
    #[inline]
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Writes a varint length followed by the bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.write_varint(bytes.len() as u64);
        self.write_raw(bytes);
    }

    /// Writes a varint length followed by the UTF-8 bytes.
    pub fn write_string(&mut self, value: &str) {
        self.write_bytes(value.as_bytes());
    }

    /// Writes a presence flag, then the value if present.
    pub fn write_optional_u32(&mut self, value: Option<u32>) {
        match value {
            Some(v) => {
                self.write_bool(true);
                self.write_u32(v);
            }
            None => self.write_bool(false),
        }
    }

    /// Returns the number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Consumes the writer and returns the buffer, or `LengthOverflow` if a
    /// length prefix could not hold its value.
    pub fn finish(self) -> Result<Vec<u8>> {
        match self.overflow {
            Some(len) => Err(Error::length_overflow(len)),
            None => Ok(self.buffer),
        }
    }
}
