//! Byte-level reader.
//!
//! Every read is bounds-checked; running off the end of the input is a
//! malformed stream, never a panic or a silent default.

use crate::options::ReaderOptions;
use alloc::string::String;
use alloc::vec::Vec;
use sqlexpr_core::{Error, Result};

/// Anything that can read itself back from a `BinaryReader`.
pub trait Deserializable: Sized {
    fn deserialize(reader: &mut BinaryReader<'_>) -> Result<Self>;
}

/// Builds a `MalformedStream` error and records it at debug level.
pub fn malformed(message: impl Into<String>) -> Error {
    let err = Error::malformed_stream(message);
    tracing::debug!(error = %err, "rejecting expression stream");
    err
}

/// Cursor over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    pos: usize,
    depth: usize,
    options: ReaderOptions,
}

impl<'a> BinaryReader<'a> {
    /// Creates a reader with default options.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_options(data, ReaderOptions::default())
    }

    /// Creates a reader with the given options.
    pub fn with_options(data: &'a [u8], options: ReaderOptions) -> Self {
        Self {
            data,
            pos: 0,
            depth: 0,
            options,
        }
    }

    /// Creates a reader over `data` that continues this reader's nesting state.
    pub(crate) fn nested(&self, data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            depth: self.depth,
            options: self.options,
        }
    }

    /// Returns the current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Marks the start of a nested node. Fails once the configured depth is exceeded.
    pub fn enter_nested(&mut self) -> Result<()> {
        if self.depth >= self.options.max_depth {
            tracing::debug!(limit = self.options.max_depth, "expression nesting limit hit");
            return Err(Error::nesting_too_deep(self.options.max_depth));
        }
        self.depth += 1;
        Ok(())
    }

    /// Marks the end of a nested node started with `enter_nested`.
    pub fn exit_nested(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Number of unread bytes.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true once every byte has been consumed.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.pos == self.data.len()
    }

    /// Takes the next `len` bytes.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(malformed(alloc::format!(
                "needed {} bytes at offset {}, only {} remain",
                len,
                self.pos,
                self.remaining()
            )));
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take_array::<1>()?[0])
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(malformed(alloc::format!("invalid boolean byte {}", other))),
        }
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.take_array()?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.take_array()?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_le_bytes(self.take_array()?))
    }

    /// Reads a LEB128 varint, rejecting truncated or overlong encodings.
    pub fn read_varint(&mut self) -> Result<u64> {
        let mut result = 0u64;
        let mut shift = 0u32;
        loop {
            let byte = self.read_u8()?;
            if shift == 63 && byte > 1 {
                return Err(malformed("varint overflows 64 bits"));
            }
            result |= ((byte & 0x7F) as u64) << shift;
            if byte & 0x80 == 0 {
                return Ok(result);
            }
            shift += 7;
            if shift > 63 {
                return Err(malformed("varint overflows 64 bits"));
            }
        }
    }

    /// Reads a varint length and returns that many bytes.
    pub fn read_bytes(&mut self) -> Result<&'a [u8]> {
        let len = self.read_varint()?;
        let len = usize::try_from(len).map_err(|_| malformed("byte length does not fit in memory"))?;
        self.take(len)
    }

    /// Reads a varint-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> Result<String> {
        let bytes = self.read_bytes()?;
        core::str::from_utf8(bytes)
            .map(String::from)
            .map_err(|_| malformed("string is not valid UTF-8"))
    }

    /// Reads a presence flag, then the value if present.
    pub fn read_optional_u32(&mut self) -> Result<Option<u32>> {
        if self.read_bool()? {
            Ok(Some(self.read_u32()?))
        } else {
            Ok(None)
        }
    }

    /// Reads a `u32` element count followed by that many elements.
    ///
    /// A count larger than the remaining input is rejected before anything
    /// is allocated; every element occupies at least one byte.
    pub fn read_list<T: Deserializable>(&mut self) -> Result<Vec<T>> {
        let count = self.read_u32()? as usize;
        if count > self.remaining() {
            return Err(malformed(alloc::format!(
                "list declares {} elements but only {} bytes remain",
                count,
                self.remaining()
            )));
        }
        let mut items = Vec::with_capacity(count);
        for index in 0..count {
            let item = T::deserialize(self).map_err(|err| match err {
                Error::MalformedStream { message } => Error::malformed_stream(alloc::format!(
                    "list element {} of {}: {}",
                    index, count, message
                )),
                other => other,
            })?;
            items.push(item);
        }
        Ok(items)
    }
}

impl Deserializable for String {
    fn deserialize(reader: &mut BinaryReader<'_>) -> Result<Self> {
        reader.read_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::BinaryWriter;

    #[test]
    fn test_primitive_roundtrip() {
        let mut writer = BinaryWriter::new();
        writer.write_u8(7);
        writer.write_bool(true);
        writer.write_i64(-42);
        writer.write_f64(1.5);
        writer.write_string("name");
        writer.write_optional_u32(Some(9));
        let bytes = writer.finish().unwrap();

        let mut reader = BinaryReader::new(&bytes);
        assert_eq!(reader.read_u8().unwrap(), 7);
        assert!(reader.read_bool().unwrap());
        assert_eq!(reader.read_i64().unwrap(), -42);
        assert_eq!(reader.read_f64().unwrap(), 1.5);
        assert_eq!(reader.read_string().unwrap(), "name");
        assert_eq!(reader.read_optional_u32().unwrap(), Some(9));
        assert!(reader.is_exhausted());
    }

    #[test]
    fn test_truncated_read_fails() {
        let mut reader = BinaryReader::new(&[1, 2]);
        let err = reader.read_u32().unwrap_err();
        assert!(err.is_malformed_stream());
    }

    #[test]
    fn test_truncated_varint_fails() {
        let mut reader = BinaryReader::new(&[0x80, 0x80]);
        assert!(reader.read_varint().unwrap_err().is_malformed_stream());
    }

    #[test]
    fn test_overlong_varint_fails() {
        let bytes = [0xFFu8; 11];
        let mut reader = BinaryReader::new(&bytes);
        assert!(reader.read_varint().unwrap_err().is_malformed_stream());
    }

    #[test]
    fn test_invalid_utf8_fails() {
        let mut reader = BinaryReader::new(&[2, 0xC3, 0x28]);
        assert!(reader.read_string().unwrap_err().is_malformed_stream());
    }

    #[test]
    fn test_invalid_bool_fails() {
        let mut reader = BinaryReader::new(&[2]);
        assert!(reader.read_bool().unwrap_err().is_malformed_stream());
    }

    #[test]
    fn test_list_count_beyond_input_fails() {
        let mut writer = BinaryWriter::new();
        writer.write_u32(1000);
        writer.write_string("only one");
        let bytes = writer.finish().unwrap();

        let mut reader = BinaryReader::new(&bytes);
        let err = reader.read_list::<String>().unwrap_err();
        assert!(err.is_malformed_stream());
    }

    #[test]
    fn test_list_truncated_mid_element_fails() {
        let mut writer = BinaryWriter::new();
        writer.write_u32(2);
        writer.write_string("a");
        writer.write_varint(5);
        writer.write_raw(b"ab");
        let bytes = writer.finish().unwrap();

        let mut reader = BinaryReader::new(&bytes);
        match reader.read_list::<String>().unwrap_err() {
            Error::MalformedStream { message } => assert!(message.contains("element 1 of 2")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_depth_guard() {
        let mut reader = BinaryReader::with_options(&[], ReaderOptions::new().with_max_depth(2));
        reader.enter_nested().unwrap();
        reader.enter_nested().unwrap();
        assert_eq!(reader.enter_nested().unwrap_err(), Error::nesting_too_deep(2));
        reader.exit_nested();
        assert_eq!(reader.depth(), 1);
        reader.enter_nested().unwrap();
    }
}
