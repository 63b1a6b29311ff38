//! Field-oriented framing on top of the byte writer/reader.
//!
//! A node payload is a block of fields written in a fixed order:
//!
//! ```text
//! +-------------+-------------+----------------------------+
//! | field_count | payload_len | field 0 | field 1 | ...      |
//! | u32         | u32         |                            |
//! +-------------+-------------+----------------------------+
//! ```
//!
//! Readers consume fields in the same order. Asking for a required field
//! past `field_count` fails; optional reads fall back to a default. Fields
//! a reader never asks for are skipped, so newer writers can append fields
//! without breaking older readers.

use crate::reader::{malformed, BinaryReader, Deserializable};
use crate::writer::{BinaryWriter, Serializable};
use alloc::string::String;
use alloc::vec::Vec;
use sqlexpr_core::{Result, Value};

/// Writes the fields of one node payload.
pub struct FieldWriter<'w> {
    parent: &'w mut BinaryWriter,
    buffer: BinaryWriter,
    field_count: u32,
}

impl<'w> FieldWriter<'w> {
    /// Starts a field block that will be appended to `parent` on `finalize`.
    pub fn new(parent: &'w mut BinaryWriter) -> Self {
        Self {
            parent,
            buffer: BinaryWriter::new(),
            field_count: 0,
        }
    }

    #[inline]
    fn add_field(&mut self) -> &mut BinaryWriter {
        self.field_count += 1;
        &mut self.buffer
    }

    pub fn write_value(&mut self, value: &Value) {
        value.serialize(self.add_field());
    }

    pub fn write_string_list<S: AsRef<str>>(&mut self, values: &[S]) {
        let buffer = self.add_field();
        buffer.write_len(values.len());
        for value in values {
            buffer.write_string(value.as_ref());
        }
    }

    /// Writes an ordered list of self-describing elements.
    pub fn write_serializable_list<T: Serializable>(&mut self, values: &[T]) {
        let buffer = self.add_field();
        buffer.write_len(values.len());
        for value in values {
            value.serialize(buffer);
        }
    }

    /// Appends the field block to the parent writer. An oversized length
    /// inside the block is carried over to the parent.
    pub fn finalize(self) {
        if let Some(len) = self.buffer.overflow() {
            self.parent.record_overflow(len);
        }
        self.parent.write_u32(self.field_count);
        self.parent.write_len(self.buffer.len());
        self.parent.write_raw(self.buffer.as_bytes());
    }
}

/// Reads the fields of one node payload.
pub struct FieldReader<'r> {
    source: BinaryReader<'r>,
    field_count: u32,
    fields_read: u32,
}

impl<'r> FieldReader<'r> {
    /// Reads a field block header from `parent` and claims its payload.
    pub fn new(parent: &mut BinaryReader<'r>) -> Result<Self> {
        let field_count = parent.read_u32()?;
        let payload_len = parent.read_u32()? as usize;
        let payload = parent.take(payload_len)?;
        Ok(Self {
            source: parent.nested(payload),
            field_count,
            fields_read: 0,
        })
    }

    fn next_required(&mut self, what: &str) -> Result<&mut BinaryReader<'r>> {
        if self.fields_read >= self.field_count {
            return Err(malformed(alloc::format!(
                "attempted to read required field {} ({}), but only {} fields are present",
                self.fields_read,
                what,
                self.field_count
            )));
        }
        self.fields_read += 1;
        Ok(&mut self.source)
    }

    fn next_optional(&mut self) -> Option<&mut BinaryReader<'r>> {
        if self.fields_read >= self.field_count {
            return None;
        }
        self.fields_read += 1;
        Some(&mut self.source)
    }

    pub fn read_required_value(&mut self) -> Result<Value> {
        Value::deserialize(self.next_required("value")?)
    }

    pub fn read_required_string_list(&mut self) -> Result<Vec<String>> {
        self.next_required("string list")?.read_list()
    }

    /// Reads a list that must be present; a missing or truncated list fails.
    pub fn read_required_serializable_list<T: Deserializable>(&mut self) -> Result<Vec<T>> {
        self.next_required("serializable list")?.read_list()
    }

    /// Reads a list, yielding an empty one if the writer did not include it.
    pub fn read_optional_serializable_list<T: Deserializable>(&mut self) -> Result<Vec<T>> {
        match self.next_optional() {
            Some(source) => source.read_list(),
            None => Ok(Vec::new()),
        }
    }

    /// Closes the block. Unread trailing fields are skipped; leftover bytes
    /// after every declared field was read mean the block is corrupt.
    pub fn finalize(self) -> Result<()> {
        if self.fields_read < self.field_count {
            tracing::trace!(
                skipped = self.field_count - self.fields_read,
                "skipping unread fields"
            );
            return Ok(());
        }
        if !self.source.is_exhausted() {
            return Err(malformed(alloc::format!(
                "field block has {} trailing bytes",
                self.source.remaining()
            )));
        }
        Ok(())
    }
}
