//! Binary codec for expression trees.
//!
//! Provides the byte-level writer/reader and the field framing every node
//! payload uses. Nodes implement [`Serializable`] / [`Deserializable`]; a
//! node writes its own tags and then a field block:
//!
//! ```text
//! Node:
//! +-------+------+-------+----------------+-------------------------+
//! | class | type | alias | query_location | field block             |
//! | u8    | u8   | str   | opt<u32>       | count|len|fields...     |
//! +-------+------+-------+----------------+-------------------------+
//!
//! List field:   [count: u32] [element 0] [element 1] ...
//! String:       [len: varint] [UTF-8 bytes]
//! ```
//!
//! All integers are little-endian. Decoding never panics on bad input; it
//! returns `Error::MalformedStream`.

#![no_std]

extern crate alloc;

mod field;
mod options;
mod reader;
mod value;
mod writer;

pub use field::{FieldReader, FieldWriter};
pub use options::{ReaderOptions, DEFAULT_MAX_DEPTH};
pub use reader::{malformed, BinaryReader, Deserializable};
pub use writer::{BinaryWriter, Serializable};

use alloc::vec::Vec;
use sqlexpr_core::Result;

/// Serializes `value` into a fresh buffer.
///
/// Fails with `Error::LengthOverflow` if a list or field block is too long
/// for its `u32` length prefix.
pub fn serialize_to_bytes<T: Serializable + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut writer = BinaryWriter::new();
    value.serialize(&mut writer);
    writer.finish()
}

/// Deserializes a single `T` that must span all of `bytes`.
pub fn deserialize_from_bytes<T: Deserializable>(bytes: &[u8]) -> Result<T> {
    deserialize_with_options(bytes, ReaderOptions::default())
}

/// Like [`deserialize_from_bytes`] with explicit reader limits.
pub fn deserialize_with_options<T: Deserializable>(bytes: &[u8], options: ReaderOptions) -> Result<T> {
    let mut reader = BinaryReader::with_options(bytes, options);
    let value = T::deserialize(&mut reader)?;
    if !reader.is_exhausted() {
        return Err(malformed(alloc::format!(
            "{} trailing bytes after the encoded value",
            reader.remaining()
        )));
    }
    Ok(value)
}
