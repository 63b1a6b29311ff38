//! Binary encoding of constant values.
//!
//! Each value is encoded as `[type_tag: u8] [data...]`:
//! - 0x00: null
//! - 0x01: boolean (1 byte)
//! - 0x02: int32 (4 bytes LE)
//! - 0x03: int64 (8 bytes LE)
//! - 0x04: float64 (8 bytes LE)
//! - 0x05: string (varint length + UTF-8 bytes)
//! - 0x06: bytes (varint length + bytes)

use crate::reader::{malformed, BinaryReader, Deserializable};
use crate::writer::{BinaryWriter, Serializable};
use sqlexpr_core::{Result, Value};

const TAG_NULL: u8 = 0x00;
const TAG_BOOLEAN: u8 = 0x01;
const TAG_INT32: u8 = 0x02;
const TAG_INT64: u8 = 0x03;
const TAG_FLOAT64: u8 = 0x04;
const TAG_STRING: u8 = 0x05;
const TAG_BYTES: u8 = 0x06;

impl Serializable for Value {
    fn serialize(&self, writer: &mut BinaryWriter) {
        match self {
            Value::Null => writer.write_u8(TAG_NULL),
            Value::Boolean(b) => {
                writer.write_u8(TAG_BOOLEAN);
                writer.write_bool(*b);
            }
            Value::Int32(i) => {
                writer.write_u8(TAG_INT32);
                writer.write_i32(*i);
            }
            Value::Int64(i) => {
                writer.write_u8(TAG_INT64);
                writer.write_i64(*i);
            }
            Value::Float64(f) => {
                writer.write_u8(TAG_FLOAT64);
                writer.write_f64(*f);
            }
            Value::String(s) => {
                writer.write_u8(TAG_STRING);
                writer.write_string(s);
            }
            Value::Bytes(b) => {
                writer.write_u8(TAG_BYTES);
                writer.write_bytes(b);
            }
        }
    }
}

impl Deserializable for Value {
    fn deserialize(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let value = match reader.read_u8()? {
            TAG_NULL => Value::Null,
            TAG_BOOLEAN => Value::Boolean(reader.read_bool()?),
            TAG_INT32 => Value::Int32(reader.read_i32()?),
            TAG_INT64 => Value::Int64(reader.read_i64()?),
            TAG_FLOAT64 => Value::Float64(reader.read_f64()?),
            TAG_STRING => Value::String(reader.read_string()?),
            TAG_BYTES => Value::Bytes(reader.read_bytes()?.to_vec()),
            other => return Err(malformed(alloc::format!("unknown value tag {:#04x}", other))),
        };
        Ok(value)
    }
}
