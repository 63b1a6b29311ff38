//! Data type definitions for constant values.

/// Data types a constant in a parsed expression can carry, one per
/// non-null `Value` variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    Boolean,
    Int32,
    Int64,
    Float64,
    String,
    Bytes,
}

impl DataType {
    /// Returns the SQL type name used when a literal needs an explicit cast.
    pub fn sql_name(&self) -> &'static str {
        match self {
            DataType::Boolean => "BOOLEAN",
            DataType::Int32 => "INTEGER",
            DataType::Int64 => "BIGINT",
            DataType::Float64 => "DOUBLE",
            DataType::String => "VARCHAR",
            DataType::Bytes => "BLOB",
        }
    }
}
