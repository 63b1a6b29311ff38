//! Error types for sqlexpr.

use alloc::string::String;

/// Result type alias for sqlexpr operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised while encoding or decoding expression trees.
///
/// Rendering, comparing and copying expressions are total.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The byte stream does not describe a well-formed expression tree:
    /// a required field is missing, a list is truncated, a tag is unknown
    /// or a nested node failed to decode.
    #[error("malformed stream: {message}")]
    MalformedStream { message: String },
    /// The stream nests expressions deeper than the reader allows.
    #[error("expression nesting exceeds the configured limit of {limit}")]
    NestingTooDeep { limit: usize },
    /// A list or field block is longer than its `u32` length prefix can state.
    #[error("length {len} does not fit in a u32 prefix")]
    LengthOverflow { len: usize },
}

impl Error {
    /// Creates a malformed stream error.
    pub fn malformed_stream(message: impl Into<String>) -> Self {
        Error::MalformedStream {
            message: message.into(),
        }
    }

    /// Creates a nesting limit error.
    pub fn nesting_too_deep(limit: usize) -> Self {
        Error::NestingTooDeep { limit }
    }

    /// Creates a length prefix overflow error.
    pub fn length_overflow(len: usize) -> Self {
        Error::LengthOverflow { len }
    }

    /// Returns true if this error reports a malformed stream.
    pub fn is_malformed_stream(&self) -> bool {
        matches!(self, Error::MalformedStream { .. })
    }
}
