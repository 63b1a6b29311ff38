//! Fields shared by every parsed expression node.

use alloc::string::String;

/// Properties every node carries regardless of its shape.
///
/// Neither field takes part in structural equality or hashing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpressionBase {
    /// `AS` alias given in the query, empty if none.
    pub alias: String,
    /// Byte offset of the expression in the query text.
    pub query_location: Option<u32>,
}

impl ExpressionBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the shared properties of `other` into `self`.
    pub fn copy_properties(&mut self, other: &ExpressionBase) {
        self.alias.clone_from(&other.alias);
        self.query_location = other.query_location;
    }
}
