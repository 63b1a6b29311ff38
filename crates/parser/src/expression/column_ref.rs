//! Column reference expressions.

use super::ExpressionBase;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use sqlexpr_binary::{malformed, FieldReader, FieldWriter};
use sqlexpr_core::{ExpressionType, Result};

/// A possibly qualified column name such as `c` or `t.c`.
#[derive(Clone, Debug)]
pub struct ColumnRefExpression {
    pub(crate) base: ExpressionBase,
    column_names: Vec<String>,
}

impl ColumnRefExpression {
    /// Creates an unqualified column reference.
    pub fn new(column_name: impl Into<String>) -> Self {
        Self::from_names(vec![column_name.into()])
    }

    /// Creates a `table.column` reference.
    pub fn qualified(table_name: impl Into<String>, column_name: impl Into<String>) -> Self {
        Self::from_names(vec![table_name.into(), column_name.into()])
    }

    /// Creates a reference from its dotted name parts, outermost first.
    pub fn from_names(column_names: Vec<String>) -> Self {
        Self {
            base: ExpressionBase::new(),
            column_names,
        }
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Returns the last name part.
    pub fn column_name(&self) -> &str {
        self.column_names.last().map(String::as_str).unwrap_or("")
    }

    pub fn base(&self) -> &ExpressionBase {
        &self.base
    }

    /// Identifiers compare case-insensitively.
    pub fn equals(&self, other: &ColumnRefExpression) -> bool {
        self.column_names.len() == other.column_names.len()
            && self
                .column_names
                .iter()
                .zip(&other.column_names)
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }

    pub fn serialize(&self, writer: &mut FieldWriter<'_>) {
        writer.write_string_list(&self.column_names);
    }

    pub fn deserialize(expression_type: ExpressionType, reader: &mut FieldReader<'_>) -> Result<Self> {
        if expression_type != ExpressionType::ColumnRef {
            return Err(malformed(alloc::format!(
                "column reference cannot carry kind {:?}",
                expression_type
            )));
        }
        let column_names = reader.read_required_string_list()?;
        if column_names.is_empty() {
            return Err(malformed("column reference without a name"));
        }
        Ok(Self::from_names(column_names))
    }
}

impl fmt::Display for ColumnRefExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.column_names.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_names() {
        let col = ColumnRefExpression::qualified("users", "id");
        assert_eq!(col.column_name(), "id");
        assert_eq!(col.column_names().len(), 2);
        assert_eq!(col.to_string(), "users.id");

        let bare = ColumnRefExpression::new("id");
        assert_eq!(bare.to_string(), "id");
    }

    #[test]
    fn test_case_insensitive_equality() {
        let a = ColumnRefExpression::qualified("Users", "ID");
        let b = ColumnRefExpression::qualified("users", "id");
        assert!(a.equals(&b));
        assert!(!a.equals(&ColumnRefExpression::new("id")));
    }
}
