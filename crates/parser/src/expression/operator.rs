//! Operator expressions: prefix, infix and n-ary operations.
//!
//! An `OperatorExpression` is an operation kind plus its ordered operands.
//! It renders with the kind's operator symbol when the arity allows it
//! (`-x`, `a + b`) and as a function call of the kind's canonical name
//! otherwise (`CASE_EXPR(a, b, c)`).

use super::{ExpressionBase, ParsedExpression};
use alloc::vec::Vec;
use core::fmt;
use sqlexpr_binary::{FieldReader, FieldWriter};
use sqlexpr_core::{expression_type_to_operator, expression_type_to_string, ExpressionType, Result};

/// An operation applied to zero or more operand expressions.
#[derive(Debug)]
pub struct OperatorExpression {
    pub(crate) base: ExpressionBase,
    expression_type: ExpressionType,
    children: Vec<ParsedExpression>,
}

impl OperatorExpression {
    /// Builds a node from an optional left and right operand.
    ///
    /// Present operands are kept in order and absent ones are skipped, so the
    /// arity is the number of operands supplied. A node built from only a
    /// right operand has the same shape as one built from only a left operand.
    pub fn new(
        expression_type: ExpressionType,
        left: Option<ParsedExpression>,
        right: Option<ParsedExpression>,
    ) -> Self {
        let children = left.into_iter().chain(right).collect();
        Self::with_children(expression_type, children)
    }

    /// Builds a node with an arbitrary number of operands.
    pub fn with_children(expression_type: ExpressionType, children: Vec<ParsedExpression>) -> Self {
        Self {
            base: ExpressionBase::new(),
            expression_type,
            children,
        }
    }

    pub fn expression_type(&self) -> ExpressionType {
        self.expression_type
    }

    pub fn children(&self) -> &[ParsedExpression] {
        &self.children
    }

    pub fn arity(&self) -> usize {
        self.children.len()
    }

    pub fn base(&self) -> &ExpressionBase {
        &self.base
    }

    /// Consumes the node and returns its operands.
    pub fn into_children(self) -> Vec<ParsedExpression> {
        self.children
    }

    /// Rebuilds the node with every operand passed through `f`, keeping the
    /// kind and shared properties.
    pub fn map_children<F>(self, f: F) -> Self
    where
        F: FnMut(ParsedExpression) -> ParsedExpression,
    {
        Self {
            base: self.base,
            expression_type: self.expression_type,
            children: self.children.into_iter().map(f).collect(),
        }
    }

    /// Compares operands position by position.
    ///
    /// The operation kind is not compared; `ParsedExpression::equals` checks
    /// class and kind before delegating here.
    pub fn equals(&self, other: &OperatorExpression) -> bool {
        self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| a.equals(b))
    }

    /// Writes the operand list. Class, kind and shared properties are written
    /// by `ParsedExpression`.
    pub fn serialize(&self, writer: &mut FieldWriter<'_>) {
        writer.write_serializable_list(&self.children);
    }

    /// Reads the operand list of a node whose kind was already decoded.
    pub fn deserialize(expression_type: ExpressionType, reader: &mut FieldReader<'_>) -> Result<Self> {
        let children = reader.read_required_serializable_list::<ParsedExpression>()?;
        Ok(Self::with_children(expression_type, children))
    }
}

impl Clone for OperatorExpression {
    fn clone(&self) -> Self {
        let mut copy = Self::with_children(self.expression_type, Vec::with_capacity(self.children.len()));
        copy.base.copy_properties(&self.base);
        for child in &self.children {
            copy.children.push(child.copy());
        }
        copy
    }
}

impl fmt::Display for OperatorExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(op) = expression_type_to_operator(self.expression_type) {
            match self.children.as_slice() {
                [child] => return write!(f, "{}{}", op, child),
                [left, right] => return write!(f, "{} {} {}", left, op, right),
                _ => {}
            }
        }
        write!(f, "{}(", expression_type_to_string(self.expression_type))?;
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", child)?;
        }
        f.write_str(")")
    }
}
