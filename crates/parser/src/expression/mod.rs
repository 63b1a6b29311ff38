//! Parsed expression tree.
//!
//! Every node is a `ParsedExpression`, a tagged union over the node shapes
//! (`ExpressionClass`). Each shape supports the same capability set:
//! rendering (`Display`), structural equality, deep copy and binary
//! serialization. The union dispatches to the shape and owns the parts
//! common to all of them: the class/kind tags and the shared properties.

mod base;
mod column_ref;
mod constant;
mod operator;

pub use base::ExpressionBase;
pub use column_ref::ColumnRefExpression;
pub use constant::ConstantExpression;
pub use operator::OperatorExpression;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};
use sqlexpr_binary::{
    malformed, BinaryReader, BinaryWriter, Deserializable, FieldReader, FieldWriter, Serializable,
};
use sqlexpr_core::{expression_type_to_string, ExpressionClass, ExpressionType, Result, Value};

/// A node of a parsed SQL expression tree.
///
/// Children are owned exclusively by their parent; the structure is a tree.
/// Trees are not edited in place: a pass that needs a different tree builds
/// one with [`ParsedExpression::transform`] or from a [`ParsedExpression::copy`].
#[derive(Clone, Debug)]
pub enum ParsedExpression {
    /// Column reference.
    ColumnRef(ColumnRefExpression),
    /// Literal value.
    Constant(ConstantExpression),
    /// Prefix, infix or n-ary operation.
    Operator(OperatorExpression),
}

impl ParsedExpression {
    /// Creates an unqualified column reference.
    pub fn column(name: impl Into<String>) -> Self {
        ColumnRefExpression::new(name).into()
    }

    /// Creates a `table.column` reference.
    pub fn qualified_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        ColumnRefExpression::qualified(table, column).into()
    }

    /// Creates a literal.
    pub fn constant(value: impl Into<Value>) -> Self {
        ConstantExpression::new(value).into()
    }

    /// Creates a one-operand operator node.
    pub fn unary(expression_type: ExpressionType, child: ParsedExpression) -> Self {
        OperatorExpression::new(expression_type, Some(child), None).into()
    }

    /// Creates a two-operand operator node.
    pub fn binary(expression_type: ExpressionType, left: ParsedExpression, right: ParsedExpression) -> Self {
        OperatorExpression::new(expression_type, Some(left), Some(right)).into()
    }

    /// Creates an operator node with any number of operands.
    pub fn operator(expression_type: ExpressionType, children: Vec<ParsedExpression>) -> Self {
        OperatorExpression::with_children(expression_type, children).into()
    }

    /// Returns the shape of this node.
    pub fn class(&self) -> ExpressionClass {
        match self {
            ParsedExpression::ColumnRef(_) => ExpressionClass::ColumnRef,
            ParsedExpression::Constant(_) => ExpressionClass::Constant,
            ParsedExpression::Operator(_) => ExpressionClass::Operator,
        }
    }

    /// Returns the operation kind of this node.
    pub fn expression_type(&self) -> ExpressionType {
        match self {
            ParsedExpression::ColumnRef(_) => ExpressionType::ColumnRef,
            ParsedExpression::Constant(_) => ExpressionType::ValueConstant,
            ParsedExpression::Operator(op) => op.expression_type(),
        }
    }

    pub fn base(&self) -> &ExpressionBase {
        match self {
            ParsedExpression::ColumnRef(e) => &e.base,
            ParsedExpression::Constant(e) => &e.base,
            ParsedExpression::Operator(e) => &e.base,
        }
    }

    fn base_mut(&mut self) -> &mut ExpressionBase {
        match self {
            ParsedExpression::ColumnRef(e) => &mut e.base,
            ParsedExpression::Constant(e) => &mut e.base,
            ParsedExpression::Operator(e) => &mut e.base,
        }
    }

    pub fn alias(&self) -> &str {
        &self.base().alias
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.base_mut().alias = alias.into();
        self
    }

    pub fn query_location(&self) -> Option<u32> {
        self.base().query_location
    }

    pub fn with_query_location(mut self, query_location: u32) -> Self {
        self.base_mut().query_location = Some(query_location);
        self
    }

    /// Returns the operands of this node; leaves have none.
    pub fn children(&self) -> &[ParsedExpression] {
        match self {
            ParsedExpression::Operator(op) => op.children(),
            ParsedExpression::ColumnRef(_) | ParsedExpression::Constant(_) => &[],
        }
    }

    pub fn for_each_child(&self, mut f: impl FnMut(&ParsedExpression)) {
        for child in self.children() {
            f(child);
        }
    }

    /// Number of nodes on the longest path from this node to a leaf.
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(ParsedExpression::depth).max().unwrap_or(0)
    }

    /// Structural equality: same class, same kind and equal contents.
    /// Alias and query location are not compared.
    pub fn equals(&self, other: &ParsedExpression) -> bool {
        if self.class() != other.class() || self.expression_type() != other.expression_type() {
            return false;
        }
        match (self, other) {
            (ParsedExpression::ColumnRef(a), ParsedExpression::ColumnRef(b)) => a.equals(b),
            (ParsedExpression::Constant(a), ParsedExpression::Constant(b)) => a.equals(b),
            (ParsedExpression::Operator(a), ParsedExpression::Operator(b)) => a.equals(b),
            _ => false,
        }
    }

    /// Returns an independent deep copy of this tree.
    pub fn copy(&self) -> ParsedExpression {
        self.clone()
    }

    /// Rewrites the tree bottom-up: operands are rewritten first, then `f`
    /// receives the rebuilt node. Consumes `self` and returns the new tree.
    pub fn transform<F>(self, f: &mut F) -> ParsedExpression
    where
        F: FnMut(ParsedExpression) -> ParsedExpression,
    {
        let rebuilt = match self {
            ParsedExpression::Operator(op) => {
                ParsedExpression::Operator(op.map_children(|child| child.transform(f)))
            }
            leaf => leaf,
        };
        f(rebuilt)
    }
}

impl PartialEq for ParsedExpression {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for ParsedExpression {}

impl Hash for ParsedExpression {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.class().hash(state);
        self.expression_type().hash(state);
        match self {
            ParsedExpression::ColumnRef(col) => {
                // Must agree with the case-insensitive equality.
                for name in col.column_names() {
                    name.len().hash(state);
                    for byte in name.bytes() {
                        byte.to_ascii_lowercase().hash(state);
                    }
                }
            }
            ParsedExpression::Constant(constant) => constant.value().hash(state),
            ParsedExpression::Operator(op) => {
                op.arity().hash(state);
                for child in op.children() {
                    child.hash(state);
                }
            }
        }
    }
}

impl fmt::Display for ParsedExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedExpression::ColumnRef(e) => fmt::Display::fmt(e, f),
            ParsedExpression::Constant(e) => fmt::Display::fmt(e, f),
            ParsedExpression::Operator(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl From<ColumnRefExpression> for ParsedExpression {
    fn from(expr: ColumnRefExpression) -> Self {
        ParsedExpression::ColumnRef(expr)
    }
}

impl From<ConstantExpression> for ParsedExpression {
    fn from(expr: ConstantExpression) -> Self {
        ParsedExpression::Constant(expr)
    }
}

impl From<OperatorExpression> for ParsedExpression {
    fn from(expr: OperatorExpression) -> Self {
        ParsedExpression::Operator(expr)
    }
}

impl Serializable for ParsedExpression {
    fn serialize(&self, writer: &mut BinaryWriter) {
        let class = self.class();
        let expression_type = self.expression_type();
        tracing::trace!(
            class = class.name(),
            expression_type = expression_type_to_string(expression_type),
            "serializing expression"
        );

        writer.write_u8(class.as_u8());
        writer.write_u8(expression_type.as_u8());
        writer.write_string(&self.base().alias);
        writer.write_optional_u32(self.base().query_location);

        let mut fields = FieldWriter::new(writer);
        match self {
            ParsedExpression::ColumnRef(e) => e.serialize(&mut fields),
            ParsedExpression::Constant(e) => e.serialize(&mut fields),
            ParsedExpression::Operator(e) => e.serialize(&mut fields),
        }
        fields.finalize();
    }
}

impl Deserializable for ParsedExpression {
    fn deserialize(reader: &mut BinaryReader<'_>) -> Result<Self> {
        reader.enter_nested()?;

        let class_tag = reader.read_u8()?;
        let class = ExpressionClass::from_u8(class_tag)
            .ok_or_else(|| malformed(alloc::format!("unknown expression class tag {}", class_tag)))?;
        let type_tag = reader.read_u8()?;
        let expression_type = ExpressionType::from_u8(type_tag)
            .ok_or_else(|| malformed(alloc::format!("unknown expression type tag {}", type_tag)))?;
        let alias = reader.read_string()?;
        let query_location = reader.read_optional_u32()?;

        tracing::trace!(
            class = class.name(),
            expression_type = expression_type_to_string(expression_type),
            depth = reader.depth(),
            "deserializing expression"
        );

        let mut fields = FieldReader::new(reader)?;
        let mut expression: ParsedExpression = match class {
            ExpressionClass::ColumnRef => ColumnRefExpression::deserialize(expression_type, &mut fields)?.into(),
            ExpressionClass::Constant => ConstantExpression::deserialize(expression_type, &mut fields)?.into(),
            ExpressionClass::Operator => OperatorExpression::deserialize(expression_type, &mut fields)?.into(),
        };
        fields.finalize()?;

        let base = expression.base_mut();
        base.alias = alias;
        base.query_location = query_location;

        reader.exit_nested();
        Ok(expression)
    }
}
