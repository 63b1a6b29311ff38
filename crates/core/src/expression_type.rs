//! Operation kinds and variant classes of parsed expressions.
//!
//! `ExpressionType` names what an expression does (add, compare, negate, ...).
//! `ExpressionClass` names the shape of the node that carries it. Both are
//! written to the binary format as a single byte, so the discriminants below
//! are part of the on-disk contract and must never be renumbered.

use strum::{EnumIter, FromRepr, IntoStaticStr};

/// The operation an expression node performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, FromRepr, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum ExpressionType {
    Invalid = 0,

    // Operators
    OperatorNegate = 1,
    OperatorAdd = 2,
    OperatorSubtract = 3,
    OperatorMultiply = 4,
    OperatorDivide = 5,
    OperatorModulo = 6,
    OperatorConcat = 7,
    OperatorNot = 8,
    OperatorIsNull = 9,
    OperatorIsNotNull = 10,
    OperatorCast = 11,
    OperatorCoalesce = 12,
    OperatorNullif = 13,
    CompareIn = 14,
    CompareNotIn = 15,

    // Comparisons
    CompareEqual = 20,
    CompareNotEqual = 21,
    CompareLessThan = 22,
    CompareGreaterThan = 23,
    CompareLessThanOrEqualTo = 24,
    CompareGreaterThanOrEqualTo = 25,
    CompareLike = 26,
    CompareNotLike = 27,
    CompareBetween = 28,
    CompareNotBetween = 29,
    CompareDistinctFrom = 30,
    CompareNotDistinctFrom = 31,

    // Conjunctions
    ConjunctionAnd = 40,
    ConjunctionOr = 41,

    // Values
    ValueConstant = 50,
    ValueParameter = 51,
    ValueNull = 52,
    ValueDefault = 53,

    // Everything else
    ColumnRef = 60,
    CaseExpr = 61,
    Function = 62,
    Star = 63,
    ArrayExtract = 64,
    Subquery = 65,
}

impl ExpressionType {
    /// Decodes a kind from its one-byte tag.
    pub fn from_u8(tag: u8) -> Option<Self> {
        Self::from_repr(tag)
    }

    /// Returns the one-byte tag of this kind.
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Returns the operator symbol for `expression_type`, if it has one.
///
/// Kinds without a symbol render as a function call of their canonical name.
pub fn expression_type_to_operator(expression_type: ExpressionType) -> Option<&'static str> {
    let symbol = match expression_type {
        ExpressionType::OperatorNegate => "-",
        ExpressionType::OperatorAdd => "+",
        ExpressionType::OperatorSubtract => "-",
        ExpressionType::OperatorMultiply => "*",
        ExpressionType::OperatorDivide => "/",
        ExpressionType::OperatorModulo => "%",
        ExpressionType::OperatorConcat => "||",
        ExpressionType::CompareEqual => "=",
        ExpressionType::CompareNotEqual => "!=",
        ExpressionType::CompareLessThan => "<",
        ExpressionType::CompareGreaterThan => ">",
        ExpressionType::CompareLessThanOrEqualTo => "<=",
        ExpressionType::CompareGreaterThanOrEqualTo => ">=",
        ExpressionType::CompareLike => "LIKE",
        ExpressionType::CompareNotLike => "NOT LIKE",
        ExpressionType::ConjunctionAnd => "AND",
        ExpressionType::ConjunctionOr => "OR",
        _ => return None,
    };
    Some(symbol)
}

/// Returns the canonical display name of `expression_type`, e.g. `CASE_EXPR`.
pub fn expression_type_to_string(expression_type: ExpressionType) -> &'static str {
    expression_type.into()
}

/// The shape of a parsed expression node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, FromRepr, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum ExpressionClass {
    ColumnRef = 1,
    Constant = 2,
    Operator = 3,
}

impl ExpressionClass {
    /// Decodes a class from its one-byte tag.
    pub fn from_u8(tag: u8) -> Option<Self> {
        Self::from_repr(tag)
    }

    /// Returns the one-byte tag of this class.
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns the canonical display name of this class.
    pub fn name(self) -> &'static str {
        self.into()
    }
}
