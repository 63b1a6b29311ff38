//! sqlexpr Parser - parsed SQL expression trees.
//!
//! This crate provides the nodes a SQL parser produces for expressions:
//!
//! - `expression`: the `ParsedExpression` tree and its node shapes
//!   (`OperatorExpression`, `ColumnRefExpression`, `ConstantExpression`)
//! - `expression_map`: hash collections keyed by structural equality
//!
//! Every node renders to SQL text, compares structurally, deep-copies and
//! round-trips through the binary format of `sqlexpr-binary`.
//!
//! # Example
//!
//! ```rust
//! use sqlexpr_binary::{deserialize_from_bytes, serialize_to_bytes};
//! use sqlexpr_core::ExpressionType;
//! use sqlexpr_parser::ParsedExpression;
//!
//! let expr = ParsedExpression::binary(
//!     ExpressionType::OperatorAdd,
//!     ParsedExpression::column("a"),
//!     ParsedExpression::unary(ExpressionType::OperatorNegate, ParsedExpression::column("b")),
//! );
//! assert_eq!(expr.to_string(), "a + -b");
//!
//! let bytes = serialize_to_bytes(&expr).unwrap();
//! let decoded: ParsedExpression = deserialize_from_bytes(&bytes).unwrap();
//! assert_eq!(decoded, expr);
//! ```

#![no_std]

extern crate alloc;

pub mod expression;
pub mod expression_map;

pub use expression::{
    ColumnRefExpression, ConstantExpression, ExpressionBase, OperatorExpression, ParsedExpression,
};
pub use expression_map::{dedup_expressions, index_expressions, ParsedExpressionMap, ParsedExpressionSet};
