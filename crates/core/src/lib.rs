//! sqlexpr Core - shared vocabulary for parsed SQL expressions.
//!
//! This crate provides the foundational types every expression crate agrees on:
//!
//! - `ExpressionType`: the operation an expression performs (add, negate, AND, CASE, ...)
//! - `ExpressionClass`: the shape of the node that carries it (column ref, constant, operator)
//! - `expression_type_to_operator` / `expression_type_to_string`: symbol table and display names
//! - `Value` / `DataType`: literal values and their types
//! - `Error`: errors raised while encoding or decoding serialized trees
//!
//! # Example
//!
//! ```rust
//! use sqlexpr_core::{expression_type_to_operator, expression_type_to_string, ExpressionType};
//!
//! assert_eq!(expression_type_to_operator(ExpressionType::OperatorAdd), Some("+"));
//! assert_eq!(expression_type_to_operator(ExpressionType::CaseExpr), None);
//! assert_eq!(expression_type_to_string(ExpressionType::CaseExpr), "CASE_EXPR");
//! ```

#![no_std]

extern crate alloc;

mod error;
mod expression_type;
mod types;
mod value;

pub use error::{Error, Result};
pub use expression_type::{
    expression_type_to_operator, expression_type_to_string, ExpressionClass, ExpressionType,
};
pub use types::DataType;
pub use value::Value;
