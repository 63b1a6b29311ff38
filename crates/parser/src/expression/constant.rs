//! Constant (literal) expressions.

use super::ExpressionBase;
use core::fmt;
use sqlexpr_binary::{malformed, FieldReader, FieldWriter};
use sqlexpr_core::{ExpressionType, Result, Value};

/// A literal value such as `42`, `'abc'` or `NULL`.
#[derive(Clone, Debug)]
pub struct ConstantExpression {
    pub(crate) base: ExpressionBase,
    value: Value,
}

impl ConstantExpression {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            base: ExpressionBase::new(),
            value: value.into(),
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn base(&self) -> &ExpressionBase {
        &self.base
    }

    pub fn equals(&self, other: &ConstantExpression) -> bool {
        self.value == other.value
    }

    pub fn serialize(&self, writer: &mut FieldWriter<'_>) {
        writer.write_value(&self.value);
    }

    pub fn deserialize(expression_type: ExpressionType, reader: &mut FieldReader<'_>) -> Result<Self> {
        if expression_type != ExpressionType::ValueConstant {
            return Err(malformed(alloc::format!(
                "constant cannot carry kind {:?}",
                expression_type
            )));
        }
        Ok(Self::new(reader.read_required_value()?))
    }
}

impl fmt::Display for ConstantExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}
