//! Collections keyed by structural equality of expressions.
//!
//! Rewrite phases use these to match subtrees that are spelled the same
//! way, e.g. a select-list entry against a GROUP BY entry.

use crate::expression::ParsedExpression;
use alloc::vec::Vec;
use hashbrown::{HashMap, HashSet};

/// Map from expression (by structure) to `V`.
pub type ParsedExpressionMap<V> = HashMap<ParsedExpression, V>;

/// Set of expressions (by structure).
pub type ParsedExpressionSet = HashSet<ParsedExpression>;

/// Removes structurally duplicate expressions, keeping the first
/// occurrence of each in its original position.
pub fn dedup_expressions(expressions: Vec<ParsedExpression>) -> Vec<ParsedExpression> {
    let mut seen = ParsedExpressionSet::with_capacity(expressions.len());
    let mut unique = Vec::with_capacity(expressions.len());
    for expression in expressions {
        if seen.insert(expression.copy()) {
            unique.push(expression);
        }
    }
    unique
}

/// Assigns each distinct expression the position of its first occurrence.
pub fn index_expressions(expressions: &[ParsedExpression]) -> ParsedExpressionMap<usize> {
    let mut index = ParsedExpressionMap::with_capacity(expressions.len());
    for (position, expression) in expressions.iter().enumerate() {
        index.entry(expression.copy()).or_insert(position);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use sqlexpr_core::ExpressionType;

    fn sum(a: &str, b: &str) -> ParsedExpression {
        ParsedExpression::binary(
            ExpressionType::OperatorAdd,
            ParsedExpression::column(a),
            ParsedExpression::column(b),
        )
    }

    #[test]
    fn test_dedup_keeps_first() {
        let exprs = vec![
            sum("a", "b").with_alias("first"),
            sum("b", "a"),
            sum("A", "B").with_alias("second"),
        ];
        let unique = dedup_expressions(exprs);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].alias(), "first");
        assert_eq!(unique[1], sum("b", "a"));
    }

    #[test]
    fn test_index_lookup() {
        let select_list = vec![ParsedExpression::column("x"), sum("a", "b")];
        let index = index_expressions(&select_list);
        assert_eq!(index.get(&sum("a", "b")), Some(&1));
        assert_eq!(index.get(&ParsedExpression::column("X")), Some(&0));
        assert_eq!(index.get(&sum("b", "a")), None);
    }
}
