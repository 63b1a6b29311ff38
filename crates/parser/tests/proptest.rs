//! Property-based tests for parsed expression trees using proptest.

use proptest::prelude::*;
use sqlexpr_binary::{deserialize_from_bytes, serialize_to_bytes};
use sqlexpr_core::{expression_type_to_operator, expression_type_to_string, ExpressionType, Value};
use sqlexpr_parser::{dedup_expressions, ParsedExpression, ParsedExpressionSet};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use strum::IntoEnumIterator;

fn kind_strategy() -> impl Strategy<Value = ExpressionType> {
    prop::sample::select(ExpressionType::iter().collect::<Vec<_>>())
}

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Boolean),
        any::<i32>().prop_map(Value::Int32),
        any::<i64>().prop_map(Value::Int64),
        (-1.0e9f64..1.0e9f64).prop_map(Value::Float64),
        "[a-z' ]{0,8}".prop_map(Value::String),
        prop::collection::vec(any::<u8>(), 0..6).prop_map(Value::Bytes),
    ]
}

fn leaf_strategy() -> impl Strategy<Value = ParsedExpression> {
    prop_oneof![
        "[a-z][a-z0-9_]{0,5}".prop_map(ParsedExpression::column),
        ("[a-z]{1,4}", "[a-z]{1,4}").prop_map(|(t, c)| ParsedExpression::qualified_column(t, c)),
        value_strategy().prop_map(ParsedExpression::constant),
    ]
}

/// Trees mixing zero, one, two and many operands per operator.
fn tree_strategy() -> impl Strategy<Value = ParsedExpression> {
    leaf_strategy().prop_recursive(4, 48, 4, |inner| {
        (kind_strategy(), prop::collection::vec(inner, 0..5))
            .prop_map(|(kind, children)| ParsedExpression::operator(kind, children))
    })
}

/// Trees at least three levels deep.
fn deep_tree_strategy() -> impl Strategy<Value = ParsedExpression> {
    (kind_strategy(), kind_strategy(), tree_strategy(), tree_strategy(), "[a-z]{0,3}").prop_map(
        |(outer, inner, a, b, alias)| {
            ParsedExpression::binary(outer, ParsedExpression::unary(inner, a), b).with_alias(alias)
        },
    )
}

fn hash_of(expr: &ParsedExpression) -> u64 {
    let mut hasher = DefaultHasher::new();
    expr.hash(&mut hasher);
    hasher.finish()
}

/// Renders a node from its operands' renderings, independently of `Display`.
fn expected_rendering(expr: &ParsedExpression) -> String {
    let children: Vec<String> = expr.children().iter().map(ToString::to_string).collect();
    match expr {
        ParsedExpression::Operator(_) => {
            let kind = expr.expression_type();
            match (expression_type_to_operator(kind), children.as_slice()) {
                (Some(op), [child]) => format!("{}{}", op, child),
                (Some(op), [left, right]) => format!("{} {} {}", left, op, right),
                _ => format!("{}({})", expression_type_to_string(kind), children.join(", ")),
            }
        }
        leaf => leaf.to_string(),
    }
}

fn for_each_node(expr: &ParsedExpression, f: &mut impl FnMut(&ParsedExpression)) {
    f(expr);
    for child in expr.children() {
        for_each_node(child, f);
    }
}

proptest! {
    /// Deserializing a serialized tree yields an equal tree with the same rendering.
    #[test]
    fn serialize_roundtrip(tree in deep_tree_strategy()) {
        let bytes = serialize_to_bytes(&tree).unwrap();
        let decoded: ParsedExpression = deserialize_from_bytes(&bytes).unwrap();
        prop_assert_eq!(&decoded, &tree);
        prop_assert_eq!(decoded.to_string(), tree.to_string());
        prop_assert_eq!(decoded.alias(), tree.alias());
    }

    /// A copy is equal to its source and hashes the same.
    #[test]
    fn copy_equals_and_hashes_alike(tree in deep_tree_strategy()) {
        let copy = tree.copy();
        prop_assert_eq!(&copy, &tree);
        prop_assert_eq!(hash_of(&copy), hash_of(&tree));
    }

    /// Rewriting a copy leaves the source untouched.
    #[test]
    fn copy_is_independent(tree in deep_tree_strategy()) {
        let before = tree.to_string();
        let rewritten = tree.copy().transform(&mut |node: ParsedExpression| match node {
            ParsedExpression::ColumnRef(_) => ParsedExpression::constant(Value::Null),
            other => other,
        });
        prop_assert_eq!(tree.to_string(), before);
        prop_assert_eq!(rewritten.depth(), tree.depth());
    }

    /// Every operator node renders as prefix, infix or call form by arity and symbol.
    #[test]
    fn rendering_follows_arity_and_symbol(tree in deep_tree_strategy()) {
        let mut failures = Vec::new();
        for_each_node(&tree, &mut |node| {
            if node.to_string() != expected_rendering(node) {
                failures.push(node.to_string());
            }
        });
        prop_assert!(failures.is_empty(), "mismatched renderings: {:?}", failures);
    }

    /// Every strict prefix of a serialized tree is rejected.
    #[test]
    fn truncated_streams_are_rejected(tree in deep_tree_strategy(), cut in any::<prop::sample::Index>()) {
        let bytes = serialize_to_bytes(&tree).unwrap();
        let cut = cut.index(bytes.len());
        let err = deserialize_from_bytes::<ParsedExpression>(&bytes[..cut]).unwrap_err();
        prop_assert!(err.is_malformed_stream());
    }

    /// Deduplication keeps exactly one of each structurally distinct tree.
    #[test]
    fn dedup_matches_set_semantics(trees in prop::collection::vec(tree_strategy(), 0..12)) {
        let mut doubled: Vec<ParsedExpression> = trees.iter().map(ParsedExpression::copy).collect();
        doubled.extend(trees.iter().map(ParsedExpression::copy));
        let unique = dedup_expressions(doubled);
        let set: ParsedExpressionSet = trees.into_iter().collect();
        prop_assert_eq!(unique.len(), set.len());
        for expr in &unique {
            prop_assert!(set.contains(expr));
        }
    }
}
