//! Property-based tests for tree building
//!
//! These hold for any input:
//! - a split node's children and tokens tile its span exactly
//! - classification is idempotent
//! - lenient builds always succeed; strict builds either type every leaf or
//!   report the leaf they could not type
//! - exclusion ranges are sorted and disjoint

use proptest::prelude::*;
use ruletree::config;
use ruletree::rules::NotInModifier;
use ruletree::{BuildOptions, ClassificationPolicy, SyntaxTree, TreeElement, TreeError};

const LEAF_TYPES: [&str; 3] = ["Integer", "Word", "Empty"];

fn expression_like() -> impl Strategy<Value = String> {
    "[0-9a-z_+*/%() -]{0,24}"
}

fn operand() -> impl Strategy<Value = String> {
    prop_oneof!["[0-9]{1,3}", "[a-z_][a-z0-9_]{0,3}"]
}

fn operand_type(operand: &str) -> &'static str {
    if operand.chars().all(|c| c.is_ascii_digit()) {
        "Integer"
    } else {
        "Word"
    }
}

fn assert_tiles(input: &str, element: &TreeElement) {
    if element.is_leaf() {
        return;
    }
    let tokens = element.value().tokens();
    let children = element.children();
    assert_eq!(children.len(), tokens.len() + 1);
    assert_eq!(children[0].span().start, element.span().start);
    assert_eq!(children[children.len() - 1].span().end, element.span().end);
    for (i, token) in tokens.iter().enumerate() {
        let gap = children[i].span().end..children[i + 1].span().start;
        assert_eq!(&input[gap], *token);
    }
    for child in children {
        assert_tiles(input, child);
    }
}

proptest! {
    #[test]
    fn test_children_and_tokens_tile_parent(input in expression_like()) {
        let tree = SyntaxTree::build(&input, config::arithmetic()).unwrap();
        prop_assert_eq!(tree.root().span(), 0..input.len());
        assert_tiles(&input, tree.root());
    }

    #[test]
    fn test_reclassify_is_idempotent(input in expression_like()) {
        let mut tree = SyntaxTree::build(&input, config::arithmetic()).unwrap();
        let before = tree.root().clone();
        tree.reclassify().unwrap();
        prop_assert_eq!(tree.root(), &before);
    }

    #[test]
    fn test_lenient_build_never_fails(input in "\\PC{0,32}") {
        prop_assert!(SyntaxTree::build(&input, config::arithmetic()).is_ok());
    }

    #[test]
    fn test_strict_build_types_every_leaf_or_fails(input in expression_like()) {
        let options = BuildOptions {
            classification: ClassificationPolicy::Strict,
            ..BuildOptions::default()
        };
        match SyntaxTree::build_with_options(&input, config::arithmetic(), options) {
            Ok(tree) => {
                for leaf in tree.leaves() {
                    prop_assert!(LEAF_TYPES.contains(&leaf.node_type()));
                }
            }
            Err(TreeError::UnclassifiedLeaf { span, .. }) => {
                prop_assert!(span.end <= input.len());
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn test_parenthesised_right_operand(
        left in operand(),
        outer in prop::sample::select(vec!["+", "-", "*"]),
        inner in prop::sample::select(vec!["+", "-", "*", "/"]),
        a in operand(),
        b in operand(),
    ) {
        let input = format!("{} {} ({} {} {})", left, outer, a, inner, b);
        let tree = SyntaxTree::build(&input, config::arithmetic()).unwrap();
        let root = tree.root();

        prop_assert_eq!(root.value().as_text(), Some(outer));
        prop_assert_eq!(root.children()[0].node_type(), operand_type(&left));

        let parens = &root.children()[1];
        prop_assert_eq!(parens.node_type(), "Parenthesis");
        prop_assert_eq!(parens.children().len(), 3);

        let body = &parens.children()[1];
        prop_assert_eq!(body.value().as_text(), Some(inner));
        prop_assert_eq!(body.children()[0].value().as_text(), Some(a.as_str()));
        prop_assert_eq!(body.children()[1].value().as_text(), Some(b.as_str()));
    }

    #[test]
    fn test_exclusions_are_sorted_and_disjoint(input in expression_like()) {
        let modifier = NotInModifier::new(r"\([^)]*\)").unwrap();
        let ranges = modifier.exclusions(&input);
        for range in &ranges {
            prop_assert!(range.start < range.end);
            prop_assert!(input[range.clone()].starts_with('('));
        }
        for pair in ranges.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
    }
}
