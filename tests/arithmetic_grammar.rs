//! Integration tests for the built-in arithmetic grammar
//!
//! Trees are checked through their in-order reading (leaf, operator, leaf, ...)
//! and, where the exact shape matters, through treeviz snapshots.

use rstest::rstest;
use ruletree::config::{self, GrammarConfig};
use ruletree::formats::{to_treeviz_str, FormatRegistry};
use ruletree::rules::{NotInModifier, RegexNodeRule, RuleError};
use ruletree::{BuildOptions, ClassificationPolicy, NodeValue, SyntaxTree, TreeElement, TreeError};

fn build(expression: &str) -> SyntaxTree {
    SyntaxTree::build(expression, config::arithmetic()).unwrap()
}

fn build_strict(expression: &str) -> Result<SyntaxTree, TreeError> {
    let options = BuildOptions {
        classification: ClassificationPolicy::Strict,
        ..config::arithmetic().options()
    };
    SyntaxTree::build_with_options(expression, config::arithmetic(), options)
}

/// Leaves and tokens in reading order, as (type, text) pairs.
fn in_order(element: &TreeElement) -> Vec<(String, String)> {
    let mut out = Vec::new();
    collect_in_order(element, &mut out);
    out
}

fn collect_in_order(element: &TreeElement, out: &mut Vec<(String, String)>) {
    if element.is_leaf() {
        let text = element.value().as_text().unwrap_or_default();
        out.push((element.node_type().to_string(), text.to_string()));
        return;
    }
    let tokens = element.value().tokens();
    for (i, child) in element.children().iter().enumerate() {
        collect_in_order(child, out);
        if let Some(token) = tokens.get(i) {
            out.push((element.node_type().to_string(), token.to_string()));
        }
    }
}

fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(t, v)| (t.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_flat_sum_with_product() {
    let tree = build("2 + 4 + 2*7 + 12 - 5");

    assert_eq!(
        in_order(tree.root()),
        pairs(&[
            ("Integer", "2"),
            ("Operator", "+"),
            ("Integer", "4"),
            ("Operator", "+"),
            ("Integer", "2"),
            ("Operator", "*"),
            ("Integer", "7"),
            ("Operator", "+"),
            ("Integer", "12"),
            ("Operator", "-"),
            ("Integer", "5"),
        ])
    );

    // The product sits below the additive split that surrounds it.
    let product = tree.root().get(&[1, 1, 0]).unwrap();
    assert_eq!(product.value().as_text(), Some("*"));
    let parent = tree.root().get(&[1, 1]).unwrap();
    assert_eq!(parent.value().as_text(), Some("+"));
    assert_eq!(parent.node_type(), "Operator");
}

#[test]
fn test_parenthesis_is_peeled_then_rescanned() {
    let tree = build("8*(3 + 5)");

    insta::assert_snapshot!(to_treeviz_str(tree.root()).trim_end(), @r"
    └─ Operator: '*'
      ├─ Integer: '8'
      └─ Parenthesis: ('(', ')')
        ├─ Empty: ''
        ├─ Operator: '+'
        │ ├─ Integer: '3'
        │ └─ Integer: '5'
        └─ Empty: ''
    ");

    let parens = &tree.root().children()[1];
    assert_eq!(parens.span(), 2..9);
    assert_eq!(parens.children()[1].span(), 3..8);
}

#[test]
fn test_precedence_inside_and_around_parentheses() {
    let tree = build("2 * (3 + 4) - 1");

    assert_eq!(
        in_order(tree.root()),
        pairs(&[
            ("Integer", "2"),
            ("Operator", "*"),
            ("Empty", ""),
            ("Parenthesis", "("),
            ("Integer", "3"),
            ("Operator", "+"),
            ("Integer", "4"),
            ("Parenthesis", ")"),
            ("Empty", ""),
            ("Operator", "-"),
            ("Integer", "1"),
        ])
    );
    assert_eq!(tree.root().value().as_text(), Some("-"));
}

#[test]
fn test_long_operator_chain() {
    let expression = format!("1{}", "+1".repeat(2_000));
    let tree = build(&expression);

    assert_eq!(tree.leaves().count(), 2_001);
    assert!(tree.leaves().all(|leaf| leaf.node_type() == "Integer"));
    assert_eq!(tree.options().max_splits, None);
}

#[test]
fn test_identifiers_are_words() {
    let tree = build("foo_1 + 2");
    assert_eq!(
        in_order(tree.root()),
        pairs(&[("Word", "foo_1"), ("Operator", "+"), ("Integer", "2")])
    );
}

#[rstest]
#[case("42", "Integer", "42")]
#[case("  7 ", "Integer", "7")]
#[case("foo_1", "Word", "foo_1")]
#[case(" _x9 ", "Word", "_x9")]
#[case("   ", "Empty", "")]
#[case("", "Empty", "")]
fn test_single_leaf(#[case] input: &str, #[case] node_type: &str, #[case] value: &str) {
    let tree = build(input);
    assert!(tree.root().is_leaf());
    assert_eq!(tree.root().node_type(), node_type);
    assert_eq!(tree.root().value(), &NodeValue::from(value));
    assert_eq!(tree.root().span(), 0..input.len());
}

#[test]
fn test_mismatched_rule_patterns_fail_before_building() {
    let result = RegexNodeRule::new(["Expression"], &[r"\(", r"\)"], &[r"\("]);
    assert!(matches!(
        result,
        Err(RuleError::PatternCountMismatch {
            matches: 2,
            filters: 1
        })
    ));
}

#[test]
fn test_not_in_ranges_per_group() {
    let modifier = NotInModifier::new(r"\([^)]*\)").unwrap();
    assert_eq!(modifier.exclusions("(1+2)+(3+4)"), vec![0..5, 6..11]);
}

#[test]
fn test_lenient_keeps_unsplittable_leaf() {
    let tree = build("(1 + 2) * 3");
    assert!(tree.root().is_leaf());
    assert_eq!(tree.root().node_type(), "Expression");
    assert_eq!(tree.root().value().as_text(), Some("(1 + 2) * 3"));
}

#[test]
fn test_strict_rejects_unsplittable_leaf() {
    let err = build_strict("(1 + 2) * 3").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"couldn't find a meaning for '(1 + 2) * 3' at 0..11");
}

#[test]
fn test_strict_accepts_fully_typed_tree() {
    let tree = build_strict("a * (b - 3)").unwrap();
    assert!(tree
        .leaves()
        .all(|leaf| ["Integer", "Word", "Empty"].contains(&leaf.node_type())));
}

#[test]
fn test_repr_output() {
    let tree = build("1 + x");
    let output = FormatRegistry::with_defaults()
        .serialize(&tree, "repr")
        .unwrap();
    assert_eq!(
        output,
        "('+', 'Operator'): [\n\t('1', 'Integer'),\n\t('x', 'Word')\n]\n"
    );
}

#[test]
fn test_grammar_file_equivalent_to_builtin() {
    let config = GrammarConfig::load(std::path::Path::new("grammars/arithmetic.yaml")).unwrap();
    assert_eq!(config.name.as_deref(), Some("arithmetic"));

    let grammar = config.compile().unwrap();
    let expression = "x - 3 * (y + 2)";
    let from_file = SyntaxTree::build(expression, &grammar).unwrap();
    assert_eq!(from_file.root(), build(expression).root());
}
