//! Grammar - the compiled rule tables a syntax tree is built from
//!
//! A grammar bundles:
//! 1. Node rules in priority order, each belonging to a named group
//! 2. The modifiers of each group
//! 3. Leaf rules, tried in order on every leaf
//! 4. Build options (classification policy, optional split cap)
//!
//! Grammars are immutable once built and can be shared between threads.
//! Build them in code with [`Grammar::builder`] or from a file through
//! [`crate::config::GrammarConfig`].

use crate::rules::{LeafRule, NodeRule, RuleModifier};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What to do with a leaf no leaf rule accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationPolicy {
    /// Fail the build.
    Strict,
    /// Keep the leaf with its generic type and untouched value.
    #[default]
    Lenient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildOptions {
    pub classification: ClassificationPolicy,
    /// Optional cap on successful rule applications for one build. Builds
    /// always terminate without it.
    pub max_splits: Option<usize>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            classification: ClassificationPolicy::Lenient,
            max_splits: None,
        }
    }
}

/// A node rule together with the group it belongs to.
#[derive(Debug)]
pub struct RuleEntry {
    rule: Box<dyn NodeRule>,
    group: String,
}

impl RuleEntry {
    pub fn new(rule: impl NodeRule + 'static, group: impl Into<String>) -> Self {
        Self {
            rule: Box::new(rule),
            group: group.into(),
        }
    }

    pub fn rule(&self) -> &dyn NodeRule {
        self.rule.as_ref()
    }

    pub fn group(&self) -> &str {
        &self.group
    }
}

#[derive(Debug, Default)]
pub struct Grammar {
    leaf_rules: Vec<LeafRule>,
    node_rules: Vec<RuleEntry>,
    modifiers: HashMap<String, Vec<RuleModifier>>,
    options: BuildOptions,
}

impl Grammar {
    pub fn new(
        leaf_rules: Vec<LeafRule>,
        node_rules: Vec<RuleEntry>,
        modifiers: HashMap<String, Vec<RuleModifier>>,
        options: BuildOptions,
    ) -> Self {
        Self {
            leaf_rules,
            node_rules,
            modifiers,
            options,
        }
    }

    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::default()
    }

    pub fn leaf_rules(&self) -> &[LeafRule] {
        &self.leaf_rules
    }

    pub fn node_rules(&self) -> &[RuleEntry] {
        &self.node_rules
    }

    /// Modifiers in effect for `group`; empty when none were declared.
    pub fn modifiers_for(&self, group: &str) -> &[RuleModifier] {
        self.modifiers.get(group).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn options(&self) -> BuildOptions {
        self.options
    }
}

/// Fluent construction of a [`Grammar`].
///
/// ```ignore
/// let grammar = Grammar::builder()
///     .leaf_rule(LeafRule::new("Integer", r"^\s*[0-9]+\s*$", "[0-9]+")?)
///     .node_rule(RegexNodeRule::new(["Expression"], &[r"[+-]"], &[r"[+-]"])?, "additive")
///     .modifier("additive", NotInModifier::new(r"\([^)]*\)")?)
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    leaf_rules: Vec<LeafRule>,
    node_rules: Vec<RuleEntry>,
    modifiers: HashMap<String, Vec<RuleModifier>>,
    options: BuildOptions,
}

impl GrammarBuilder {
    pub fn leaf_rule(mut self, rule: LeafRule) -> Self {
        self.leaf_rules.push(rule);
        self
    }

    /// Appends a node rule; rules run in the order they are added.
    pub fn node_rule(mut self, rule: impl NodeRule + 'static, group: impl Into<String>) -> Self {
        self.node_rules.push(RuleEntry::new(rule, group));
        self
    }

    pub fn modifier(mut self, group: impl Into<String>, modifier: impl Into<RuleModifier>) -> Self {
        self.modifiers
            .entry(group.into())
            .or_default()
            .push(modifier.into());
        self
    }

    pub fn classification(mut self, policy: ClassificationPolicy) -> Self {
        self.options.classification = policy;
        self
    }

    pub fn max_splits(mut self, max_splits: usize) -> Self {
        self.options.max_splits = Some(max_splits);
        self
    }

    pub fn options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Grammar {
        Grammar::new(
            self.leaf_rules,
            self.node_rules,
            self.modifiers,
            self.options,
        )
    }
}
