//! Syntax Tree - drives the rules over an input string
//!
//! Building runs in two phases.
//!
//! # Growing
//!
//! A worklist of active leaves starts as `[root]`. Each pass:
//!
//! 1. Takes the worklist as the current leaves and starts an empty redo list
//! 2. For every node rule in priority order, sweeps the current leaves and
//!    replaces every node the rule splits by its children, until a sweep
//!    changes nothing (each rule reaches its own fixpoint before the next runs)
//! 3. Children produced by a redo rule also go on the redo list
//! 4. The current leaves join the accumulated leaves; the redo list becomes
//!    the next worklist
//!
//! The redo list is what lets a parenthesis rule peel one layer off `(3 + 5)`
//! and have `3 + 5` re-scanned by every higher priority rule, so `*` still binds
//! tighter than `+` inside parentheses.
//!
//! Worklist entries are index paths from the root. Splitting only ever appends
//! children to a leaf, so a path stays valid for the whole build.
//!
//! # Classifying
//!
//! Every accumulated element that is still a leaf is offered to the leaf rules
//! in order; the first one that accepts it sets the type and narrows the value.
//! Leaves no rule accepts are handled per [`ClassificationPolicy`].

use super::element::TreeElement;
use super::error::TreeError;
use crate::grammar::{BuildOptions, ClassificationPolicy, Grammar, RuleEntry};
use crate::rules::{LeafRule, NodeRule, RuleModifier, RuleOutcome};
use std::collections::HashMap;

type NodePath = Vec<usize>;

#[derive(Debug, Clone)]
pub struct SyntaxTree {
    expression: String,
    root: TreeElement,
    leaf_rules: Vec<LeafRule>,
    options: BuildOptions,
}

impl SyntaxTree {
    /// Builds a tree from plain rule tables.
    pub fn new(
        expression: &str,
        leaf_rules: Vec<LeafRule>,
        node_rules: Vec<RuleEntry>,
        modifiers: HashMap<String, Vec<RuleModifier>>,
        options: BuildOptions,
    ) -> Result<Self, TreeError> {
        let grammar = Grammar::new(leaf_rules, node_rules, modifiers, options);
        Self::build(expression, &grammar)
    }

    /// Builds a tree with the grammar's own options.
    pub fn build(expression: &str, grammar: &Grammar) -> Result<Self, TreeError> {
        Self::build_with_options(expression, grammar, grammar.options())
    }

    #[tracing::instrument(level = "debug", skip(grammar), fields(rules = grammar.node_rules().len()))]
    pub fn build_with_options(
        expression: &str,
        grammar: &Grammar,
        options: BuildOptions,
    ) -> Result<Self, TreeError> {
        let mut root = TreeElement::new(expression, 0..expression.len());
        let accumulated = grow(&mut root, grammar, options.max_splits)?;

        let mut tree = Self {
            expression: expression.to_string(),
            root,
            leaf_rules: grammar.leaf_rules().to_vec(),
            options,
        };
        tree.classify(accumulated)?;
        Ok(tree)
    }

    /// The input the tree was built from.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn root(&self) -> &TreeElement {
        &self.root
    }

    pub fn options(&self) -> BuildOptions {
        self.options
    }

    /// Leaves left to right.
    pub fn leaves(&self) -> impl Iterator<Item = &TreeElement> {
        self.root.leaves()
    }

    /// Runs classification again over every leaf.
    ///
    /// Leaves a leaf rule already typed are left alone, so calling this on a
    /// freshly built tree changes nothing.
    pub fn reclassify(&mut self) -> Result<(), TreeError> {
        let paths = self.root.leaf_paths();
        self.classify(paths)
    }

    fn classify(&mut self, mut paths: Vec<NodePath>) -> Result<(), TreeError> {
        // Redo children are accumulated once per pass they took part in.
        paths.sort();
        paths.dedup();

        for path in paths {
            let leaf = self
                .root
                .get_mut(&path)
                .expect("accumulated paths point into the tree");
            if !leaf.is_leaf() {
                continue;
            }
            classify_leaf(leaf, &self.leaf_rules, self.options.classification)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.root, f)
    }
}

/// Applies the node rules to fixpoint, returning every path that ended a pass
/// as a leaf.
fn grow(
    root: &mut TreeElement,
    grammar: &Grammar,
    max_splits: Option<usize>,
) -> Result<Vec<NodePath>, TreeError> {
    let mut budget = SplitBudget {
        used: 0,
        limit: max_splits,
    };
    let mut accumulated = Vec::new();
    let mut worklist: Vec<NodePath> = vec![Vec::new()];
    let mut pass = 0usize;

    while !worklist.is_empty() {
        pass += 1;
        tracing::debug!(pass, active = worklist.len(), "rule pass");

        let mut cur_leaves = std::mem::take(&mut worklist);
        let mut redo_list = Vec::new();

        for entry in grammar.node_rules() {
            let modifiers = grammar.modifiers_for(entry.group());
            while sweep(
                root,
                entry.rule(),
                modifiers,
                &mut cur_leaves,
                &mut redo_list,
                &mut budget,
            )? {}
        }

        accumulated.extend(cur_leaves);
        worklist = redo_list;
    }

    tracing::debug!(passes = pass, splits = budget.used, "rules reached fixpoint");
    Ok(accumulated)
}

struct SplitBudget {
    used: usize,
    limit: Option<usize>,
}

/// One sweep of `rule` over `leaves`. Returns whether anything was split.
///
/// Children of a split node take its place in `leaves` and are visited in the
/// same sweep, so a whole operator chain unfolds in one sweep.
///
/// A split must make progress: it has to add children and none of them may
/// cover the whole span of the node. Otherwise the rule would keep splitting
/// the same text forever.
fn sweep(
    root: &mut TreeElement,
    rule: &dyn NodeRule,
    modifiers: &[RuleModifier],
    leaves: &mut Vec<NodePath>,
    redo_list: &mut Vec<NodePath>,
    budget: &mut SplitBudget,
) -> Result<bool, TreeError> {
    let mut modified = false;
    let mut i = 0;

    while i < leaves.len() {
        let node = root
            .get_mut(&leaves[i])
            .expect("worklist paths point into the tree");
        let first_child = node.children().len();

        let RuleOutcome::Applied { redo } = rule.apply(node, modifiers) else {
            i += 1;
            continue;
        };

        let span = node.span();
        let new_children = &node.children()[first_child..];
        if new_children.is_empty() || new_children.iter().any(|child| child.span() == span) {
            return Err(TreeError::NoProgress { span });
        }
        let children = new_children.len();

        budget.used += 1;
        if let Some(limit) = budget.limit {
            if budget.used > limit {
                return Err(TreeError::SplitLimitExceeded { limit });
            }
        }
        tracing::trace!(path = ?leaves[i], children, redo, "node split");

        let parent = leaves[i].clone();
        let child_paths: Vec<NodePath> = (first_child..first_child + children)
            .map(|index| {
                let mut path = parent.clone();
                path.push(index);
                path
            })
            .collect();
        if redo {
            redo_list.extend(child_paths.iter().cloned());
        }

        leaves.splice(i..=i, child_paths);
        modified = true;
    }

    Ok(modified)
}

fn classify_leaf(
    leaf: &mut TreeElement,
    leaf_rules: &[LeafRule],
    policy: ClassificationPolicy,
) -> Result<(), TreeError> {
    if leaf.is_classified() {
        return Ok(());
    }

    if let Some(text) = leaf.value().as_text().map(str::to_owned) {
        for rule in leaf_rules {
            if let Some(keep) = rule.classify(&text) {
                leaf.classify_as(rule.name());
                leaf.set_value(&text[keep]);
                return Ok(());
            }
        }
    }

    match policy {
        ClassificationPolicy::Lenient => Ok(()),
        ClassificationPolicy::Strict => {
            tracing::debug!(span = ?leaf.span(), "leaf matched no leaf rule");
            Err(TreeError::UnclassifiedLeaf {
                value: leaf
                    .value()
                    .as_text()
                    .map(str::to_owned)
                    .unwrap_or_else(|| leaf.value().to_string()),
                span: leaf.span(),
            })
        }
    }
}
