//! Regex Node Rule
//!
//! The production [`NodeRule`]: an ordered list of (match, filter) regex pairs.
//!
//! The match regex finds a region with enough surrounding context to decide that
//! this really is the construct we want; the filter regex, run inside that region
//! only, isolates the token. For a binary operator the match regex can demand a
//! word character or whitespace on both sides (so a unary sign is left alone)
//! while the filter keeps just the operator character:
//!
//! ```text
//! value:   "2 + 4 - 1"
//! match:   ^[^(]*(\s|\w|^)[+-](\s|\w|$)   → "2 + 4 - "
//! filter:  [+-]                           → "+" (leftmost inside the match)
//! result:  token "+", children "2 " and " 4 - 1"
//! ```
//!
//! With several pairs the value is carved left to right: each pair searches the
//! text remaining after the previous token, and the node ends up holding the
//! tuple of tokens. If any pair fails the node is left as it was.
//!
//! Exclusion ranges from the group's modifiers are computed once against the full
//! value. A token starting inside one abandons the rule for this node; the rule
//! does not look for a later candidate.

use super::error::{compile, RuleError};
use super::modifier::{is_excluded, merge_ranges, RuleModifier};
use super::node_rule::{NodeRule, RuleOutcome};
use crate::tree::{NodeValue, TreeElement};
use regex::Regex;
use std::collections::BTreeSet;
use std::ops::Range;

#[derive(Debug, Clone)]
struct PatternPair {
    matcher: Regex,
    filter: Regex,
}

/// Byte ranges (relative to the node value) produced by a successful carve.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Carve {
    segments: Vec<Range<usize>>,
    tokens: Vec<Range<usize>>,
}

#[derive(Debug, Clone)]
pub struct RegexNodeRule {
    types: BTreeSet<String>,
    pairs: Vec<PatternPair>,
    redo: bool,
    node_type: Option<String>,
}

impl RegexNodeRule {
    /// Creates a rule for nodes of the given types.
    ///
    /// `filters` must be as long as `matches`.
    pub fn new<S: AsRef<str>>(
        types: impl IntoIterator<Item = impl Into<String>>,
        matches: &[S],
        filters: &[S],
    ) -> Result<Self, RuleError> {
        if matches.len() != filters.len() {
            return Err(RuleError::PatternCountMismatch {
                matches: matches.len(),
                filters: filters.len(),
            });
        }
        if matches.is_empty() {
            return Err(RuleError::NoPatterns);
        }

        let pairs = matches
            .iter()
            .zip(filters)
            .map(|(m, f)| -> Result<PatternPair, RuleError> {
                Ok(PatternPair {
                    matcher: compile(m.as_ref())?,
                    filter: compile(f.as_ref())?,
                })
            })
            .collect::<Result<Vec<_>, RuleError>>()?;

        Ok(Self {
            types: types.into_iter().map(Into::into).collect(),
            pairs,
            redo: false,
            node_type: None,
        })
    }

    /// A rule whose match patterns double as their own filters.
    pub fn unfiltered<S: AsRef<str>>(
        types: impl IntoIterator<Item = impl Into<String>>,
        matches: &[S],
    ) -> Result<Self, RuleError> {
        Self::new(types, matches, matches)
    }

    /// Re-queue the children of every split for a full pass over all rules.
    pub fn with_redo(mut self, redo: bool) -> Self {
        self.redo = redo;
        self
    }

    /// Tag nodes this rule splits with `node_type`.
    pub fn with_node_type(mut self, node_type: impl Into<String>) -> Result<Self, RuleError> {
        let node_type = node_type.into();
        if node_type.is_empty() {
            return Err(RuleError::EmptyNodeType);
        }
        self.node_type = Some(node_type);
        Ok(self)
    }

    pub fn accepts(&self, node_type: &str) -> bool {
        self.types.contains(node_type)
    }

    fn carve(&self, text: &str, exclusions: &[Range<usize>]) -> Option<Carve> {
        let mut offset = 0;
        let mut segments = Vec::with_capacity(self.pairs.len() + 1);
        let mut tokens = Vec::with_capacity(self.pairs.len());

        for pair in &self.pairs {
            let rest = &text[offset..];
            let found = pair.matcher.find(rest)?;
            let token = pair.filter.find(found.as_str())?;

            let start = offset + found.start() + token.start();
            let end = offset + found.start() + token.end();
            if is_excluded(exclusions, start) {
                tracing::trace!(start, "token inside exclusion range, rule abandoned");
                return None;
            }

            segments.push(offset..start);
            tokens.push(start..end);
            offset = end;
        }

        segments.push(offset..text.len());
        Some(Carve { segments, tokens })
    }
}

impl NodeRule for RegexNodeRule {
    fn apply(&self, node: &mut TreeElement, modifiers: &[RuleModifier]) -> RuleOutcome {
        if !node.is_leaf() || !self.accepts(node.node_type()) {
            return RuleOutcome::NotApplied;
        }
        let Some(text) = node.value().as_text().map(str::to_owned) else {
            return RuleOutcome::NotApplied;
        };

        let exclusions = merge_ranges(
            modifiers
                .iter()
                .flat_map(|modifier| modifier.exclusions(&text))
                .collect(),
        );
        let Some(carve) = self.carve(&text, &exclusions) else {
            return RuleOutcome::NotApplied;
        };

        let base = node.span().start;
        for segment in &carve.segments {
            node.add_child(TreeElement::new(
                &text[segment.clone()],
                base + segment.start..base + segment.end,
            ));
        }

        let mut tokens: Vec<String> = carve
            .tokens
            .iter()
            .map(|token| text[token.clone()].to_string())
            .collect();
        let value = if tokens.len() == 1 {
            NodeValue::Text(tokens.remove(0))
        } else {
            NodeValue::Tuple(tokens)
        };
        node.set_value(value);
        if let Some(node_type) = &self.node_type {
            node.retag(node_type);
        }

        RuleOutcome::Applied { redo: self.redo }
    }
}
