//! Rule modifiers
//!
//! Modifiers are attached to a rule group and change how the rules of that group
//! see a node. The only modifier today is [`NotInModifier`]: it marks spans of the
//! node value (typically bracketed sub-expressions) in which the owning rule must
//! not accept a match.

use super::error::{compile, RuleError};
use regex::Regex;
use std::ops::Range;

#[derive(Debug, Clone)]
pub enum RuleModifier {
    NotIn(NotInModifier),
}

impl RuleModifier {
    /// Spans of `text` the owning rule must treat as opaque.
    pub fn exclusions(&self, text: &str) -> Vec<Range<usize>> {
        match self {
            RuleModifier::NotIn(modifier) => modifier.exclusions(text),
        }
    }
}

impl From<NotInModifier> for RuleModifier {
    fn from(modifier: NotInModifier) -> Self {
        RuleModifier::NotIn(modifier)
    }
}

/// Excludes every span matched by a regex.
#[derive(Debug, Clone)]
pub struct NotInModifier {
    regex: Regex,
}

impl NotInModifier {
    pub fn new(pattern: &str) -> Result<Self, RuleError> {
        Ok(Self {
            regex: compile(pattern)?,
        })
    }

    /// Sorted, merged half-open ranges of all matches in `text`.
    ///
    /// Empty matches exclude nothing and are dropped.
    pub fn exclusions(&self, text: &str) -> Vec<Range<usize>> {
        let ranges = self
            .regex
            .find_iter(text)
            .map(|m| m.range())
            .filter(|r| !r.is_empty())
            .collect();
        merge_ranges(ranges)
    }
}

/// Sorts ranges and merges those that overlap.
///
/// Two ranges merge when the next one starts strictly before the current one
/// ends; ranges that merely touch stay separate.
pub fn merge_ranges(mut ranges: Vec<Range<usize>>) -> Vec<Range<usize>> {
    ranges.sort_by_key(|r| (r.start, r.end));

    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start < last.end => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    merged
}

/// Whether `position` lies inside one of the (merged) exclusion ranges.
pub fn is_excluded(ranges: &[Range<usize>], position: usize) -> bool {
    ranges.iter().any(|r| r.contains(&position))
}
