use super::error::{compile, RuleError};
use regex::Regex;
use std::ops::Range;

/// Gives a leaf its meaning.
///
/// `pattern` must match at the start of the leaf value; `filter` then picks the
/// part of the value the leaf keeps (typically the literal without surrounding
/// whitespace).
#[derive(Debug, Clone)]
pub struct LeafRule {
    name: String,
    pattern: Regex,
    filter: Regex,
}

impl LeafRule {
    pub fn new(name: impl Into<String>, pattern: &str, filter: &str) -> Result<Self, RuleError> {
        let name = name.into();
        if name.is_empty() {
            return Err(RuleError::EmptyNodeType);
        }
        Ok(Self {
            name,
            pattern: compile(pattern)?,
            filter: compile(filter)?,
        })
    }

    /// The type given to leaves this rule accepts.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Byte range of `value` to keep, or `None` if the rule does not accept it.
    pub fn classify(&self, value: &str) -> Option<Range<usize>> {
        let whole = self.pattern.find(value)?;
        if whole.start() != 0 {
            return None;
        }
        self.filter.find(value).map(|m| m.range())
    }
}
