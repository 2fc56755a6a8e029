//! Errors raised while building or editing a syntax tree

use std::ops::Range;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A node type tag was set to something that is not a usable tag.
    #[error("node type must be a non-empty string")]
    InvalidNodeType,

    /// Strict classification found a leaf no leaf rule accepts.
    #[error("couldn't find a meaning for '{}' at {}..{}", .value.trim(), .span.start, .span.end)]
    UnclassifiedLeaf { value: String, span: Range<usize> },

    /// A rule split a node without consuming any of its text.
    #[error("rule split {}..{} without making progress", .span.start, .span.end)]
    NoProgress { span: Range<usize> },

    /// Rules kept splitting past the configured cap.
    #[error("rule application limit of {limit} splits exceeded")]
    SplitLimitExceeded { limit: usize },
}
