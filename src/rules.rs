//! Splitting and classification rules
//!
//! - [`NodeRule`]: splits a node into children; [`RegexNodeRule`] is the
//!   regex-driven implementation.
//! - [`RuleModifier`]: per-group adjustments, e.g. [`NotInModifier`] exclusion
//!   ranges.
//! - [`LeafRule`]: classifies the leaves left once no node rule applies.

pub mod error;
pub mod leaf_rule;
pub mod modifier;
pub mod node_rule;
pub mod regex_rule;

pub use error::RuleError;
pub use leaf_rule::LeafRule;
pub use modifier::{merge_ranges, NotInModifier, RuleModifier};
pub use node_rule::{NodeRule, RuleOutcome};
pub use regex_rule::RegexNodeRule;
