use super::modifier::RuleModifier;
use crate::tree::TreeElement;
use std::fmt;

/// What happened when a rule was offered a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The node is untouched.
    NotApplied,
    /// The node was split; its new children were appended to it. With `redo`
    /// set, all of them must go through the whole rule pipeline again.
    Applied { redo: bool },
}

impl RuleOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, RuleOutcome::Applied { .. })
    }
}

/// A unit of splitting logic.
///
/// Rules are stateless and shared between every node they are offered; all
/// changes go through the element passed in.
pub trait NodeRule: fmt::Debug + Send + Sync {
    /// Splits `node` if the rule applies to it, given the modifiers of the
    /// rule's group.
    fn apply(&self, node: &mut TreeElement, modifiers: &[RuleModifier]) -> RuleOutcome;
}
