//! Syntax trees built by rules
//!
//! - [`TreeElement`]: a node with a value, a type tag, its input span and owned
//!   children
//! - [`SyntaxTree`]: builds the element tree for an input string from a
//!   [`crate::grammar::Grammar`]

pub mod element;
pub mod error;
pub mod syntax_tree;

pub use element::{Leaves, NodeValue, TreeElement, DEFAULT_NODE_TYPE};
pub use error::TreeError;
pub use syntax_tree::SyntaxTree;
