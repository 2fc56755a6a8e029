//! # ruletree
//!
//! A rule-driven syntax tree builder. An input string becomes the root of a
//! tree; node rules split leaves around the tokens they match until nothing
//! changes, and leaf rules then give every remaining leaf a type.
//!
//! ```ignore
//! use ruletree::{config, SyntaxTree};
//!
//! let tree = SyntaxTree::build("8*(3 + 5)", config::arithmetic())?;
//! println!("{tree}");
//! ```
//!
//! Modules:
//! - [`tree`]: tree elements and the syntax tree builder
//! - [`rules`]: node rules, modifiers and leaf rules
//! - [`grammar`]: compiled rule tables and build options
//! - [`config`]: grammar files and the built-in grammars
//! - [`formats`]: text output of finished trees

pub mod config;
pub mod formats;
pub mod grammar;
pub mod rules;
pub mod tree;

pub use grammar::{BuildOptions, ClassificationPolicy, Grammar};
pub use tree::{NodeValue, SyntaxTree, TreeElement, TreeError};
