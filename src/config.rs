//! Grammar configuration
//!
//! Grammar files describe rule tables as data; [`GrammarConfig::compile`] turns
//! them into a [`crate::grammar::Grammar`]. Built-in grammars are available by
//! name from [`builtin`].

pub mod error;
pub mod grammar_config;
pub mod registry;

pub use error::ConfigError;
pub use grammar_config::{GrammarConfig, LeafRuleConfig, ModifierConfig, NodeRuleConfig};
pub use registry::{arithmetic, builtin, GrammarRegistry, NamedGrammar, ResolvedGrammar};
