//! Registry of named grammars
//!
//! Built-in grammars ship as YAML embedded into the binary, so the files under
//! `grammars/` are both documentation and the source of truth.

use super::error::ConfigError;
use super::grammar_config::GrammarConfig;
use crate::grammar::Grammar;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::ops::Deref;
use std::path::Path;

const ARITHMETIC_YAML: &str = include_str!("../../grammars/arithmetic.yaml");

static BUILTIN: Lazy<GrammarRegistry> =
    Lazy::new(|| GrammarRegistry::with_defaults().expect("built-in grammars compile"));

/// A compiled grammar with its registry metadata.
#[derive(Debug)]
pub struct NamedGrammar {
    pub name: String,
    pub description: String,
    pub grammar: Grammar,
}

/// A grammar found by [`GrammarRegistry::resolve`].
#[derive(Debug)]
pub enum ResolvedGrammar<'a> {
    Registered(&'a Grammar),
    Loaded(Grammar),
}

impl Deref for ResolvedGrammar<'_> {
    type Target = Grammar;

    fn deref(&self) -> &Grammar {
        match self {
            ResolvedGrammar::Registered(grammar) => grammar,
            ResolvedGrammar::Loaded(grammar) => grammar,
        }
    }
}

#[derive(Debug, Default)]
pub struct GrammarRegistry {
    grammars: HashMap<String, NamedGrammar>,
}

impl GrammarRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a grammar, replacing any previous one of the same name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        grammar: Grammar,
    ) {
        let name = name.into();
        self.grammars.insert(
            name.clone(),
            NamedGrammar {
                name,
                description: description.into(),
                grammar,
            },
        );
    }

    /// Compiles and registers a grammar file under its declared name.
    pub fn register_config(&mut self, config: &GrammarConfig) -> Result<(), ConfigError> {
        let name = config.name.clone().ok_or(ConfigError::MissingName)?;
        let description = config.description.clone().unwrap_or_default();
        self.register(name, description, config.compile()?);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Grammar> {
        self.grammars.get(name).map(|named| &named.grammar)
    }

    /// Finds a registered grammar by name, or else loads the grammar file at
    /// that path. A registered name wins over a file of the same name.
    pub fn resolve(&self, name_or_path: &str) -> Result<ResolvedGrammar<'_>, ConfigError> {
        if let Some(grammar) = self.get(name_or_path) {
            return Ok(ResolvedGrammar::Registered(grammar));
        }

        let path = Path::new(name_or_path);
        if !path.is_file() {
            return Err(ConfigError::GrammarNotFound(name_or_path.to_string()));
        }
        let grammar = GrammarConfig::load(path)?.compile()?;
        Ok(ResolvedGrammar::Loaded(grammar))
    }

    pub fn has(&self, name: &str) -> bool {
        self.grammars.contains_key(name)
    }

    /// All grammars sorted by name.
    pub fn list_all(&self) -> Vec<&NamedGrammar> {
        let mut grammars: Vec<_> = self.grammars.values().collect();
        grammars.sort_by(|a, b| a.name.cmp(&b.name));
        grammars
    }

    /// Registry holding every built-in grammar.
    pub fn with_defaults() -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        registry.register_config(&GrammarConfig::from_yaml_str(ARITHMETIC_YAML)?)?;
        Ok(registry)
    }
}

/// The shared registry of built-in grammars.
pub fn builtin() -> &'static GrammarRegistry {
    &BUILTIN
}

/// The built-in `arithmetic` grammar.
pub fn arithmetic() -> &'static Grammar {
    builtin()
        .get("arithmetic")
        .expect("arithmetic is a built-in grammar")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_contain_arithmetic() {
        let registry = GrammarRegistry::with_defaults().unwrap();
        assert!(registry.has("arithmetic"));
        let names: Vec<_> = registry.list_all().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["arithmetic"]);
    }

    #[test]
    fn test_arithmetic_shape() {
        let grammar = arithmetic();
        let leaf_names: Vec<_> = grammar.leaf_rules().iter().map(|r| r.name()).collect();
        assert_eq!(leaf_names, vec!["Integer", "Word", "Empty"]);
        let groups: Vec<_> = grammar.node_rules().iter().map(|e| e.group()).collect();
        assert_eq!(groups, vec!["additive", "multiplicative", "parenthesis"]);
        assert_eq!(grammar.modifiers_for("additive").len(), 1);
        assert!(grammar.modifiers_for("parenthesis").is_empty());
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut registry = GrammarRegistry::new();
        registry.register("g", "first", Grammar::default());
        registry.register("g", "second", Grammar::default());
        assert_eq!(registry.list_all().len(), 1);
        assert_eq!(registry.list_all()[0].description, "second");
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_resolve_by_name_or_path() {
        assert!(matches!(
            builtin().resolve("arithmetic"),
            Ok(ResolvedGrammar::Registered(_))
        ));

        let loaded = builtin().resolve("grammars/arithmetic.yaml").unwrap();
        assert!(matches!(loaded, ResolvedGrammar::Loaded(_)));
        assert_eq!(loaded.node_rules().len(), 3);
    }

    #[test]
    fn test_resolve_unknown_name() {
        match builtin().resolve("arithmetc") {
            Err(ConfigError::GrammarNotFound(name)) => assert_eq!(name, "arithmetc"),
            other => panic!("expected GrammarNotFound, got {:?}", other),
        }
        assert!(matches!(
            builtin().resolve("grammars"),
            Err(ConfigError::GrammarNotFound(_))
        ));
    }

    #[test]
    fn test_unnamed_config_cannot_be_registered() {
        let mut registry = GrammarRegistry::new();
        assert!(matches!(
            registry.register_config(&GrammarConfig::default()),
            Err(ConfigError::MissingName)
        ));
    }
}
