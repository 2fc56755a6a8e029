//! Grammar files
//!
//! Grammars are plain data: names and regex strings. This module deserializes
//! them (YAML or JSON) and compiles them into a [`Grammar`] once, so pattern
//! mistakes surface before any tree is built.
//!
//! ```yaml
//! leaf_rules:
//!   - name: Integer
//!     pattern: '^\s*[0-9]+\s*$'
//!     filter: '[0-9]+'
//! node_rules:
//!   - group: additive
//!     patterns: ['[+-]']
//!     filters: ['[+-]']
//! modifiers:
//!   additive:
//!     - kind: not_in
//!       pattern: '\([^)]*\)'
//! options:
//!   classification: strict
//! ```

use super::error::ConfigError;
use crate::grammar::{BuildOptions, Grammar, RuleEntry};
use crate::rules::{LeafRule, NotInModifier, RegexNodeRule, RuleError, RuleModifier};
use crate::tree::DEFAULT_NODE_TYPE;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GrammarConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub options: BuildOptions,
    #[serde(default)]
    pub leaf_rules: Vec<LeafRuleConfig>,
    #[serde(default)]
    pub node_rules: Vec<NodeRuleConfig>,
    #[serde(default)]
    pub modifiers: BTreeMap<String, Vec<ModifierConfig>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LeafRuleConfig {
    pub name: String,
    pub pattern: String,
    pub filter: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeRuleConfig {
    pub group: String,
    #[serde(default = "default_types")]
    pub types: Vec<String>,
    pub patterns: Vec<String>,
    /// Omitted filters mean the patterns filter themselves.
    #[serde(default)]
    pub filters: Option<Vec<String>>,
    #[serde(default)]
    pub redo: bool,
    #[serde(default)]
    pub node_type: Option<String>,
}

fn default_types() -> Vec<String> {
    vec![DEFAULT_NODE_TYPE.to_string()]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModifierConfig {
    NotIn { pattern: String },
}

impl GrammarConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Reads a grammar file; `.json` files are parsed as JSON, anything else as YAML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&source),
            _ => Self::from_yaml_str(&source),
        }
    }

    /// Compiles every rule and checks that modifiers refer to declared groups.
    pub fn compile(&self) -> Result<Grammar, ConfigError> {
        let leaf_rules = self
            .leaf_rules
            .iter()
            .map(|rule| {
                LeafRule::new(rule.name.as_str(), &rule.pattern, &rule.filter).map_err(|source| {
                    ConfigError::Rule {
                        context: format!("leaf rule `{}`", rule.name),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let node_rules = self
            .node_rules
            .iter()
            .enumerate()
            .map(|(index, rule)| {
                compile_node_rule(rule).map_err(|source| ConfigError::Rule {
                    context: format!("node rule #{} (group `{}`)", index + 1, rule.group),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut modifiers: HashMap<String, Vec<RuleModifier>> = HashMap::new();
        for (group, configs) in &self.modifiers {
            if !self.node_rules.iter().any(|rule| &rule.group == group) {
                return Err(ConfigError::UnknownGroup(group.clone()));
            }
            let compiled = configs
                .iter()
                .map(|config| match config {
                    ModifierConfig::NotIn { pattern } => NotInModifier::new(pattern)
                        .map(RuleModifier::from)
                        .map_err(|source| ConfigError::Rule {
                            context: format!("not_in modifier of group `{group}`"),
                            source,
                        }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            modifiers.insert(group.clone(), compiled);
        }

        Ok(Grammar::new(leaf_rules, node_rules, modifiers, self.options))
    }
}

fn compile_node_rule(config: &NodeRuleConfig) -> Result<RuleEntry, RuleError> {
    let filters = config.filters.as_ref().unwrap_or(&config.patterns);
    let mut rule = RegexNodeRule::new(
        config.types.iter().cloned(),
        config.patterns.as_slice(),
        filters.as_slice(),
    )?
    .with_redo(config.redo);
    if let Some(node_type) = &config.node_type {
        rule = rule.with_node_type(node_type.as_str())?;
    }
    Ok(RuleEntry::new(rule, config.group.as_str()))
}
