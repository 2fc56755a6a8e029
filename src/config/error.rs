use crate::rules::RuleError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read grammar file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML grammar: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON grammar: {0}")]
    Json(#[from] serde_json::Error),

    /// A rule in the file failed to build; `context` names which one.
    #[error("{context}: {source}")]
    Rule {
        context: String,
        #[source]
        source: RuleError,
    },

    #[error("modifiers declared for unknown rule group `{0}`")]
    UnknownGroup(String),

    #[error("grammar has no `name`, it cannot be registered")]
    MissingName,

    #[error("grammar `{0}` is neither a built-in name nor a grammar file")]
    GrammarNotFound(String),
}
