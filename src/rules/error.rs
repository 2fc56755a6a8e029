use thiserror::Error;

/// Error type for rule construction
#[derive(Debug, Clone, Error)]
pub enum RuleError {
    /// Match and filter pattern lists must pair up one to one.
    #[error("match and filter size differ ({matches} match patterns, {filters} filter patterns)")]
    PatternCountMismatch { matches: usize, filters: usize },

    #[error("a node rule needs at least one match pattern")]
    NoPatterns,

    #[error("node type tags must not be empty")]
    EmptyNodeType,

    /// A supplied pattern failed to compile.
    #[error("invalid regex pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Compiles a caller-supplied pattern, keeping the pattern text in the error.
pub(crate) fn compile(pattern: &str) -> Result<regex::Regex, RuleError> {
    regex::Regex::new(pattern).map_err(|source| RuleError::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}
