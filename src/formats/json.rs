//! JSON formatter
//!
//! Serializes the root element with serde: `value` (string or array of
//! strings), `type`, `span` and, for internal nodes, `children`.

use super::registry::{FormatError, Formatter};
use crate::tree::SyntaxTree;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, tree: &SyntaxTree) -> Result<String, FormatError> {
        serde_json::to_string_pretty(tree.root())
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Pretty-printed JSON"
    }
}
