//! Repr formatter: the tab-indented `(value, 'Type')` dump of
//! [`TreeElement`](crate::tree::TreeElement)'s `Display`.

use super::registry::{FormatError, Formatter};
use crate::tree::SyntaxTree;

pub struct ReprFormatter;

impl Formatter for ReprFormatter {
    fn name(&self) -> &str {
        "repr"
    }

    fn serialize(&self, tree: &SyntaxTree) -> Result<String, FormatError> {
        Ok(format!("{}\n", tree))
    }

    fn description(&self) -> &str {
        "Tab-indented (value, type) dump"
    }
}
