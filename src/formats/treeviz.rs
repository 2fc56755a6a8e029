//! Treeviz formatter
//!
//! One line per node, nesting drawn with box connectors, two columns per level:
//!
//! ```text
//! └─ Operator: '*'
//!   ├─ Integer: '8'
//!   └─ Parenthesis: ('(', ')')
//!     ├─ Empty: ''
//!     ├─ Operator: '+'
//!     │ ├─ Integer: '3'
//!     │ └─ Integer: '5'
//!     └─ Empty: ''
//! ```
//!
//! Labels longer than 30 characters are truncated.

use super::registry::{FormatError, Formatter};
use crate::tree::{SyntaxTree, TreeElement};

const MAX_LABEL_CHARS: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

pub fn to_treeviz_str(root: &TreeElement) -> String {
    let mut result = String::new();
    append_element(&mut result, root, "", true);
    result
}

fn append_element(result: &mut String, element: &TreeElement, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };
    let label = truncate(&element.value().to_string(), MAX_LABEL_CHARS);

    result.push_str(&format!(
        "{}{} {}: {}\n",
        prefix,
        connector,
        element.node_type(),
        label
    ));

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let children = element.children();
    for (i, child) in children.iter().enumerate() {
        append_element(result, child, &new_prefix, i == children.len() - 1);
    }
}

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, tree: &SyntaxTree) -> Result<String, FormatError> {
        Ok(to_treeviz_str(tree.root()))
    }

    fn description(&self) -> &str {
        "One line per node with box-drawing connectors"
    }
}
