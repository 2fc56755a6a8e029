//! Tree elements - the nodes of a rule-built syntax tree
//!
//! A [`TreeElement`] starts life as a leaf holding a slice of the input text.
//! When a node rule splits it, the element keeps the matched token(s) as its
//! value and owns the flanking segments as children:
//!
//! ```text
//! "2 + 4"   ──split on [+-]──▶   ('+', 'Expression'): [
//!                                    ('2 ', 'Expression'),
//!                                    (' 4', 'Expression')
//!                                ]
//! ```
//!
//! Every element also remembers the byte span of the input it was carved from.
//! Classification may narrow a leaf's value (`" 4"` becomes `"4"`), the span is
//! never touched, so the original text of any node can always be recovered.

use super::error::TreeError;
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Type tag given to every freshly created element.
pub const DEFAULT_NODE_TYPE: &str = "Expression";

/// Value held by an element.
///
/// Leaves hold text. A node split by a rule with several match/filter pairs holds
/// the ordered tuple of matched tokens (e.g. `("(", ")")` for a parenthesis rule).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NodeValue {
    Text(String),
    Tuple(Vec<String>),
}

impl NodeValue {
    /// The text of a single-valued node, `None` for tuples.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            NodeValue::Text(text) => Some(text),
            NodeValue::Tuple(_) => None,
        }
    }

    /// All tokens held by this value, in order.
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            NodeValue::Text(text) => vec![text.as_str()],
            NodeValue::Tuple(parts) => parts.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for NodeValue {
    fn from(text: &str) -> Self {
        NodeValue::Text(text.to_string())
    }
}

impl From<String> for NodeValue {
    fn from(text: String) -> Self {
        NodeValue::Text(text)
    }
}

impl From<Vec<String>> for NodeValue {
    fn from(parts: Vec<String>) -> Self {
        NodeValue::Tuple(parts)
    }
}

impl fmt::Display for NodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeValue::Text(text) => write!(f, "{}", quote(text)),
            NodeValue::Tuple(parts) => {
                let quoted: Vec<String> = parts.iter().map(|p| quote(p)).collect();
                write!(f, "({})", quoted.join(", "))
            }
        }
    }
}

/// Single-quote a string, escaping what would make the dump ambiguous.
pub(crate) fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// A node of the syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeElement {
    value: NodeValue,
    #[serde(rename = "type")]
    node_type: String,
    span: Range<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<TreeElement>,
    #[serde(skip)]
    classified: bool,
}

impl TreeElement {
    /// Creates a leaf of the default type.
    pub fn new(value: impl Into<NodeValue>, span: Range<usize>) -> Self {
        Self {
            value: value.into(),
            node_type: DEFAULT_NODE_TYPE.to_string(),
            span,
            children: Vec::new(),
            classified: false,
        }
    }

    pub fn value(&self) -> &NodeValue {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<NodeValue>) {
        self.value = value.into();
    }

    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    /// Replaces the type tag.
    ///
    /// Tags must be non-empty; on failure the element is left unchanged.
    pub fn set_node_type(&mut self, node_type: impl Into<String>) -> Result<(), TreeError> {
        let node_type = node_type.into();
        if node_type.is_empty() {
            return Err(TreeError::InvalidNodeType);
        }
        self.node_type = node_type;
        Ok(())
    }

    /// Tags already validated by their owner (rule construction) skip the check.
    pub(crate) fn retag(&mut self, node_type: &str) {
        self.node_type = node_type.to_string();
    }

    /// Sets the type chosen by a leaf rule and marks the element as classified.
    pub(crate) fn classify_as(&mut self, leaf_type: &str) {
        self.node_type = leaf_type.to_string();
        self.classified = true;
    }

    /// Whether a leaf rule has typed this element.
    pub fn is_classified(&self) -> bool {
        self.classified
    }

    /// Byte range of the input this element was created from.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    pub fn children(&self) -> &[TreeElement] {
        &self.children
    }

    /// Appends an owned child at the end of the child list.
    pub fn add_child(&mut self, child: TreeElement) {
        self.children.push(child);
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Follows a path of child indices starting at this element.
    pub fn get(&self, path: &[usize]) -> Option<&TreeElement> {
        path.iter()
            .try_fold(self, |node, &index| node.children.get(index))
    }

    pub fn get_mut(&mut self, path: &[usize]) -> Option<&mut TreeElement> {
        path.iter()
            .try_fold(self, |node, &index| node.children.get_mut(index))
    }

    /// Leaves below (or at) this element, left to right.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves { stack: vec![self] }
    }

    /// Paths of all leaves below this element, left to right.
    pub fn leaf_paths(&self) -> Vec<Vec<usize>> {
        let mut paths = Vec::new();
        let mut stack = vec![(self, Vec::new())];
        while let Some((node, path)) = stack.pop() {
            if node.is_leaf() {
                paths.push(path);
                continue;
            }
            for (i, child) in node.children.iter().enumerate().rev() {
                let mut child_path = path.clone();
                child_path.push(i);
                stack.push((child, child_path));
            }
        }
        paths
    }
}

// Trees can be as deep as the input is long; tear them down without recursion.
impl Drop for TreeElement {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

enum DumpStep<'a> {
    Open(&'a TreeElement, usize),
    Separator,
    Close(usize),
}

/// Depth-indented dump: `(value, 'Type')` for leaves, children one tab deeper.
impl fmt::Display for TreeElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![DumpStep::Open(self, 0)];
        while let Some(step) = stack.pop() {
            match step {
                DumpStep::Open(node, depth) => {
                    write!(f, "{:\t<depth$}", "")?;
                    write!(f, "({}, {})", node.value, quote(&node.node_type))?;
                    if node.children.is_empty() {
                        continue;
                    }
                    writeln!(f, ": [")?;
                    stack.push(DumpStep::Close(depth));
                    for (i, child) in node.children.iter().enumerate().rev() {
                        stack.push(DumpStep::Open(child, depth + 1));
                        if i > 0 {
                            stack.push(DumpStep::Separator);
                        }
                    }
                }
                DumpStep::Separator => writeln!(f, ",")?,
                DumpStep::Close(depth) => write!(f, "\n{:\t<depth$}]", "")?,
            }
        }
        Ok(())
    }
}

/// Iterator over the leaves of a subtree, see [`TreeElement::leaves`].
pub struct Leaves<'a> {
    stack: Vec<&'a TreeElement>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a TreeElement;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if node.is_leaf() {
                return Some(node);
            }
            self.stack.extend(node.children.iter().rev());
        }
        None
    }
}
