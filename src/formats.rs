//! Output formats for syntax trees
//!
//! - `repr`: the tab-indented `(value, 'Type')` dump
//! - `treeviz`: one line per node with box-drawing connectors
//! - `json`: serde serialization of the element tree

pub mod json;
pub mod registry;
pub mod repr;
pub mod treeviz;

pub use json::JsonFormatter;
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use repr::ReprFormatter;
pub use treeviz::{to_treeviz_str, TreevizFormatter};
