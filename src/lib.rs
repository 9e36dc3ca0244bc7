//! Outline-to-tree conversion.
//!
//! An outline is a YAML document with a single root key whose value lists
//! items. An item is either a plain label or a mapping with a `name` and an
//! optional `[]` list of further items:
//!
//! ```yaml
//! Root:
//!   - Child A
//!   - name: Child B
//!     []:
//!       - Grandchild 1
//! ```
//!
//! [`convert`] turns such text into a [`TreeNode`] or a typed
//! [`ConversionError`]. It is pure and re-entrant; callers that convert on
//! every keystroke should debounce and drop stale results themselves.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;

pub use domain::{
    ConversionError, ConversionResult, DocumentError, DocumentLocation, RawValue, TreeBuilder,
    TreeNode, DEFAULT_MAX_DEPTH,
};

use infrastructure::traits::DocumentDeserializer;
use infrastructure::yaml::YamlDeserializer;

/// Convert outline text into a tree with the default depth limit.
pub fn convert(text: &str) -> ConversionResult<TreeNode> {
    convert_with_max_depth(text, DEFAULT_MAX_DEPTH)
}

/// Convert outline text into a tree, failing past `max_depth` nesting levels.
pub fn convert_with_max_depth(text: &str, max_depth: usize) -> ConversionResult<TreeNode> {
    let document = YamlDeserializer.deserialize(text)?;
    TreeBuilder::with_max_depth(max_depth).build(&document)
}
