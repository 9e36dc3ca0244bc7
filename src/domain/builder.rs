//! Tree builder: interprets a deserialized outline document as a tree.
//!
//! Convention:
//! - the document is a mapping, its first key names the root
//! - the root's value is a sequence of items
//! - an item is a scalar (leaf) or a mapping with `name` and an optional `[]`
//!   sequence of further items

use tracing::{debug, instrument, trace};

use crate::domain::error::{ConversionError, ConversionResult};
use crate::domain::node::TreeNode;
use crate::domain::value::RawValue;

/// Default ceiling for item nesting.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Key holding an item's label.
pub const NAME_KEY: &str = "name";

/// Key holding an item's child sequence.
pub const CHILDREN_KEY: &str = "[]";

/// Constructs a [`TreeNode`] from a [`RawValue`] document.
///
/// Holds no state between calls, so one builder can serve concurrent
/// conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeBuilder {
    max_depth: usize,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Build the tree for a whole document.
    ///
    /// Either the complete tree or the first violation found is returned.
    #[instrument(level = "debug", skip_all, fields(max_depth = self.max_depth))]
    pub fn build(&self, document: &RawValue) -> ConversionResult<TreeNode> {
        let entries = match document {
            RawValue::Mapping(entries) => entries,
            RawValue::Scalar(_) | RawValue::Sequence(_) => {
                debug!("document is a {}, not a mapping", document.kind());
                return Err(ConversionError::shape("missing root mapping"));
            }
        };
        let (root_name, root_items) = entries
            .first()
            .ok_or_else(|| ConversionError::shape("missing root mapping"))?;
        if entries.len() > 1 {
            debug!(
                "ignoring {} extra top-level key(s) after '{}'",
                entries.len() - 1,
                root_name
            );
        }

        let items = match root_items {
            RawValue::Sequence(items) => items,
            RawValue::Scalar(_) | RawValue::Mapping(_) => {
                return Err(ConversionError::shape("root value is not a sequence"));
            }
        };

        let mut root = TreeNode::branch(require_name(root_name)?, Vec::new());
        self.build_children(&mut root, items, 0)?;
        debug!("built tree '{}' with {} nodes", root.name(), root.node_count());
        Ok(root)
    }

    fn build_children(
        &self,
        parent: &mut TreeNode,
        items: &[RawValue],
        depth: usize,
    ) -> ConversionResult<()> {
        if depth > self.max_depth {
            return Err(ConversionError::DepthExceeded(depth));
        }
        trace!("depth {}: {} item(s) under '{}'", depth, items.len(), parent.name());

        for item in items {
            let node = match item {
                RawValue::Scalar(text) => TreeNode::leaf(require_name(text)?),
                RawValue::Mapping(_) => self.build_mapping_item(item, depth)?,
                RawValue::Sequence(_) => {
                    return Err(ConversionError::shape("item is not a scalar or mapping"));
                }
            };
            parent.push_child(node);
        }
        Ok(())
    }

    fn build_mapping_item(&self, item: &RawValue, depth: usize) -> ConversionResult<TreeNode> {
        let name = match item.get(NAME_KEY) {
            Some(RawValue::Scalar(text)) => require_name(text)?,
            Some(RawValue::Mapping(_) | RawValue::Sequence(_)) => {
                return Err(ConversionError::shape("name is not a scalar"));
            }
            None => return Err(ConversionError::shape("item missing name")),
        };

        match item.get(CHILDREN_KEY) {
            None => Ok(TreeNode::leaf(name)),
            Some(RawValue::Sequence(children)) => {
                let mut node = TreeNode::branch(name, Vec::with_capacity(children.len()));
                self.build_children(&mut node, children, depth + 1)?;
                Ok(node)
            }
            Some(RawValue::Scalar(_) | RawValue::Mapping(_)) => {
                Err(ConversionError::shape("'[]' value is not a sequence"))
            }
        }
    }
}

fn require_name(text: &str) -> ConversionResult<&str> {
    if text.trim().is_empty() {
        return Err(ConversionError::shape("empty name"));
    }
    Ok(text)
}
