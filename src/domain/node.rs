//! Output tree model handed to visualization consumers.

use serde::{Deserialize, Serialize};

/// A labeled node of the converted tree.
///
/// `children` is `None` for leaves by convention (scalar items) and
/// `Some` for nodes that declared a child marker, even when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    /// Leaf without a children field.
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: None,
        }
    }

    /// Node with a declared (possibly empty) child list.
    pub fn branch(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            name: name.into(),
            children: Some(children),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> Option<&[TreeNode]> {
        self.children.as_deref()
    }

    /// True when the node declared no children field at all.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub(crate) fn push_child(&mut self, child: TreeNode) {
        self.children.get_or_insert_with(Vec::new).push(child);
    }

    fn child_iter(&self) -> impl Iterator<Item = &TreeNode> {
        self.children.iter().flatten()
    }

    /// Number of levels, a lone node has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.child_iter().map(TreeNode::depth).max().unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        1 + self.child_iter().map(TreeNode::node_count).sum::<usize>()
    }

    /// Names of nodes without children, in pre-order.
    pub fn leaf_names(&self) -> Vec<&str> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a str>) {
        if self.child_iter().next().is_none() {
            leaves.push(&self.name);
        } else {
            for child in self.child_iter() {
                child.collect_leaves(leaves);
            }
        }
    }

    /// Every root-to-leaf path as a list of names.
    pub fn paths(&self) -> Vec<Vec<&str>> {
        let mut paths = Vec::new();
        let mut current = Vec::new();
        self.collect_paths(&mut current, &mut paths);
        paths
    }

    fn collect_paths<'a>(&'a self, current: &mut Vec<&'a str>, paths: &mut Vec<Vec<&'a str>>) {
        current.push(&self.name);
        if self.child_iter().next().is_none() {
            paths.push(current.clone());
        } else {
            for child in self.child_iter() {
                child.collect_paths(current, paths);
            }
        }
        current.pop();
    }

    /// One-element sequence `[root]` as chart widgets expect it.
    pub fn wrapped(&self) -> [&TreeNode; 1] {
        [self]
    }
}
