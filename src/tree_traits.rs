/*
Terminal rendering for converted trees.

termtree::Tree is a foreign type, so the conversion lives in a local trait
implemented for our own TreeNode rather than in an inherent impl.
 */
use termtree::Tree;
use tracing::instrument;

use crate::domain::TreeNode;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for TreeNode {
    #[instrument(level = "trace", skip_all, fields(name = self.name()))]
    fn to_tree_string(&self) -> Tree<String> {
        let leaves: Vec<_> = self
            .children()
            .unwrap_or_default()
            .iter()
            .map(|c| c.to_tree_string())
            .collect();

        Tree::new(self.name().to_string()).with_leaves(leaves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_tree_string_renders_in_order() {
        let tree = TreeNode::branch(
            "Company",
            vec![
                TreeNode::leaf("CEO"),
                TreeNode::branch("Engineering", vec![TreeNode::leaf("Backend")]),
            ],
        );
        let rendered = tree.to_tree_string().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Company");
        assert!(lines[1].ends_with("CEO"));
        assert!(lines[2].ends_with("Engineering"));
        assert!(lines[3].ends_with("Backend"));
        assert_eq!(lines.len(), 4);
    }
}
