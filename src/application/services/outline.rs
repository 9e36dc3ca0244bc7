//! Outline service
//!
//! Loads outline documents, converts them into trees and writes them back.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{ConversionError, ConversionResult, TreeBuilder, TreeNode};
use crate::infrastructure::traits::{DocumentDeserializer, FileSystem};
use crate::infrastructure::yaml::OutlineWriter;

/// Key figures of a converted tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeSummary {
    pub root: String,
    pub nodes: usize,
    pub depth: usize,
    pub leaves: usize,
}

impl TreeSummary {
    pub fn of(tree: &TreeNode) -> Self {
        Self {
            root: tree.name().to_string(),
            nodes: tree.node_count(),
            depth: tree.depth(),
            leaves: tree.leaf_names().len(),
        }
    }
}

/// Service for converting outline documents.
pub struct OutlineService {
    fs: Arc<dyn FileSystem>,
    deserializer: Arc<dyn DocumentDeserializer>,
    builder: TreeBuilder,
    writer: OutlineWriter,
}

impl OutlineService {
    /// Create a new outline service.
    pub fn new(
        fs: Arc<dyn FileSystem>,
        deserializer: Arc<dyn DocumentDeserializer>,
        max_depth: usize,
    ) -> Self {
        Self {
            fs,
            deserializer,
            builder: TreeBuilder::with_max_depth(max_depth),
            writer: OutlineWriter,
        }
    }

    /// Convert outline text into a tree. No I/O.
    pub fn convert(&self, text: &str) -> ConversionResult<TreeNode> {
        let document = self.deserializer.deserialize(text)?;
        self.builder.build(&document)
    }

    /// Convert text read from `origin`, attaching the origin to failures.
    pub fn parse(&self, origin: &Path, text: &str) -> ApplicationResult<TreeNode> {
        self.convert(text).map_err(|source| ApplicationError::Outline {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Read and convert an outline file.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<TreeNode> {
        let text = self.read(path)?;
        self.parse(path, &text)
    }

    /// Load many files in parallel; results keep the order of `paths`.
    pub fn check_all(&self, paths: &[PathBuf]) -> Vec<(PathBuf, ApplicationResult<TreeSummary>)> {
        paths
            .par_iter()
            .map(|path| {
                let summary = self.load(path).map(|tree| TreeSummary::of(&tree));
                (path.clone(), summary)
            })
            .collect()
    }

    /// Serialize a tree for chart consumers.
    ///
    /// `wrap` emits the one-element `[root]` sequence.
    pub fn to_json(&self, tree: &TreeNode, wrap: bool, pretty: bool) -> ApplicationResult<String> {
        let result = match (wrap, pretty) {
            (true, true) => serde_json::to_string_pretty(&tree.wrapped()),
            (true, false) => serde_json::to_string(&tree.wrapped()),
            (false, true) => serde_json::to_string_pretty(tree),
            (false, false) => serde_json::to_string(tree),
        };
        result.map_err(|e| serialize_failure("serialize tree as JSON", e))
    }

    /// Canonical outline text for a tree.
    pub fn to_outline(&self, tree: &TreeNode) -> ApplicationResult<String> {
        self.writer
            .write(tree)
            .map_err(|e| serialize_failure("serialize outline", e))
    }

    /// Rewrite a document in canonical outline form.
    pub fn format(&self, origin: &Path, text: &str) -> ApplicationResult<String> {
        let tree = self.parse(origin, text)?;
        self.to_outline(&tree)
    }

    /// Format a file in place. The file is only replaced once the new text
    /// is complete.
    #[instrument(level = "debug", skip(self))]
    pub fn format_file(&self, path: &Path) -> ApplicationResult<bool> {
        let original = self.read(path)?;
        let formatted = self.format(path, &original)?;
        if formatted == original {
            debug!("already formatted: {}", path.display());
            return Ok(false);
        }
        self.fs
            .replace(path, &formatted)
            .with_path_context("write outline", path)?;
        Ok(true)
    }

    /// Write a starter outline whose root is `root_name`.
    #[instrument(level = "debug", skip(self))]
    pub fn create(&self, path: &Path, root_name: &str, force: bool) -> ApplicationResult<TreeNode> {
        if self.fs.exists(path) && !force {
            return Err(ApplicationError::AlreadyExists(path.to_path_buf()));
        }
        if root_name.trim().is_empty() {
            return Err(ConversionError::shape("empty name").into());
        }

        let tree = starter_tree(root_name);
        let text = self.to_outline(&tree)?;
        self.fs
            .ensure_parent(path)
            .with_path_context("create directory for", path)?;
        self.fs
            .write(path, &text)
            .with_path_context("write outline", path)?;
        debug!("created {} with root '{}'", path.display(), root_name);
        Ok(tree)
    }

    fn read(&self, path: &Path) -> ApplicationResult<String> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::NotFound(path.to_path_buf()));
        }
        self.fs
            .read_to_string(path)
            .with_path_context("read outline", path)
    }
}

/// Encoding a valid tree failed.
fn serialize_failure(
    context: &str,
    source: impl std::error::Error + Send + Sync + 'static,
) -> ApplicationError {
    ApplicationError::OperationFailed {
        context: context.to_string(),
        source: Box::new(source),
    }
}

fn starter_tree(root_name: &str) -> TreeNode {
    TreeNode::branch(
        root_name,
        vec![
            TreeNode::leaf("First idea"),
            TreeNode::branch(
                "Topic",
                vec![TreeNode::leaf("Detail A"), TreeNode::leaf("Detail B")],
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DocumentError;
    use crate::domain::RawValue;
    use crate::infrastructure::traits::RealFileSystem;
    use crate::infrastructure::yaml::YamlDeserializer;

    struct FailingDeserializer;

    impl DocumentDeserializer for FailingDeserializer {
        fn deserialize(&self, _text: &str) -> Result<RawValue, DocumentError> {
            Err(DocumentError::at("unexpected end of stream", 4, 1))
        }
    }

    fn service() -> OutlineService {
        OutlineService::new(Arc::new(RealFileSystem), Arc::new(YamlDeserializer), 1000)
    }

    #[test]
    fn given_deserializer_failure_when_converting_then_document_error() {
        let service =
            OutlineService::new(Arc::new(RealFileSystem), Arc::new(FailingDeserializer), 1000);
        let err = service.convert("Root: [a]").unwrap_err();
        assert!(matches!(err, ConversionError::Document { .. }));
        assert_eq!(err.location().map(|l| l.line), Some(4));
    }

    #[test]
    fn given_writer_failure_when_mapped_then_operation_failed_not_conversion() {
        let err = serialize_failure("serialize outline", DocumentError::new("emitter failed"));
        assert!(matches!(err, ApplicationError::OperationFailed { .. }));
        assert_eq!(err.conversion(), None);
        assert_eq!(err.to_string(), "operation failed: serialize outline");
    }

    #[test]
    fn given_starter_tree_when_written_then_converts_back() {
        let service = service();
        let text = service.to_outline(&starter_tree("Plan")).unwrap();
        assert_eq!(service.convert(&text).unwrap(), starter_tree("Plan"));
    }

    #[test]
    fn given_tree_when_to_json_unwrapped_then_object() {
        let service = service();
        let tree = TreeNode::branch("R", vec![TreeNode::leaf("a")]);
        assert_eq!(
            service.to_json(&tree, false, false).unwrap(),
            r#"{"name":"R","children":[{"name":"a"}]}"#
        );
        assert_eq!(
            service.to_json(&tree, true, false).unwrap(),
            r#"[{"name":"R","children":[{"name":"a"}]}]"#
        );
    }
}
