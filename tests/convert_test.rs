//! Tests for outline → tree conversion through the public `convert` API

use mindtree::util::testing;
use mindtree::{convert, convert_with_max_depth, ConversionError, TreeNode, DEFAULT_MAX_DEPTH};
use rstest::rstest;

const COMPANY: &str = r#"
Company:
  - CEO
  - name: Engineering
    []:
      - name: Backend
        []:
          - API
          - Database
      - Frontend
"#;

fn company_tree() -> TreeNode {
    TreeNode::branch(
        "Company",
        vec![
            TreeNode::leaf("CEO"),
            TreeNode::branch(
                "Engineering",
                vec![
                    TreeNode::branch(
                        "Backend",
                        vec![TreeNode::leaf("API"), TreeNode::leaf("Database")],
                    ),
                    TreeNode::leaf("Frontend"),
                ],
            ),
        ],
    )
}

// ============================================================
// Scenario
// ============================================================

#[test]
fn given_company_outline_when_converting_then_returns_expected_tree() {
    testing::init_test_setup();
    let tree = convert(COMPANY).unwrap();
    assert_eq!(tree, company_tree());
}

#[test]
fn given_company_outline_when_serialized_then_matches_consumer_shape() {
    let tree = convert(COMPANY).unwrap();
    let json = serde_json::to_value(&tree).unwrap();
    let expected = serde_json::json!({
        "name": "Company",
        "children": [
            {"name": "CEO"},
            {"name": "Engineering", "children": [
                {"name": "Backend", "children": [{"name": "API"}, {"name": "Database"}]},
                {"name": "Frontend"}
            ]}
        ]
    });
    assert_eq!(json, expected);
}

#[test]
fn given_readme_example_when_converting_then_grandchildren_nested() {
    let text = "Root:\n  - Child A\n  - name: Child B\n    []:\n      - Grandchild 1\n      - Grandchild 2\n";
    let tree = convert(text).unwrap();
    let child_b = &tree.children().unwrap()[1];
    assert_eq!(child_b.name(), "Child B");
    assert_eq!(
        child_b.children().unwrap(),
        &[TreeNode::leaf("Grandchild 1"), TreeNode::leaf("Grandchild 2")]
    );
}

// ============================================================
// Leaf vs declared-empty
// ============================================================

#[test]
fn given_empty_marker_when_converting_then_children_present_and_empty() {
    let tree = convert("Root:\n  - name: Empty\n    []: []\n  - Plain\n").unwrap();
    let children = tree.children().unwrap();
    assert_eq!(children[0].children(), Some(&[][..]));
    assert!(!children[0].is_leaf());
    assert!(children[1].is_leaf());

    let json = serde_json::to_string(&tree).unwrap();
    assert!(json.contains(r#"{"name":"Empty","children":[]}"#), "{json}");
    assert!(json.contains(r#"{"name":"Plain"}"#), "{json}");
}

#[test]
fn given_named_mapping_without_marker_when_converting_then_leaf() {
    let tree = convert("Root:\n  - name: Solo\n").unwrap();
    assert_eq!(tree.children().unwrap(), &[TreeNode::leaf("Solo")]);
}

#[test]
fn given_quoted_marker_when_converting_then_same_as_plain() {
    let plain = convert("Root:\n  - name: a\n    []:\n      - b\n").unwrap();
    let quoted = convert("Root:\n  - name: a\n    '[]':\n      - b\n").unwrap();
    assert_eq!(plain, quoted);
}

#[test]
fn given_numeric_and_bool_labels_when_converting_then_text_names() {
    let tree = convert("2024:\n  - 1\n  - true\n  - name: 3.5\n").unwrap();
    assert_eq!(tree.name(), "2024");
    let names: Vec<&str> = tree.children().unwrap().iter().map(TreeNode::name).collect();
    assert_eq!(names, vec!["1", "true", "3.5"]);
}

#[test]
fn given_extra_top_level_keys_when_converting_then_first_wins() {
    let tree = convert("First:\n  - a\nSecond:\n  - b\n").unwrap();
    assert_eq!(tree, TreeNode::branch("First", vec![TreeNode::leaf("a")]));
}

#[test]
fn given_order_when_converting_then_siblings_keep_input_order() {
    let tree = convert("R:\n  - z\n  - a\n  - m\n  - name: b\n    []: [y, c, x]\n").unwrap();
    let top: Vec<&str> = tree.children().unwrap().iter().map(TreeNode::name).collect();
    assert_eq!(top, vec!["z", "a", "m", "b"]);
    assert_eq!(tree.leaf_names(), vec!["z", "a", "m", "y", "c", "x"]);
}

// ============================================================
// Shape violations
// ============================================================

#[rstest]
#[case::scalar_document("just text", "missing root mapping")]
#[case::sequence_document("- a\n- b\n", "missing root mapping")]
#[case::empty_mapping("{}", "missing root mapping")]
#[case::scalar_root_value("Root: value\n", "root value is not a sequence")]
#[case::mapping_root_value("Root:\n  name: x\n", "root value is not a sequence")]
#[case::item_missing_name("Root:\n  - a\n  - []: [b]\n", "item missing name")]
#[case::marker_scalar("Root:\n  - name: a\n    []: b\n", "'[]' value is not a sequence")]
#[case::marker_mapping("Root:\n  - name: a\n    []:\n      x: y\n", "'[]' value is not a sequence")]
#[case::deep_missing_name(
    "Root:\n  - name: a\n    []:\n      - name: b\n        []:\n          - label: c\n",
    "item missing name"
)]
#[case::null_item("Root:\n  - a\n  -\n", "empty name")]
#[case::name_is_list("Root:\n  - name: [a, b]\n", "name is not a scalar")]
fn given_shape_violation_when_converting_then_shape_error(
    #[case] text: &str,
    #[case] reason: &str,
) {
    assert_eq!(convert(text), Err(ConversionError::shape(reason)));
}

// ============================================================
// Document errors
// ============================================================

#[test]
fn given_syntax_error_when_converting_then_document_error_with_location() {
    let err = convert("Root:\n  - a: b: c\n").unwrap_err();
    match &err {
        ConversionError::Document { location, .. } => {
            let location = location.expect("syntax errors carry a location");
            assert_eq!(location.line, 2);
        }
        other => panic!("expected document error, got {other:?}"),
    }
}

#[test]
fn given_duplicate_root_keys_when_converting_then_document_error() {
    let err = convert("Root:\n  - a\nRoot:\n  - b\n").unwrap_err();
    assert!(matches!(err, ConversionError::Document { .. }), "{err:?}");
}

#[test]
fn given_empty_text_when_converting_then_fails() {
    assert!(convert("").is_err());
}

// ============================================================
// Depth guard
// ============================================================

/// `levels` nested `[]` markers below the root, block style with compact
/// indentation
fn nested_outline(levels: usize) -> String {
    let mut text = String::from("Root:\n");
    let mut indent = String::new();
    for level in 0..levels {
        text.push_str(&format!("{indent}- name: level{level}\n{indent}  []:\n"));
        indent.push_str("  ");
    }
    text.push_str(&format!("{indent}- bottom\n"));
    text
}

#[test]
fn given_nesting_within_limit_when_converting_then_succeeds() {
    let tree = convert_with_max_depth(&nested_outline(5), 5).unwrap();
    assert_eq!(tree.depth(), 7);
    assert_eq!(tree.leaf_names(), vec!["bottom"]);
}

#[test]
fn given_nesting_beyond_limit_when_converting_then_depth_exceeded() {
    assert_eq!(
        convert_with_max_depth(&nested_outline(6), 5),
        Err(ConversionError::DepthExceeded(6))
    );
}

#[test]
fn given_nesting_deeper_than_common_parser_limits_when_converting_then_succeeds() {
    let tree = convert(&nested_outline(100)).unwrap();
    assert_eq!(tree.depth(), 102);
}

#[test]
fn given_nesting_at_default_limit_when_converting_then_succeeds() {
    let tree = convert(&nested_outline(DEFAULT_MAX_DEPTH)).unwrap();
    assert_eq!(tree.depth(), DEFAULT_MAX_DEPTH + 2);
    assert_eq!(tree.leaf_names(), vec!["bottom"]);
}

#[test]
fn given_nesting_one_past_default_limit_when_converting_then_depth_exceeded() {
    assert_eq!(
        convert(&nested_outline(DEFAULT_MAX_DEPTH + 1)),
        Err(ConversionError::DepthExceeded(DEFAULT_MAX_DEPTH + 1))
    );
}

#[test]
fn given_far_deeper_nesting_when_converting_then_depth_exceeded_without_overflow() {
    assert_eq!(
        convert(&nested_outline(2 * DEFAULT_MAX_DEPTH)),
        Err(ConversionError::DepthExceeded(DEFAULT_MAX_DEPTH + 1))
    );
}

// ============================================================
// Re-entrancy
// ============================================================

#[test]
fn given_concurrent_calls_when_converting_then_results_independent() {
    let documents: Vec<String> = (0..16)
        .map(|i| format!("Root{i}:\n  - leaf{i}\n  - name: node{i}\n    []: [x{i}]\n"))
        .collect();

    let results: Vec<TreeNode> = std::thread::scope(|scope| {
        let handles: Vec<_> = documents
            .iter()
            .map(|doc| scope.spawn(move || convert(doc).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, tree) in results.iter().enumerate() {
        assert_eq!(tree.name(), format!("Root{i}"));
        assert_eq!(tree.leaf_names(), vec![format!("leaf{i}"), format!("x{i}")]);
    }
}
