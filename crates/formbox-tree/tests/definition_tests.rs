//! Tests for loading nested form definitions into the arena.

use formbox_tree::{DefinitionError, FormTree, NodeId, NodeKind};
use serde_json::json;

#[test]
fn test_from_json_builds_nested_tree() {
    let tree = FormTree::from_json(
        r#"{
            "key": "page",
            "style": { "width_unit": "fill", "axis": "column" },
            "children": [
                {
                    "key": "header",
                    "style": { "width_unit": "fit", "axis": "row", "gap": 8 },
                    "children": [
                        { "key": "logo", "isElement": true, "widget": "image",
                          "style": { "width_unit": "px", "width": 40 } },
                        { "key": "title", "is_element": true, "widget": "text",
                          "actions": ["navigate"] }
                    ]
                }
            ]
        }"#,
    )
    .unwrap();

    let root = tree.get(NodeId::ROOT).unwrap();
    assert_eq!(root.key, "page");
    assert_eq!(root.style.get("axis"), Some(&json!("column")));

    let header = tree.find("header").unwrap();
    assert_eq!(tree.parent(header), Some(NodeId::ROOT));
    assert_eq!(tree.children(header).len(), 2);

    let logo = tree.find("logo").unwrap();
    assert!(tree.is_element(logo));
    assert_eq!(tree.style(logo).unwrap().get("width"), Some(&json!(40)));

    let title = tree.get(tree.find("title").unwrap()).unwrap();
    assert!(title.has_actions());
    assert!(matches!(&title.kind, NodeKind::Element(data) if data.widget == "text"));
}

#[test]
fn test_duplicate_keys_are_rejected() {
    let err = FormTree::from_json(
        r#"{ "key": "root", "children": [ { "key": "a" }, { "key": "a" } ] }"#,
    )
    .unwrap_err();
    assert!(matches!(err, DefinitionError::DuplicateKey(ref key) if key == "a"));
}

#[test]
fn test_element_with_children_is_rejected() {
    let err = FormTree::from_json(
        r#"{ "key": "root", "children": [
            { "key": "leaf", "is_element": true, "children": [ { "key": "x" } ] }
        ] }"#,
    )
    .unwrap_err();
    assert!(matches!(err, DefinitionError::ElementWithChildren(ref key) if key == "leaf"));
}

#[test]
fn test_malformed_json_is_reported() {
    let err = FormTree::from_json("{ not json").unwrap_err();
    assert!(matches!(err, DefinitionError::Json(_)));
    assert!(err.to_string().starts_with("malformed form definition"));
}

#[test]
fn test_definition_round_trip_preserves_structure() {
    let source = r#"{ "key": "root", "children": [
        { "key": "row", "style": { "axis": "row" }, "children": [
            { "key": "a", "is_element": true, "widget": "text" }
        ] }
    ] }"#;
    let tree = FormTree::from_json(source).unwrap();
    let definition = tree.to_definition(NodeId::ROOT).unwrap();
    let rebuilt = FormTree::from_definition(&definition).unwrap();

    assert_eq!(rebuilt.len(), tree.len());
    assert_eq!(rebuilt.to_definition(NodeId::ROOT), Some(definition));
}

#[test]
fn test_blank_fields_count_as_absent() {
    let tree = FormTree::from_json(
        r#"{ "key": "root", "style": { "mobile_width_unit": "", "mobile_axis": null, "axis": "row" } }"#,
    )
    .unwrap();
    let style = tree.style(NodeId::ROOT).unwrap();

    assert!(style.get("mobile_width_unit").is_some());
    assert!(style.present("mobile_width_unit").is_none());
    assert!(style.present("mobile_axis").is_none());
    assert!(style.present("axis").is_some());
}
