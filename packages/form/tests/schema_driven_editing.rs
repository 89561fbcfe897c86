//! End-to-end: inference → rendering → editing, with no declared schema

use pagecraft_form::{append_tag, remove_tag, render, Widget};
use pagecraft_schema::{FieldKind, SchemaRegistry};
use serde_json::json;

#[test]
fn undeclared_block_type_is_fully_editable_from_inference() {
    let registry = SchemaRegistry::default();
    let mut content = json!({ "title": "x", "tags": ["a", "b"] });

    // no declared schema for this block type: inference takes over
    let schema = registry.resolve("quote-wall", &content);
    assert_eq!(schema.properties["title"].kind, FieldKind::Text);
    assert_eq!(schema.properties["tags"].kind, FieldKind::TagList);

    let form = render(&schema, &content);
    match form.find("tags").unwrap() {
        Widget::TagList { tags, .. } => assert_eq!(tags, &vec!["a".to_string(), "b".to_string()]),
        other => panic!("expected tag list widget, got {other:?}"),
    }

    // editing tags must not disturb the sibling field
    append_tag(&mut content, "tags", "c").unwrap();
    remove_tag(&mut content, "tags", 0).unwrap();
    assert_eq!(content, json!({ "title": "x", "tags": ["b", "c"] }));

    // the same schema still renders the updated value
    let form = render(&schema, &content);
    match form.find("tags").unwrap() {
        Widget::TagList { tags, .. } => assert_eq!(tags, &vec!["b".to_string(), "c".to_string()]),
        other => panic!("expected tag list widget, got {other:?}"),
    }
    match form.find("title").unwrap() {
        Widget::Text { value, .. } => assert_eq!(value, "x"),
        other => panic!("expected text widget, got {other:?}"),
    }
}
