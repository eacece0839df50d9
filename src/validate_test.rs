use serde_json::json;

use super::*;
use crate::schema::FieldType;

fn offers() -> KindDescriptor {
    Catalog::builtin().get("offers").unwrap().clone()
}

// =============================================================
// has_errors
// =============================================================

#[test]
fn has_errors_empty_nodes_are_clean() {
    assert!(!has_errors(None));
    assert!(!has_errors(Some(&json!(null))));
    assert!(!has_errors(Some(&json!({}))));
    assert!(!has_errors(Some(&json!([]))));
    assert!(!has_errors(Some(&json!(""))));
}

#[test]
fn has_errors_non_empty_nodes_block() {
    assert!(has_errors(Some(&json!({ "title": "Title is required" }))));
    assert!(has_errors(Some(&json!([null]))));
    assert!(has_errors(Some(&json!("bad"))));
}

// =============================================================
// field_error
// =============================================================

#[test]
fn required_field_rejects_blank_and_missing() {
    let field = FieldDescriptor::new("title", FieldType::Text).label("Title").required();
    assert_eq!(field_error(&field, None).as_deref(), Some("Title is required"));
    assert_eq!(field_error(&field, Some(&json!("  "))).as_deref(), Some("Title is required"));
    assert!(field_error(&field, Some(&json!("Consulting"))).is_none());
}

#[test]
fn optional_missing_field_is_clean() {
    let field = FieldDescriptor::new("price", FieldType::Number);
    assert!(field_error(&field, None).is_none());
    assert!(field_error(&field, Some(&json!(null))).is_none());
}

#[test]
fn number_field_checks_type_and_minimum() {
    let field = FieldDescriptor::new("price", FieldType::Number).label("Price").min(0.0);
    assert!(field_error(&field, Some(&json!(5))).is_none());
    assert_eq!(field_error(&field, Some(&json!("5"))).as_deref(), Some("Price must be a number"));
    assert_eq!(field_error(&field, Some(&json!(-1))).as_deref(), Some("Price must be at least 0"));
}

#[test]
fn gallery_field_requires_string_list() {
    let field = FieldDescriptor::new("gallery", FieldType::Gallery);
    assert!(field_error(&field, Some(&json!(["a", "b"]))).is_none());
    assert_eq!(
        field_error(&field, Some(&json!([1]))).as_deref(),
        Some("gallery must be a list of image URLs")
    );
    assert!(field_error(&field, Some(&json!("a"))).is_some());
}

#[test]
fn text_field_requires_string() {
    let field = FieldDescriptor::new("handle", FieldType::Text);
    assert!(field_error(&field, Some(&json!(3))).is_some());
}

// =============================================================
// kind_errors / form_errors
// =============================================================

#[test]
fn multi_kind_errors_align_with_records() {
    let value = json!([{ "title": "ok", "price": 1 }, { "title": "", "price": 1 }]);
    let errors = kind_errors(&offers(), Some(&value)).unwrap();
    assert_eq!(errors, json!([null, { "title": "Title is required" }]));
}

#[test]
fn clean_multi_kind_has_no_error_node() {
    let value = json!([{ "title": "ok" }]);
    assert!(kind_errors(&offers(), Some(&value)).is_none());
    assert!(kind_errors(&offers(), None).is_none());
}

#[test]
fn single_kind_errors_are_an_object() {
    let mut twitter = Catalog::builtin().get("twitter").unwrap().clone();
    twitter.fields[0].required = true;
    let errors = kind_errors(&twitter, Some(&json!({ "handle": "" }))).unwrap();
    assert_eq!(errors, json!({ "handle": "Handle is required" }));
}

#[test]
fn form_errors_only_lists_failing_kinds() {
    let values = json!({
        "extras": {
            "offers": [{ "title": "" }],
            "blog": [{ "title": "Hello" }],
            "twitter": { "handle": "alice" }
        }
    });
    let errors = form_errors("extras", &Catalog::builtin(), &values);
    assert_eq!(errors, json!({ "extras": { "offers": [{ "title": "Title is required" }] } }));
}

#[test]
fn form_errors_without_parent_is_empty() {
    assert_eq!(form_errors("extras", &Catalog::builtin(), &json!({})), json!({}));
}
