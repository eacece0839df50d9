use serde_json::json;

use super::*;
use crate::form::Form;

fn offers_path() -> FieldPath {
    FieldPath::for_kind("extras", "offers")
}

// =============================================================
// resolve_index
// =============================================================

#[test]
fn resolve_prefers_current_id_position() {
    let records = vec![json!({ "id": "b" }), json!({ "id": "a" }), json!({ "id": "c" })];
    assert_eq!(resolve_index(&records, &json!({ "id": "a" }), 0), 1);
}

#[test]
fn resolve_without_id_uses_rendered_index() {
    let records = vec![json!({ "title": "x" }), json!({ "title": "y" })];
    assert_eq!(resolve_index(&records, &json!({ "title": "y" }), 1), 1);
    assert_eq!(resolve_index(&records, &json!({ "id": null }), 0), 0);
}

#[test]
fn resolve_id_miss_falls_back_to_index() {
    let records = vec![json!({ "id": "a" })];
    assert_eq!(resolve_index(&records, &json!({ "id": "gone" }), 0), 0);
}

#[test]
fn resolve_matches_numeric_ids() {
    let records = vec![json!({ "id": 7 }), json!({ "id": 9 })];
    assert_eq!(resolve_index(&records, &json!({ "id": 9 }), 0), 1);
}

// =============================================================
// delete_item
// =============================================================

#[test]
fn delete_commits_immediately() {
    let mut form = Form::new(json!({ "extras": { "offers": [{ "id": "a" }, { "id": "b" }] } }));
    let removed = delete_item(&mut form, &offers_path(), &json!({ "id": "a" }), 0).unwrap();
    assert_eq!(removed, json!({ "id": "a" }));
    assert_eq!(form.value_at(&offers_path()), Some(&json!([{ "id": "b" }])));
}

#[test]
fn delete_uses_id_after_reorder() {
    let mut form = Form::new(json!({ "extras": { "offers": [{ "id": "b" }, { "id": "a" }, { "id": "c" }] } }));
    delete_item(&mut form, &offers_path(), &json!({ "id": "a" }), 0).unwrap();
    assert_eq!(form.value_at(&offers_path()), Some(&json!([{ "id": "b" }, { "id": "c" }])));
}

#[test]
fn delete_out_of_range_leaves_form() {
    let mut form = Form::new(json!({ "extras": { "offers": [{ "title": "x" }] } }));
    let err = delete_item(&mut form, &offers_path(), &json!({}), 3).unwrap_err();
    assert_eq!(err, ListError::IndexOutOfRange { index: 3, len: 1 });
    assert_eq!(form.value_at(&offers_path()), Some(&json!([{ "title": "x" }])));
}

#[test]
fn delete_from_missing_list_is_out_of_range() {
    let mut form = Form::new(json!({}));
    let err = delete_item(&mut form, &offers_path(), &json!({}), 0).unwrap_err();
    assert_eq!(err, ListError::IndexOutOfRange { index: 0, len: 0 });
}

#[test]
fn records_at_rejects_non_list() {
    let form = Form::new(json!({ "extras": { "offers": { "title": "x" } } }));
    let err = records_at(&form, &offers_path()).unwrap_err();
    assert_eq!(err, ListError::NotASequence("extras.offers".to_owned()));
}

// =============================================================
// ListView
// =============================================================

#[test]
fn entries_are_most_recent_first_with_storage_indices() {
    let records = vec![json!({ "title": "first" }), json!({ "title": "second" })];
    let view = ListView::new(ItemClass::Offer, &records);
    let entries = view.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].index, 1);
    assert_eq!(entries[0].summary.title, "second");
    assert_eq!(entries[1].index, 0);
    assert_eq!(entries[1].summary.title, "first");
    assert!(view.placeholder().is_none());
}

#[test]
fn empty_list_shows_placeholder() {
    let view = ListView::new(ItemClass::Blog, &[]);
    assert!(view.is_empty());
    assert_eq!(view.placeholder(), Some("List is empty"));
    assert!(view.entries().is_empty());
}
