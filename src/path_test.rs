use serde_json::json;

use super::*;

// =============================================================
// Parsing
// =============================================================

#[test]
fn parse_keys_and_indices() {
    let path = FieldPath::parse("extras.blog[2].title").unwrap();
    assert_eq!(
        path.segments(),
        &[
            Segment::Key("extras".to_owned()),
            Segment::Key("blog".to_owned()),
            Segment::Index(2),
            Segment::Key("title".to_owned()),
        ]
    );
}

#[test]
fn parse_consecutive_indices() {
    let path = FieldPath::parse("grid[1][0]").unwrap();
    assert_eq!(path.segments(), &[Segment::Key("grid".to_owned()), Segment::Index(1), Segment::Index(0)]);
}

#[test]
fn parse_rejects_empty() {
    assert_eq!(FieldPath::parse(""), Err(PathError::Empty));
}

#[test]
fn parse_rejects_malformed_input() {
    for input in ["extras.", ".extras", "extras..blog", "blog[", "blog[]", "blog[x]", "blog]", "[0]", "blog[0]x"] {
        let err = FieldPath::parse(input).unwrap_err();
        assert!(matches!(err, PathError::Malformed { .. }), "{input} gave {err:?}");
    }
}

#[test]
fn display_matches_parse_input() {
    for input in ["extras", "extras.twitter.handle", "extras.offers[0].price", "a[0][1].b"] {
        assert_eq!(FieldPath::parse(input).unwrap().to_string(), input);
    }
}

#[test]
fn builder_matches_parsed_path() {
    let built = FieldPath::for_kind("extras", "offers").index(3).key("price");
    assert_eq!(built, "extras.offers[3].price".parse::<FieldPath>().unwrap());
}

// =============================================================
// Reading
// =============================================================

#[test]
fn get_reads_nested_values() {
    let root = json!({ "extras": { "offers": [{ "title": "a" }, { "title": "b" }] } });
    let path = FieldPath::parse("extras.offers[1].title").unwrap();
    assert_eq!(path.get(&root), Some(&json!("b")));
}

#[test]
fn get_missing_segments_is_none() {
    let root = json!({ "extras": { "offers": [] } });
    assert!(FieldPath::parse("extras.offers[0].title").unwrap().get(&root).is_none());
    assert!(FieldPath::parse("extras.blog").unwrap().get(&root).is_none());
    assert!(FieldPath::parse("extras.offers.title").unwrap().get(&root).is_none());
}

// =============================================================
// Writing
// =============================================================

#[test]
fn set_creates_missing_objects() {
    let mut root = json!({});
    FieldPath::parse("extras.twitter.handle")
        .unwrap()
        .set(&mut root, json!("alice"))
        .unwrap();
    assert_eq!(root, json!({ "extras": { "twitter": { "handle": "alice" } } }));
}

#[test]
fn set_replaces_null_with_required_container() {
    let mut root = json!({ "extras": null });
    FieldPath::parse("extras.offers[0].title")
        .unwrap()
        .set(&mut root, json!("x"))
        .unwrap();
    assert_eq!(root, json!({ "extras": { "offers": [{ "title": "x" }] } }));
}

#[test]
fn set_appends_at_array_length() {
    let mut root = json!({ "items": [1, 2] });
    FieldPath::parse("items[2]").unwrap().set(&mut root, json!(3)).unwrap();
    assert_eq!(root, json!({ "items": [1, 2, 3] }));
}

#[test]
fn set_rejects_gap_past_array_end() {
    let mut root = json!({ "items": [1] });
    let err = FieldPath::parse("items[5]").unwrap().set(&mut root, json!(3)).unwrap_err();
    assert_eq!(err, PathError::IndexOutOfRange { at: "items".to_owned(), index: 5, len: 1 });
}

#[test]
fn set_rejects_descending_into_scalar() {
    let mut root = json!({ "extras": "oops" });
    let err = FieldPath::parse("extras.blog").unwrap().set(&mut root, json!([])).unwrap_err();
    assert_eq!(err, PathError::NotAContainer { at: "extras".to_owned(), found: "a string" });
}

#[test]
fn set_on_empty_path_is_error() {
    let mut root = json!({});
    assert_eq!(FieldPath::new().set(&mut root, json!(1)), Err(PathError::Empty));
}

// =============================================================
// Removing
// =============================================================

#[test]
fn remove_object_member() {
    let mut root = json!({ "extras": { "twitter": { "handle": "a" }, "blog": [] } });
    let removed = FieldPath::for_kind("extras", "twitter").remove(&mut root);
    assert_eq!(removed, Some(json!({ "handle": "a" })));
    assert_eq!(root, json!({ "extras": { "blog": [] } }));
}

#[test]
fn remove_array_element_shifts_rest() {
    let mut root = json!({ "items": ["a", "b", "c"] });
    let removed = FieldPath::parse("items[0]").unwrap().remove(&mut root);
    assert_eq!(removed, Some(json!("a")));
    assert_eq!(root, json!({ "items": ["b", "c"] }));
}

#[test]
fn remove_missing_is_none_and_leaves_tree() {
    let mut root = json!({ "items": [] });
    assert!(FieldPath::parse("items[0]").unwrap().remove(&mut root).is_none());
    assert!(FieldPath::parse("other.thing").unwrap().remove(&mut root).is_none());
    assert_eq!(root, json!({ "items": [] }));
}
