use serde_json::json;

use super::*;

// =============================================================
// ItemClass
// =============================================================

#[test]
fn item_class_serde_uses_lowercase_tags() {
    assert_eq!(serde_json::to_string(&ItemClass::Offer).unwrap(), "\"offer\"");
    let back: ItemClass = serde_json::from_str("\"wanted\"").unwrap();
    assert_eq!(back, ItemClass::Wanted);
    assert!(serde_json::from_str::<ItemClass>("\"tweet\"").is_err());
}

#[test]
fn item_class_as_str_matches_serde_tag() {
    for class in [ItemClass::Blog, ItemClass::Offer, ItemClass::Wanted] {
        assert_eq!(serde_json::to_string(&class).unwrap(), format!("\"{}\"", class.as_str()));
    }
}

// =============================================================
// summarize
// =============================================================

#[test]
fn blog_summary_uses_title_and_body_excerpt() {
    let record = json!({
        "title": "Launch notes",
        "markdown": "We shipped   the\nthing.",
        "gallery": ["https://img/1.png", "https://img/2.png"],
    });
    let summary = summarize(ItemClass::Blog, &record);
    assert_eq!(summary.title, "Launch notes");
    assert_eq!(summary.detail.as_deref(), Some("We shipped the thing."));
    assert_eq!(summary.thumbnail.as_deref(), Some("https://img/1.png"));
    assert_eq!(summary.image_count, 2);
}

#[test]
fn blank_titles_fall_back_per_class() {
    let record = json!({ "title": "   " });
    assert_eq!(summarize(ItemClass::Blog, &record).title, "Untitled post");
    assert_eq!(summarize(ItemClass::Offer, &record).title, "Untitled offer");
    assert_eq!(summarize(ItemClass::Wanted, &record).title, "Untitled request");
}

#[test]
fn offer_and_wanted_show_positive_prices_only() {
    let priced = json!({ "title": "Consulting", "price": 250 });
    assert_eq!(summarize(ItemClass::Offer, &priced).detail.as_deref(), Some("Price: 250"));
    assert_eq!(summarize(ItemClass::Wanted, &priced).detail.as_deref(), Some("Budget: 250"));

    let free = json!({ "title": "Consulting", "price": 0 });
    assert!(summarize(ItemClass::Offer, &free).detail.is_none());

    let fractional = json!({ "price": 2.5 });
    assert_eq!(summarize(ItemClass::Offer, &fractional).detail.as_deref(), Some("Price: 2.5"));
}

#[test]
fn summary_ignores_blank_gallery_entries() {
    let record = json!({ "gallery": ["", "  ", "https://img/x.png", 7] });
    let summary = summarize(ItemClass::Offer, &record);
    assert_eq!(summary.image_count, 1);
    assert_eq!(summary.thumbnail.as_deref(), Some("https://img/x.png"));
}

#[test]
fn summary_of_non_object_record_is_placeholder() {
    let summary = summarize(ItemClass::Wanted, &json!(null));
    assert_eq!(summary.title, "Untitled request");
    assert!(summary.detail.is_none());
    assert!(summary.thumbnail.is_none());
    assert_eq!(summary.image_count, 0);
}

// =============================================================
// excerpt
// =============================================================

#[test]
fn excerpt_keeps_short_text() {
    assert_eq!(excerpt("short", 10), "short");
}

#[test]
fn excerpt_truncates_with_ellipsis() {
    let out = excerpt("abcdefghij klmnop", 8);
    assert_eq!(out, "abcdefg…");
    assert_eq!(out.chars().count(), 8);
}

#[test]
fn excerpt_trims_space_before_ellipsis() {
    assert_eq!(excerpt("abc def", 5), "abc…");
}
