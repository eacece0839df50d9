use serde_json::json;

use super::*;

// =============================================================
// FieldType defaults
// =============================================================

#[test]
fn field_type_defaults() {
    assert_eq!(FieldType::Number.default_value(), json!(0));
    assert_eq!(FieldType::Gallery.default_value(), json!([]));
    assert_eq!(FieldType::Text.default_value(), json!(""));
    assert_eq!(FieldType::Textarea.default_value(), json!(""));
    assert_eq!(FieldType::Markdown.default_value(), json!(""));
}

#[test]
fn field_descriptor_deserializes_type_key() {
    let field: FieldDescriptor = serde_json::from_value(json!({ "name": "price", "type": "number", "min": 1 })).unwrap();
    assert_eq!(field.field_type, FieldType::Number);
    assert_eq!(field.min, Some(1.0));
    assert!(!field.required);
    assert_eq!(field.display_label(), "price");
}

// =============================================================
// KindDescriptor
// =============================================================

#[test]
fn blank_record_uses_type_defaults() {
    let catalog = Catalog::builtin();
    let offers = catalog.get("offers").unwrap();
    assert_eq!(
        offers.blank_record(),
        json!({ "title": "", "price": 0, "description": "", "gallery": [] })
    );
}

#[test]
fn is_blank_ignores_id_and_whitespace() {
    let catalog = Catalog::builtin();
    let offers = catalog.get("offers").unwrap();
    assert!(offers.is_blank(&json!({ "id": "x", "title": "  ", "price": 0 })));
    assert!(!offers.is_blank(&json!({ "title": "Consulting" })));
    assert!(!offers.is_blank(&json!({ "price": 10 })));
    assert!(!offers.is_blank(&json!({ "gallery": ["https://img/1.png"] })));
}

#[test]
fn item_label_falls_back_to_label() {
    let catalog = Catalog::builtin();
    assert_eq!(catalog.get("blog").unwrap().item_label(), "Post");
    assert_eq!(catalog.get("twitter").unwrap().item_label(), "Twitter");
}

// =============================================================
// Catalog
// =============================================================

#[test]
fn builtin_catalog_is_consistent() {
    let builtin = Catalog::builtin();
    let rebuilt = Catalog::new(builtin.kinds().to_vec()).unwrap();
    assert_eq!(rebuilt, builtin);
    let names = builtin.kinds().iter().map(|k| k.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, ["twitter", "blog", "offers", "wanted"]);
    assert!(builtin.get("twitter").unwrap().single);
    assert!(builtin.get("nope").is_none());
}

#[test]
fn catalog_from_yaml() {
    let yaml = r"
kinds:
  - name: github
    label: GitHub
    single: true
    fields:
      - name: username
        type: text
  - name: talks
    label: Talks
    class: blog
    fields:
      - name: title
        type: text
        required: true
";
    let catalog = Catalog::from_yaml_str(yaml).unwrap();
    assert_eq!(catalog.kinds().len(), 2);
    let talks = catalog.get("talks").unwrap();
    assert!(!talks.single);
    assert_eq!(talks.class, Some(ItemClass::Blog));
    assert!(talks.field("title").unwrap().required);
}

#[test]
fn catalog_from_json() {
    let text = r#"{"kinds":[{"name":"site","label":"Website","single":true,"fields":[{"name":"url","type":"text"}]}]}"#;
    let catalog = Catalog::from_json_str(text).unwrap();
    assert_eq!(catalog.get("site").unwrap().label, "Website");
}

#[test]
fn catalog_rejects_duplicate_kind() {
    let kind = Catalog::builtin().get("twitter").unwrap().clone();
    let err = Catalog::new(vec![kind.clone(), kind]).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateKind(name) if name == "twitter"));
}

#[test]
fn catalog_rejects_multi_kind_without_class() {
    let mut kind = Catalog::builtin().get("blog").unwrap().clone();
    kind.class = None;
    let err = Catalog::new(vec![kind]).unwrap_err();
    assert!(matches!(err, CatalogError::MissingClass(name) if name == "blog"));
}

#[test]
fn catalog_rejects_kind_without_fields() {
    let mut kind = Catalog::builtin().get("twitter").unwrap().clone();
    kind.fields.clear();
    assert!(matches!(Catalog::new(vec![kind]), Err(CatalogError::NoFields(_))));
}

#[test]
fn catalog_rejects_duplicate_field() {
    let mut kind = Catalog::builtin().get("twitter").unwrap().clone();
    kind.fields.push(FieldDescriptor::new("handle", FieldType::Text));
    assert!(matches!(Catalog::new(vec![kind]), Err(CatalogError::DuplicateField { .. })));
}

#[test]
fn catalog_yaml_syntax_error_is_reported() {
    assert!(matches!(Catalog::from_yaml_str("kinds: [ {"), Err(CatalogError::Yaml(_))));
}
