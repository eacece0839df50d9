use serde_json::json;

use super::*;

const PARENT: &str = "extras";

fn session() -> (Orchestrator, Form) {
    let catalog = Catalog::builtin();
    let form = Form::new(json!({})).with_validation(PARENT, catalog.clone());
    (Orchestrator::new(catalog, PARENT), form)
}

fn replay(orchestrator: &mut Orchestrator, form: &mut Form, script: &str) -> (Result<(), CliError>, String) {
    let mut notices = Vec::new();
    let result = run_script(orchestrator, form, script.as_bytes(), Path::new("script.jsonl"), &mut notices);
    (result, String::from_utf8(notices).unwrap())
}

// =============================================================
// run_script
// =============================================================

#[test]
fn script_replays_a_full_offer_session() {
    let (mut orchestrator, mut form) = session();
    let script = r#"# open offers and add one
{"op":"select","kind":"offers"}
{"op":"gallery_exited"}

{"op":"start_create"}
{"op":"done"}
{"op":"set_field","field":"title","value":"Tutoring"}
{"op":"done"}
{"op":"close"}
{"op":"editor_exited"}
"#;
    let (result, notices) = replay(&mut orchestrator, &mut form, script);
    result.unwrap();

    assert_eq!(notices.lines().count(), 1);
    assert!(notices.starts_with("line 6: "));
    assert!(notices.contains("Title is required"));
    assert!(orchestrator.show_gallery());

    let offers = form.values()["extras"]["offers"].as_array().unwrap();
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0]["title"], json!("Tutoring"));
}

#[test]
fn comments_and_blank_lines_count_toward_line_numbers() {
    let (mut orchestrator, mut form) = session();
    let script = "# nothing open yet\n\n{\"op\":\"done\"}\n";
    let (result, _) = replay(&mut orchestrator, &mut form, script);
    let err = result.unwrap_err();
    assert!(matches!(err, CliError::Command { line: 3, source: EditorError::InvalidTransition { .. } }));
    assert!(err.to_string().starts_with("script line 3:"));
}

#[test]
fn malformed_command_reports_its_line() {
    let (mut orchestrator, mut form) = session();
    let script = "{\"op\":\"select\",\"kind\":\"blog\"}\n{\"op\":\"explode\"}\n{\"op\":\"gallery_exited\"}\n";
    let (result, _) = replay(&mut orchestrator, &mut form, script);
    assert!(matches!(result, Err(CliError::Script { line: 2, .. })));
    assert!(matches!(orchestrator.stage(), extras::Stage::TransitioningOut { .. }));
}

#[test]
fn empty_script_leaves_form_untouched() {
    let (mut orchestrator, mut form) = session();
    let (result, notices) = replay(&mut orchestrator, &mut form, "\n# only a comment\n");
    result.unwrap();
    assert!(notices.is_empty());
    assert_eq!(form.values(), &json!({}));
}

// =============================================================
// Catalogs
// =============================================================

#[test]
fn catalog_format_follows_extension() {
    let json = r#"{"kinds":[{"name":"site","label":"Website","single":true,"fields":[{"name":"url","type":"text"}]}]}"#;
    let catalog = parse_catalog(json, Some("json")).unwrap();
    assert_eq!(catalog.get("site").unwrap().label, "Website");

    let yaml = "kinds:\n  - name: site\n    label: Website\n    single: true\n    fields:\n      - name: url\n        type: text\n";
    assert!(parse_catalog(yaml, Some("yaml")).unwrap().get("site").is_some());
    assert!(parse_catalog(yaml, Some("yml")).unwrap().get("site").is_some());
    assert!(parse_catalog(yaml, None).unwrap().get("site").is_some());
}

#[test]
fn yaml_text_under_json_extension_is_rejected() {
    let yaml = "kinds: []\n";
    assert!(matches!(parse_catalog(yaml, Some("json")), Err(CliError::Catalog(CatalogError::Json(_)))));
}

#[test]
fn missing_catalog_uses_builtin_kinds() {
    let catalog = load_catalog(None).unwrap();
    assert!(catalog.get("offers").is_some());
}

#[test]
fn unreadable_catalog_names_the_path() {
    let err = load_catalog(Some(Path::new("no/such/catalog.yaml"))).unwrap_err();
    assert!(matches!(err, CliError::Read { .. }));
    assert!(err.to_string().contains("no/such/catalog.yaml"));
}
