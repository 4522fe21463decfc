//! Template import, export and application

use plume_babel::library::template::UNTITLED_TEMPLATE;
use plume_babel::library::{
    apply_template, export_template_json, parse_template_import, NewTemplate, StyleTemplate,
    TemplateSource,
};
use plume_babel::style::{StyleConfig, StyleField, StylePatch, SAMPLE_MARKDOWN};

// ============================================================================
// IMPORT
// ============================================================================

#[test]
fn test_import_reports_every_bad_field() {
    let err = parse_template_import(r#"{"name": "  ", "tags": "warm", "description": 3}"#)
        .unwrap_err();
    let fields: Vec<&str> = err.issues.iter().map(|i| i.field.as_str()).collect();
    assert_eq!(fields, vec!["name", "globalStyleConfig", "description", "tags"]);
    assert!(err.message.starts_with("Template import failed"));
}

#[test]
fn test_import_accepts_html_import_source() {
    let template = parse_template_import(
        r##"{
            "id": "tpl_old",
            "name": " Warm ",
            "sourceType": "html_import",
            "tags": ["a", " ", "b"],
            "globalStyleConfig": {"h2Size": 30, "primaryColor": "nope", "unknown": 1},
            "version": 9
        }"##,
    )
    .unwrap();

    assert_eq!(template.name, "Warm");
    assert_ne!(template.id, "tpl_old");
    assert!(template.id.starts_with("tpl_"));
    assert_eq!(template.version, 1);
    assert_eq!(template.source_type, TemplateSource::HtmlImport);
    assert_eq!(template.tags, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(template.global_style_config.h2_size, 30.0);
    assert_eq!(
        template.global_style_config.primary_color,
        StyleConfig::default().primary_color
    );
    assert_eq!(template.preview_markdown, SAMPLE_MARKDOWN);
}

#[test]
fn test_unknown_source_type_is_manual() {
    let template =
        parse_template_import(r#"{"name": "x", "globalStyleConfig": {}, "sourceType": "fax"}"#)
            .unwrap();
    assert_eq!(template.source_type, TemplateSource::Manual);
}

#[test]
fn test_import_errors_serialize() {
    let err = parse_template_import("[1, 2]").unwrap_err();
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["issues"][0]["field"], "root");
}

// ============================================================================
// EXPORT / APPLY
// ============================================================================

#[test]
fn test_export_then_import_keeps_content() {
    let original = StyleTemplate::create(
        NewTemplate::new("Ocean")
            .with_description("blue")
            .with_tags(vec!["cool".into()])
            .with_config(StylePatch::new().with(StyleField::H3Size, 22.0)),
    );
    let json = export_template_json(&original).unwrap();
    assert!(json.contains("\"globalStyleConfig\""));
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["globalStyleConfig"]["h3Size"].as_f64(), Some(22.0));

    let imported = parse_template_import(&json).unwrap();
    assert_eq!(imported.name, original.name);
    assert_eq!(imported.description, original.description);
    assert_eq!(imported.tags, original.tags);
    assert_eq!(imported.global_style_config, original.global_style_config);
    assert_ne!(imported.id, original.id);
}

#[test]
fn test_apply_keeps_undo_snapshot() {
    let mut current = StyleConfig::default();
    current.h2_size = 33.0;
    let template = StyleTemplate::create(
        NewTemplate::new("").with_config(StylePatch::new().with(StyleField::H2Size, 20.0)),
    );
    assert_eq!(template.name, UNTITLED_TEMPLATE);

    let applied = apply_template(&current, &template);
    assert_eq!(applied.next_style_config.h2_size, 20.0);
    assert_eq!(applied.undo_snapshot, current);
}
