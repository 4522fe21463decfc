//! Per-element preset extraction

use plume_babel::inspect::extract::{no_fields_warning, NOTHING_EXTRACTED};
use plume_babel::inspect::extract_presets;
use plume_babel::style::{ElementKind, StyleConfig, StyleField, StyleValue};

#[test]
fn test_presets_per_kind_in_order() {
    let html = r#"
        <p style="font-size:17px">intro</p>
        <h1 style="font-size:34px">Title</h1>
        <blockquote style="background:#f5f5f5;font-size:14px">q</blockquote>
        <h2 style="color:#112233">Sub</h2>
    "#;
    let result = extract_presets(html, &StyleConfig::default()).unwrap();

    let kinds: Vec<ElementKind> = result.presets.iter().map(|p| p.element_type).collect();
    assert_eq!(
        kinds,
        vec![ElementKind::H1, ElementKind::H2, ElementKind::P, ElementKind::Blockquote]
    );
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);

    let h1 = &result.presets[0];
    assert_eq!(h1.config_patch.get(StyleField::H1Size), Some(&StyleValue::Number(34.0)));
    assert_eq!(h1.config_patch.len(), 1);
    assert_eq!(h1.source_stats.matched_nodes, 1);

    let p = &result.presets[2];
    assert_eq!(p.config_patch.get(StyleField::BodyFontSize), Some(&StyleValue::Number(17.0)));

    let quote = &result.presets[3];
    assert_eq!(
        quote.config_patch.get(StyleField::QuoteBgColor),
        Some(&StyleValue::Text("#f5f5f5".into()))
    );
}

#[test]
fn test_unstyled_kinds_warn_then_report_nothing_extracted() {
    let result = extract_presets("<h2>Plain</h2><h2>Also plain</h2>", &StyleConfig::default()).unwrap();
    assert!(result.presets.is_empty());
    assert_eq!(
        result.warnings,
        vec![no_fields_warning(ElementKind::H2, 2), NOTHING_EXTRACTED.to_string()]
    );
}

#[test]
fn test_nothing_to_extract() {
    let result = extract_presets("<div>loose text</div>", &StyleConfig::default()).unwrap();
    assert!(result.presets.is_empty());
    assert_eq!(result.warnings, vec![NOTHING_EXTRACTED.to_string()]);
    assert_eq!(result.markdown, "loose text");
}

#[test]
fn test_result_carries_markdown_and_normalized_html() {
    let html = r#"<div class="ProseMirror"><h2 style="font-size:22px"><span leaf="">Head</span></h2></div>"#;
    let result = extract_presets(html, &StyleConfig::default()).unwrap();
    assert_eq!(result.markdown, "## Head");
    assert_eq!(result.normalized_html, r#"<h2 style="font-size:22px">Head</h2>"#);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["presets"][0]["elementType"], "h2");
    assert_eq!(json["presets"][0]["sourceStats"]["matchedNodes"], 1);
    assert!(json.get("normalizedHtml").is_some());
}
