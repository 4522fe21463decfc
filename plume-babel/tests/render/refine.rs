//! Per-element-kind refinement in rendered output

use plume_babel::render::{render, RenderMode, RenderOptions};
use plume_babel::style::{resolve, ElementKind, RefineByTypePatch, StyleConfig, StyleField, StylePatch};
use std::borrow::Cow;

#[test]
fn test_refine_only_touches_its_kind() {
    let refine = RefineByTypePatch::new().with(
        ElementKind::H2,
        StylePatch::new().with(StyleField::H2Size, 32.0),
    );
    let options = RenderOptions::new(RenderMode::Standard).with_refine_by_type(refine);
    let html = render("## Title\n\nBody", &StyleConfig::default(), &options).unwrap();

    let lines: Vec<&str> = html.lines().collect();
    assert!(lines[0].starts_with("<h2 style=\"font-size:32px;"), "got: {}", lines[0]);
    assert!(lines[1].starts_with("<p style=\"font-size:16px;"), "got: {}", lines[1]);
    assert!(!lines[1].contains("32px"));
}

#[test]
fn test_shared_field_refined_for_one_kind() {
    // bodyFontSize is editable for both p and li; refining li leaves paragraphs alone
    let refine = RefineByTypePatch::new().with(
        ElementKind::Li,
        StylePatch::new().with(StyleField::BodyFontSize, 19.0),
    );
    let options = RenderOptions::new(RenderMode::Standard).with_refine_by_type(refine);
    let html = render("text\n\n- item\n", &StyleConfig::default(), &options).unwrap();
    assert!(html.contains("<p style=\"font-size:16px;"));
    assert!(html.contains("font-size:19px;"));
}

#[test]
fn test_non_editable_fields_are_dropped() {
    let mut refine = RefineByTypePatch::new();
    refine.set(
        ElementKind::P,
        StylePatch::new().with(StyleField::H2Size, 36.0),
    );
    assert!(refine.is_empty());
    assert!(!refine.set_field(ElementKind::Hr, StyleField::BodyFontSize, 20.0));
    assert!(refine.set_field(ElementKind::Hr, StyleField::HrHeight, 3.0));
}

#[test]
fn test_resolve_borrows_without_patch() {
    let base = StyleConfig::default();
    assert!(matches!(resolve(&base, None, ElementKind::P), Cow::Borrowed(_)));

    let refine = RefineByTypePatch::new().with(
        ElementKind::P,
        StylePatch::new().with(StyleField::PTextColor, "not a colour"),
    );
    // uncoercible values keep the base value
    let resolved = resolve(&base, Some(&refine), ElementKind::P);
    assert_eq!(resolved.p_text_color, base.p_text_color);
    assert_eq!(*resolve(&base, Some(&refine), ElementKind::P), *resolved);
}

#[test]
fn test_refine_decodes_from_json() {
    let refine: RefineByTypePatch = serde_json::from_str(
        r##"{"h2": {"h2Size": 30, "bodyFontSize": 20}, "p": {"pTextColor": "#123456"}}"##,
    )
    .unwrap();
    let h2 = refine.get(ElementKind::H2).unwrap();
    assert!(h2.contains(StyleField::H2Size));
    assert!(!h2.contains(StyleField::BodyFontSize));
    assert!(refine.get(ElementKind::P).is_some());
}
