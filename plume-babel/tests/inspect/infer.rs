//! Whole-document style inference

use plume_babel::inspect::infer_config;
use plume_babel::style::{validate, StyleConfig, StyleField, StyleValue};

fn number(value: Option<&StyleValue>) -> Option<f64> {
    value.and_then(StyleValue::as_number)
}

#[test]
fn test_infers_visible_fields() {
    let html = r#"
        <h2 style="font-size:26px;margin:40px 0 20px;border-left:5px solid #ff6600;color:#222222">T</h2>
        <p style="font-size:17px;line-height:1.9;color:#333333">a</p>
        <p style="font-size:17px;line-height:1.9">b</p>
        <p><strong style="color:#0052ff">c</strong></p>
    "#;
    let patch = infer_config(html, &StyleConfig::default());

    assert_eq!(number(patch.get(StyleField::H2Size)), Some(26.0));
    assert_eq!(number(patch.get(StyleField::HeadingMarginTop)), Some(40.0));
    assert_eq!(number(patch.get(StyleField::HeadingMarginBottom)), Some(20.0));
    assert_eq!(number(patch.get(StyleField::HeadingBorderLeftWidth)), Some(5.0));
    assert_eq!(
        patch.get(StyleField::HeadingBorderLeftColor),
        Some(&StyleValue::Text("#ff6600".into()))
    );
    assert_eq!(number(patch.get(StyleField::BodyFontSize)), Some(17.0));
    assert_eq!(number(patch.get(StyleField::LineHeight)), Some(1.9));
    assert_eq!(
        patch.get(StyleField::PrimaryColor),
        Some(&StyleValue::Text("#0052ff".into()))
    );
}

#[test]
fn test_missing_fields_use_fallback() {
    let mut fallback = StyleConfig::default();
    fallback.h3_size = 21.0;
    let patch = infer_config("<p style=\"font-size:18px\">x</p>", &fallback);

    assert_eq!(patch.len(), StyleField::ALL.len());
    assert_eq!(number(patch.get(StyleField::H3Size)), Some(21.0));
    assert_eq!(number(patch.get(StyleField::BodyFontSize)), Some(18.0));
}

#[test]
fn test_result_validates_cleanly() {
    let html = r#"<h1 style="font-size:80px">big</h1><p style="line-height:30px">x</p>"#;
    let config = validate(&infer_config(html, &StyleConfig::default()));
    // out of range sizes clamp, pixel line heights are not taken as multipliers
    assert_eq!(config.h1_size, 54.0);
    assert_eq!(config.line_height, StyleConfig::default().line_height);
}

#[test]
fn test_plain_html_reproduces_fallback() {
    let fallback = StyleConfig::default();
    let config = validate(&infer_config("<p>nothing styled</p>", &fallback));
    assert_eq!(config, fallback);
}
