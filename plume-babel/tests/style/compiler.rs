//! Style compiler output

use insta::assert_snapshot;
use plume_babel::style::compiler::{blockquote_style, heading_style, style_for_tag};
use plume_babel::style::{validate, StyleConfig, StyleField, StylePatch};

#[test]
fn test_h2_defaults() {
    assert_snapshot!(heading_style(2, &StyleConfig::default()), @"font-size:24px; line-height:1.4em; font-weight:700; margin-top:36px; margin-bottom:24px; padding-left:12px; border-left:4px solid #002fa7; color:#1f2937; font-family:PingFang SC, system-ui, -apple-system, BlinkMacSystemFont, Helvetica Neue, Hiragino Sans GB, Microsoft YaHei UI, Microsoft YaHei, Arial, sans-serif; word-break:break-all;");
}

#[test]
fn test_levels_past_three_share_h2_fields() {
    let config = StyleConfig::default();
    assert_eq!(heading_style(4, &config), heading_style(2, &config));
}

#[test]
fn test_whitespace_in_values_is_collapsed() {
    let config = validate(
        &StylePatch::new().with(StyleField::BodyFontFamily, "Georgia,\n      serif"),
    );
    let style = blockquote_style(&config);
    assert!(style.contains("font-family:Georgia, serif;"), "got: {style}");
    assert!(!style.contains('\n'));
    assert!(!style.contains("  "));
}

#[test]
fn test_every_styled_tag_compiles() {
    let config = StyleConfig::default();
    for tag in ["p", "h1", "h2", "h3", "blockquote", "ul", "ol", "li", "img", "hr", "pre", "code", "strong", "a"] {
        let style = style_for_tag(tag, &config).unwrap();
        assert!(style.ends_with(';'), "{tag}: {style}");
    }
    assert!(style_for_tag("em", &config).is_none());
    assert!(style_for_tag("table", &config).is_none());
}

#[test]
fn test_fields_reach_their_declarations() {
    let config = validate(
        &StylePatch::new()
            .with(StyleField::QuoteBorderColor, "#abc")
            .with(StyleField::BlockRadius, 3.0),
    );
    let style = blockquote_style(&config);
    assert!(style.contains("border-left:4px solid #abc;"));
    assert!(style.contains("border-radius:3px;"));
}
