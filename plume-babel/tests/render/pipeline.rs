//! Standard-mode rendering

use plume_babel::render::{render, RenderMode, RenderOptions, SanitizePolicy};
use plume_babel::style::StyleConfig;
use plume_babel::render_markdown;

fn render_standard(markdown: &str) -> String {
    render_markdown(markdown, &StyleConfig::default(), RenderMode::Standard, None).unwrap()
}

// ============================================================================
// BLOCKS
// ============================================================================

#[test]
fn test_heading_gets_inline_style_and_no_class() {
    let html = render_standard("## Hello");
    assert!(html.starts_with("<h2 style=\""), "got: {html}");
    assert!(html.contains(">Hello</h2>"));
    assert!(!html.contains("class="));
}

#[test]
fn test_top_level_blocks_one_per_line() {
    let html = render_standard("# Title\n\nFirst paragraph.\n\n---\n");
    let lines: Vec<&str> = html.lines().collect();
    assert_eq!(lines.len(), 3, "got: {html}");
    assert!(lines[0].starts_with("<h1 style=\"font-size:28px;"));
    assert!(lines[1].starts_with("<p style=\"font-size:16px;"));
    assert!(lines[2].starts_with("<hr style=\""));
}

#[test]
fn test_deep_headings_become_h3() {
    let html = render_standard("##### Deep");
    assert!(html.starts_with("<h3 style=\""), "got: {html}");
    assert!(html.contains("background-color:rgba(0, 47, 167, 0.1);"));
}

#[test]
fn test_tight_list_items_inline_their_text() {
    let html = render_standard("- one\n- two\n");
    assert!(html.starts_with("<ul style=\""));
    assert!(html.contains("list-style-type:disc;"));
    assert!(html.contains("\">one</li>"), "got: {html}");
    assert!(!html.contains("<p"));
}

#[test]
fn test_ordered_list_marker() {
    let html = render_standard("1. first\n2. second\n");
    assert!(html.starts_with("<ol style=\""));
    assert!(html.contains("list-style-type:decimal;"));
}

#[test]
fn test_blockquote_wraps_styled_paragraph() {
    let html = render_standard("> quoted");
    assert!(html.starts_with("<blockquote style=\"margin:4px 0;"));
    assert!(html.contains("<p style=\""));
    assert!(html.contains("quoted"));
}

#[test]
fn test_code_block_loses_language_class() {
    let html = render_standard("```rust\nlet x = 1;\n```\n");
    assert!(html.starts_with("<pre style=\"font-family:ui-monospace"));
    assert!(html.contains("<code style=\""));
    assert!(html.contains("let x = 1;"));
    assert!(!html.contains("language-rust"));
    assert!(!html.contains("class="));
}

// ============================================================================
// INLINES
// ============================================================================

#[test]
fn test_strong_and_links_use_primary_color() {
    let mut config = StyleConfig::default();
    config.primary_color = "#ff0000".to_string();
    let html = render_markdown(
        "**bold** and [site](https://x.test)",
        &config,
        RenderMode::Standard,
        None,
    )
    .unwrap();
    assert!(html.contains("<strong style=\"color:#ff0000; font-weight:600;\">bold</strong>"));
    assert!(html.contains("href=\"https://x.test\""));
    assert!(html.contains("color:#ff0000; text-decoration:underline;"));
}

#[test]
fn test_image_gets_responsive_trio_first() {
    let html = render_standard("![alt text](https://x.test/a.png)");
    assert!(html.contains("<img"));
    assert!(html.contains("style=\"max-width:100%; height:auto; display:block;"));
    assert!(html.contains("alt=\"alt text\""));
}

#[test]
fn test_raw_html_is_dropped() {
    let html = render_standard("<div class=\"x\">raw</div>\n\ntext <span>inline</span>");
    assert!(!html.contains("raw"));
    assert!(!html.contains("<span"));
    assert!(html.contains("text"));
}

// ============================================================================
// OPTIONS
// ============================================================================

#[test]
fn test_h1_can_be_disallowed() {
    let options = RenderOptions::new(RenderMode::Standard)
        .with_policy(SanitizePolicy { allow_h1: false });
    let html = render("# Title", &StyleConfig::default(), &options).unwrap();
    assert!(!html.contains("<h1"));
    assert!(html.contains("Title"));
}

#[test]
fn test_render_is_deterministic() {
    let markdown = "## A\n\nSome *text* with `code`.\n\n> q\n";
    assert_eq!(render_standard(markdown), render_standard(markdown));
}

#[test]
fn test_empty_input_renders_empty() {
    assert_eq!(render_standard(""), "");
}

#[test]
fn test_mode_parsing() {
    assert_eq!("SAFE".parse::<RenderMode>().unwrap(), RenderMode::Safe);
    assert!("fast".parse::<RenderMode>().is_err());
}
