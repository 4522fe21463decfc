//! Safe-mode degrade

use plume_babel::render::safe::{removed_placeholder, EMPTY_IMAGE_PLACEHOLDER};
use plume_babel::render::RenderMode;
use plume_babel::render_markdown;
use plume_babel::style::StyleConfig;

const TABLE: &str = "| a | b |\n|---|:-:|\n| 1 | 2 |\n";

fn render_in(mode: RenderMode, markdown: &str) -> String {
    render_markdown(markdown, &StyleConfig::default(), mode, None).unwrap()
}

#[test]
fn test_table_becomes_placeholder() {
    let html = render_in(RenderMode::Safe, TABLE);
    assert_eq!(html, format!("<p>{}</p>", removed_placeholder("table")));
    assert!(!html.contains("<table"));
}

#[test]
fn test_standard_mode_unwraps_table_instead() {
    let html = render_in(RenderMode::Standard, TABLE);
    assert!(!html.contains("<table"));
    assert!(!html.contains("<td"));
    assert!(!html.contains("safe mode"));
    assert!(html.contains('1'));
}

#[test]
fn test_empty_image_source_is_replaced() {
    let html = render_in(RenderMode::Safe, "before ![missing]() after");
    assert!(html.contains(EMPTY_IMAGE_PLACEHOLDER), "got: {html}");
    assert!(!html.contains("<img"));
    assert!(html.starts_with("<p style=\""), "got: {html}");
    assert!(
        html.contains(&format!("<span>{EMPTY_IMAGE_PLACEHOLDER}</span>")),
        "got: {html}"
    );
    assert_eq!(html.matches("<p").count(), 1, "got: {html}");
}

#[test]
fn test_regular_content_survives_safe_mode() {
    let markdown = "## Title\n\ntext ![pic](https://x.test/a.png)\n";
    let safe = render_in(RenderMode::Safe, markdown);
    assert_eq!(safe, render_in(RenderMode::Standard, markdown));
}
