//! HTML → Markdown and normalization

use plume_babel::inspect::{normalize, to_markdown};
use plume_babel::render::RenderMode;
use plume_babel::render_markdown;
use plume_babel::style::StyleConfig;

#[test]
fn test_editor_paste_converts() {
    let html = r#"<section class="rich_media_content"><h2 style="font-size:22px"><span leaf="">Title</span></h2><p style="color:#333"><span leaf="">Hello </span><strong><span leaf="">world</span></strong></p></section>"#;
    assert_eq!(to_markdown(html).unwrap(), "## Title\n\nHello **world**");
}

#[test]
fn test_normalize_strips_editor_artifacts() {
    let html = r#"<div class="ProseMirror" contenteditable="true"><p data-pm-slice="1 1 []" lang="en" style="color:#333">Hi<br class="ProseMirror-trailingBreak"></p></div>"#;
    let normalized = normalize(html).unwrap();
    assert_eq!(normalized, r#"<p style="color:#333">Hi</p>"#);
    assert_eq!(normalize(&normalized).unwrap(), normalized);
}

#[test]
fn test_rendered_output_reads_back() {
    let markdown = "## Section\n\nSome **bold** and *soft* text.\n\n- one\n- two\n\n> quote";
    let html = render_markdown(markdown, &StyleConfig::default(), RenderMode::Standard, None).unwrap();
    let back = to_markdown(&html).unwrap();
    assert!(back.starts_with("## Section\n\nSome **bold** and *soft* text."), "got: {back}");
    assert!(back.contains("- one\n- two"));
    assert!(back.contains("> quote"));
}

#[test]
fn test_code_block_fence_keeps_language() {
    let html = "<pre><code class=\"language-rust\">fn main() {}\n</code></pre><p>after</p>";
    assert_eq!(to_markdown(html).unwrap(), "```rust\nfn main() {}\n```\n\nafter");
}

#[test]
fn test_rendered_code_block_reads_back() {
    let markdown = "```rust\nlet x = 1;\n```";
    let html = render_markdown(markdown, &StyleConfig::default(), RenderMode::Standard, None).unwrap();
    let back = to_markdown(&html).unwrap();
    assert_eq!(back, "```\nlet x = 1;\n```", "got: {back}");
    let again = render_markdown(&back, &StyleConfig::default(), RenderMode::Standard, None).unwrap();
    assert_eq!(again, html);
}

#[test]
fn test_empty_html() {
    assert_eq!(to_markdown("").unwrap(), "");
    assert_eq!(normalize("").unwrap(), "");
}
