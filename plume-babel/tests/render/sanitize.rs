//! Allow-list sanitizing of rendered output

use plume_babel::render::sanitize::url_allowed;
use plume_babel::render::RenderMode;
use plume_babel::render_markdown;
use plume_babel::style::StyleConfig;

fn render_standard(markdown: &str) -> String {
    render_markdown(markdown, &StyleConfig::default(), RenderMode::Standard, None).unwrap()
}

#[test]
fn test_javascript_links_lose_href() {
    let html = render_standard("[click](javascript:alert(1))");
    assert!(!html.to_ascii_lowercase().contains("javascript:"), "got: {html}");
    assert!(html.contains("click"));
}

#[test]
fn test_allowed_protocols_keep_href() {
    let html = render_standard("[mail](mailto:a@b.test) [call](tel:123) [rel](/docs)");
    assert!(html.contains("href=\"mailto:a@b.test\""));
    assert!(html.contains("href=\"tel:123\""));
    assert!(html.contains("href=\"/docs\""));
}

#[test]
fn test_data_images_allowed_but_not_data_links() {
    let html = render_standard("![x](data:image/png;base64,AAAA) [y](data:text/html,hi)");
    assert!(html.contains("src=\"data:image/png;base64,AAAA\""));
    assert!(!html.contains("href=\"data:"));
}

#[test]
fn test_strikethrough_and_breaks_unwrap() {
    let html = render_standard("~~gone~~ text  \nnext");
    assert!(!html.contains("<del"));
    assert!(!html.contains("<br"));
    assert!(html.contains("gone"));
}

#[test]
fn test_url_helper() {
    assert!(url_allowed("https://x.test/a", &["https"]));
    assert!(!url_allowed("vbscript:msgbox(1)", &["http", "https"]));
}
