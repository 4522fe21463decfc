//! Format inspection report

use plume_babel::inspect::{inspect, inspect_with_limit, DEFAULT_MAX_DECLARATIONS};

const PASTE: &str = r#"<section class="rich_media_content">
<h2 style="font-size: 22px; color: #0052ff">One</h2>
<p style="font-size:15px;color:#333">a</p>
<p style="font-size:15px;color:#555" class="x">b</p>
<p style="font-size:15px !important">c</p>
</section>"#;

#[test]
fn test_counts_and_tag_order() {
    let report = inspect(PASTE);
    assert_eq!(report.total_elements, 4);
    assert_eq!(report.inline_style_elements, 4);
    assert_eq!(report.class_elements, 1);

    let tags: Vec<&str> = report.tag_summaries.iter().map(|s| s.tag.as_str()).collect();
    assert_eq!(tags, vec!["p", "h2"]);
    assert_eq!(report.tag_summaries[0].count, 3);
}

#[test]
fn test_declarations_are_normalized_and_ranked() {
    let report = inspect(PASTE);
    let p = &report.tag_summaries[0];
    assert_eq!(p.style_usage[0].declaration, "font-size: 15px");
    assert_eq!(p.style_usage[0].count, 3);
    assert!(p.style_usage.iter().any(|u| u.declaration == "color: #333" && u.count == 1));
}

#[test]
fn test_declaration_limit() {
    let style: String = (0..20).map(|i| format!("x-{i}: {i};")).collect();
    let html = format!("<p style=\"{style}\">t</p>");
    assert_eq!(inspect(&html).tag_summaries[0].style_usage.len(), DEFAULT_MAX_DECLARATIONS);
    assert_eq!(inspect_with_limit(&html, 3).tag_summaries[0].style_usage.len(), 3);
}

#[test]
fn test_report_serializes_camel_case() {
    let json = serde_json::to_value(inspect("<p style=\"color:red\">x</p>")).unwrap();
    assert_eq!(json["inlineStyleElements"], 1);
    assert_eq!(json["tagSummaries"][0]["styleUsage"][0]["declaration"], "color: red");
}

#[test]
fn test_empty_input() {
    let report = inspect("");
    assert_eq!(report.total_elements, 0);
    assert!(report.tag_summaries.is_empty());
}
