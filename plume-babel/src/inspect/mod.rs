//! Pasted HTML → report, inferred config, element presets, Markdown
//!
//! Every entry point parses its input, normalizes it (see [`normalize`]) and then works on the
//! cleaned tree, so callers may pass raw or already normalized HTML alike.
//!
//!     normalize.rs     editor-artifact cleanup
//!     declarations.rs  inline style parsing and frequency counting
//!     report.rs        per-tag style statistics
//!     infer.rs         probe table and whole-document inference
//!     extract.rs       per-kind presets
//!     to_markdown.rs   HTML → CommonMark

pub mod declarations;
pub mod extract;
pub mod infer;
pub mod normalize;
pub mod report;
pub mod to_markdown;

use crate::dom::{serialize_children, HtmlDocument};
use crate::error::BabelError;
use crate::style::{StyleConfig, StylePatch};

pub use extract::{ExtractedElementPreset, ExtractionResult, SourceStats};
pub use normalize::normalize;
pub use report::{FormatInspectionReport, StyleUsage, TagFormatSummary, DEFAULT_MAX_DECLARATIONS};

fn parse_normalized(html: &str) -> HtmlDocument {
    let document = HtmlDocument::parse(html);
    normalize::normalize_tree(document.body());
    document
}

/// Summarize how the HTML is styled, listing up to twelve declarations per tag.
pub fn inspect(html: &str) -> FormatInspectionReport {
    inspect_with_limit(html, DEFAULT_MAX_DECLARATIONS)
}

pub fn inspect_with_limit(html: &str, max_declarations: usize) -> FormatInspectionReport {
    let document = parse_normalized(html);
    report::build_report(document.body(), max_declarations)
}

/// Infer a complete style patch, using `fallback` for every field the HTML does not show.
///
/// Feed the result through [`validate`](crate::style::validate) to obtain a config.
pub fn infer_config(html: &str, fallback: &StyleConfig) -> StylePatch {
    let document = parse_normalized(html);
    infer::infer_from_tree(document.body(), fallback)
}

/// Convert pasted HTML to CommonMark.
pub fn to_markdown(html: &str) -> Result<String, BabelError> {
    let document = parse_normalized(html);
    to_markdown::tree_to_markdown(document.body())
}

/// Extract per-element presets along with the Markdown and normalized HTML of the paste.
///
/// Extracted values are coerced the way they would be when applied over `fallback`; fields
/// the HTML does not show are left out rather than copied from it.
pub fn extract_presets(html: &str, fallback: &StyleConfig) -> Result<ExtractionResult, BabelError> {
    let document = parse_normalized(html);
    let body = document.body();
    let index = infer::StyleIndex::build(body);
    let (presets, warnings) = extract::extract_from_index(&index, fallback);
    Ok(ExtractionResult {
        markdown: to_markdown::tree_to_markdown(body)?,
        normalized_html: serialize_children(body)?,
        presets,
        warnings,
    })
}
