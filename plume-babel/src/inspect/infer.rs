//! Style inference from inline declarations
//!
//! Each config field has an ordered list of probes. A probe names the tags to sample, the CSS
//! property to read and how to decode it. Sampling takes the most frequent value of that
//! property among the matching elements (first seen wins a tie); the first probe whose sampled
//! value decodes and passes the field's constraint provides the field.

use super::declarations::{last_values, parse_inline_style, FrequencyTable};
use crate::dom::{for_each_element, get_attr, tag_name};
use crate::style::{StyleConfig, StyleField, StylePatch, StyleValue};
use markup5ever_rcdom::Handle;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static BORDER_WIDTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)px").expect("valid border width regex"));
static COLOR_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(#[0-9a-fA-F]{3,8}|rgba?\([^)]*\)|[a-zA-Z]+)").expect("valid color token regex")
});

/// How a sampled CSS value turns into a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decode {
    /// The value as written
    Raw,
    /// `px`/`em` length or bare number
    Length,
    /// Bare number or `em`; pixel line heights are rejected
    Unitless,
    /// First token of a box shorthand
    BoxTop,
    /// Bottom side of a `margin`/`padding` shorthand
    BoxBottom,
    /// Horizontal side of a box shorthand (second token, or the only one)
    BoxHorizontal,
    /// Pixel width inside a `border` shorthand
    BorderWidth,
    /// Last colour-looking token inside a `border` shorthand
    BorderColor,
}

impl Decode {
    pub fn apply(self, raw: &str) -> Option<StyleValue> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match self {
            Decode::Raw => Some(StyleValue::Text(raw.to_string())),
            Decode::Length => to_number(raw).map(StyleValue::Number),
            Decode::Unitless => unitless(raw).map(StyleValue::Number),
            Decode::BoxTop => raw.split_whitespace().next().and_then(to_number).map(StyleValue::Number),
            Decode::BoxBottom => box_bottom(raw).and_then(to_number).map(StyleValue::Number),
            Decode::BoxHorizontal => {
                let tokens: Vec<&str> = raw.split_whitespace().collect();
                tokens
                    .get(1)
                    .or_else(|| tokens.first())
                    .and_then(|token| to_number(token))
                    .map(StyleValue::Number)
            }
            Decode::BorderWidth => BORDER_WIDTH
                .captures(raw)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse::<f64>().ok())
                .map(StyleValue::Number),
            Decode::BorderColor => COLOR_TOKEN
                .find_iter(raw)
                .last()
                .map(|m| StyleValue::Text(m.as_str().to_string())),
        }
    }
}

/// Strip `px` or `em` (not `rem`) and parse.
pub fn to_number(raw: &str) -> Option<f64> {
    let value = raw.trim().to_ascii_lowercase();
    let digits = if let Some(stripped) = value.strip_suffix("px") {
        stripped
    } else if value.ends_with("rem") {
        return None;
    } else if let Some(stripped) = value.strip_suffix("em") {
        stripped
    } else {
        value.as_str()
    };
    digits.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn unitless(raw: &str) -> Option<f64> {
    let value = raw.trim().to_ascii_lowercase();
    if value.ends_with("px") {
        return None;
    }
    to_number(&value)
}

/// One token: itself. Two: the first (vertical pair). Three or four: the third.
fn box_bottom(raw: &str) -> Option<&str> {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    match tokens.len() {
        0 => None,
        1 | 2 => Some(tokens[0]),
        _ => Some(tokens[2]),
    }
}

/// One sampling attempt for a field.
#[derive(Debug, Clone, Copy)]
pub struct Probe {
    pub tags: &'static [&'static str],
    pub property: &'static str,
    pub decode: Decode,
}

macro_rules! probe {
    ($tags:expr, $property:literal, $decode:ident) => {
        Probe {
            tags: $tags,
            property: $property,
            decode: Decode::$decode,
        }
    };
}

/// Ordered probes for every field.
pub fn probes(field: StyleField) -> &'static [Probe] {
    use StyleField::*;
    const P: &[&str] = &["p"];
    const H1: &[&str] = &["h1"];
    const H2: &[&str] = &["h2"];
    const H3: &[&str] = &["h3"];
    const HEADINGS: &[&str] = &["h2", "h3"];
    const QUOTE: &[&str] = &["blockquote"];
    const IMG: &[&str] = &["img"];
    const HR: &[&str] = &["hr"];
    const BODY_TEXT: &[&str] = &["p", "li"];

    match field {
        BodyFontSize => &[probe!(P, "font-size", Length)],
        LineHeight => &[probe!(P, "line-height", Unitless)],
        ParagraphMarginTop => &[probe!(P, "margin-top", Length), probe!(P, "margin", BoxTop)],
        ParagraphSpacing => &[probe!(P, "margin-bottom", Length), probe!(P, "margin", BoxBottom)],

        H1Size => &[probe!(H1, "font-size", Length)],
        H1Weight => &[probe!(H1, "font-weight", Length)],
        H1LineHeight => &[probe!(H1, "line-height", Unitless)],
        H1MarginTop => &[probe!(H1, "margin-top", Length), probe!(H1, "margin", BoxTop)],
        H1MarginBottom => &[probe!(H1, "margin-bottom", Length), probe!(H1, "margin", BoxBottom)],
        H1PaddingLeft => &[probe!(H1, "padding-left", Length), probe!(H1, "padding", BoxHorizontal)],
        H1BorderLeftWidth => &[
            probe!(H1, "border-left-width", Length),
            probe!(H1, "border-left", BorderWidth),
        ],
        H1BorderLeftColor => &[
            probe!(H1, "border-left-color", Raw),
            probe!(H1, "border-left", BorderColor),
        ],
        H1Color => &[probe!(H1, "color", Raw)],

        H2Size => &[probe!(H2, "font-size", Length)],
        H3Size => &[probe!(H3, "font-size", Length)],
        HeadingWeight => &[probe!(HEADINGS, "font-weight", Length)],
        HeadingLineHeight => &[probe!(HEADINGS, "line-height", Unitless)],
        HeadingMarginTop => &[probe!(H2, "margin-top", Length), probe!(H2, "margin", BoxTop)],
        HeadingMarginBottom => &[probe!(H2, "margin-bottom", Length), probe!(H2, "margin", BoxBottom)],
        HeadingPaddingLeft => &[probe!(H2, "padding-left", Length), probe!(H2, "padding", BoxHorizontal)],
        HeadingBorderLeftWidth => &[
            probe!(H2, "border-left-width", Length),
            probe!(H2, "border-left", BorderWidth),
        ],
        HeadingBorderLeftColor => &[
            probe!(H2, "border-left-color", Raw),
            probe!(H2, "border-left", BorderColor),
            probe!(H3, "border-left-color", Raw),
            probe!(H3, "border-left", BorderColor),
        ],
        H2Color => &[probe!(H2, "color", Raw)],

        H3MarginTop => &[probe!(H3, "margin-top", Length), probe!(H3, "margin", BoxTop)],
        H3MarginBottom => &[probe!(H3, "margin-bottom", Length), probe!(H3, "margin", BoxBottom)],
        H3PaddingVertical => &[probe!(H3, "padding-top", Length), probe!(H3, "padding", BoxTop)],
        H3PaddingHorizontal => &[probe!(H3, "padding-left", Length), probe!(H3, "padding", BoxHorizontal)],
        H3BorderLeftWidth => &[
            probe!(H3, "border-left-width", Length),
            probe!(H3, "border-left", BorderWidth),
        ],
        H3BorderRadius => &[probe!(H3, "border-radius", Length)],
        H3BackgroundColor => &[probe!(H3, "background-color", Raw), probe!(H3, "background", Raw)],
        H3Color => &[probe!(H3, "color", Raw)],

        PTextColor => &[probe!(P, "color", Raw)],
        LiTextColor => &[probe!(&["li"], "color", Raw)],
        ListMarkerColor => &[probe!(&["ul", "ol"], "color", Raw)],
        PrimaryColor => &[
            probe!(&["strong"], "color", Raw),
            probe!(&["a"], "color", Raw),
            probe!(H2, "color", Raw),
            probe!(H3, "color", Raw),
        ],
        SecondaryColor => &[probe!(QUOTE, "color", Raw)],
        TextColor => &[
            probe!(&["pre"], "color", Raw),
            probe!(&["p", "li", "blockquote"], "color", Raw),
        ],

        QuoteBgColor => &[probe!(QUOTE, "background", Raw), probe!(QUOTE, "background-color", Raw)],
        QuoteBorderColor => &[
            probe!(QUOTE, "border-left-color", Raw),
            probe!(QUOTE, "border-left", BorderColor),
        ],
        BlockPadding => &[probe!(QUOTE, "padding", BoxTop)],
        BlockRadius => &[probe!(QUOTE, "border-radius", Length)],
        QuoteFontSize => &[probe!(QUOTE, "font-size", Length)],
        QuoteLineHeight => &[probe!(QUOTE, "line-height", Unitless)],

        BodyFontFamily => &[probe!(BODY_TEXT, "font-family", Raw)],
        BodyTextAlign => &[probe!(P, "text-align", Raw)],
        BodyWordBreak => &[probe!(&["p", "h2", "h3"], "word-break", Raw)],

        ImageMargin => &[probe!(IMG, "margin", Raw)],
        ImageMaxHeight => &[probe!(IMG, "max-height", Length)],
        ImageBorder => &[probe!(IMG, "border", Raw)],
        ImageBoxShadow => &[probe!(IMG, "box-shadow", Raw)],

        HrMargin => &[probe!(HR, "margin", Raw)],
        HrHeight => &[probe!(HR, "height", Length)],
        HrBackground => &[probe!(HR, "background", Raw), probe!(HR, "background-color", Raw)],
        HrBorderTop => &[probe!(HR, "border-top", Raw)],
    }
}

/// Inline declarations of every element, in document order.
pub struct StyleIndex {
    elements: Vec<IndexedElement>,
}

struct IndexedElement {
    tag: String,
    declarations: HashMap<String, String>,
    declaration_count: usize,
}

impl StyleIndex {
    /// Index the elements below `root`. Elements without a style still count as matches.
    pub fn build(root: &Handle) -> Self {
        let mut elements = Vec::new();
        for_each_element(root, &mut |node| {
            let Some(tag) = tag_name(node) else {
                return;
            };
            let parsed = get_attr(node, "style")
                .map(|style| parse_inline_style(&style))
                .unwrap_or_default();
            elements.push(IndexedElement {
                tag,
                declarations: last_values(&parsed),
                declaration_count: parsed.len(),
            });
        });
        StyleIndex { elements }
    }

    fn matching<'a>(&'a self, tags: &'a [&'a str]) -> impl Iterator<Item = &'a IndexedElement> + 'a {
        self.elements
            .iter()
            .filter(move |element| tags.contains(&element.tag.as_str()))
    }

    /// Elements whose tag is one of `tags`.
    pub fn count(&self, tags: &[&str]) -> usize {
        self.matching(tags).count()
    }

    /// Declarations carried by elements whose tag is one of `tags`.
    pub fn declaration_count(&self, tags: &[&str]) -> usize {
        self.matching(tags).map(|element| element.declaration_count).sum()
    }

    /// Most frequent non-empty value of `property` among elements tagged `tags`.
    pub fn pick(&self, tags: &[&str], property: &str) -> Option<String> {
        let table: FrequencyTable = self
            .matching(tags)
            .filter_map(|element| element.declarations.get(property))
            .map(|value| value.as_str())
            .filter(|value| !value.is_empty())
            .collect();
        table.mode().map(str::to_string)
    }

    /// First probe value for `field` that survives coercion into a copy of `base`.
    ///
    /// `retarget`, when given, maps each probe to the tags actually sampled.
    pub fn infer_field(
        &self,
        field: StyleField,
        base: &StyleConfig,
        retarget: Option<&dyn Fn(&Probe) -> Vec<&'static str>>,
    ) -> Option<StyleValue> {
        let mut scratch = base.clone();
        for probe in probes(field) {
            let tags = match retarget {
                Some(map) => map(probe),
                None => probe.tags.to_vec(),
            };
            let Some(sampled) = self.pick(&tags, probe.property) else {
                continue;
            };
            let Some(decoded) = probe.decode.apply(&sampled) else {
                tracing::trace!(field = %field, value = sampled.as_str(), "value did not decode");
                continue;
            };
            if scratch.assign(field, &decoded) {
                return Some(scratch.get(field));
            }
            tracing::trace!(field = %field, value = sampled.as_str(), "value rejected by constraint");
        }
        None
    }
}

/// Infer a complete style patch from an already normalized tree.
///
/// Every field is present: inferred where the HTML shows a usable value, taken from
/// `fallback` otherwise.
pub fn infer_from_tree(root: &Handle, fallback: &StyleConfig) -> StylePatch {
    let index = StyleIndex::build(root);
    let mut inferred = 0usize;
    let patch = StyleField::ALL
        .iter()
        .map(|&field| match index.infer_field(field, fallback, None) {
            Some(value) => {
                inferred += 1;
                (field, value)
            }
            None => (field, fallback.get(field)),
        })
        .collect();
    tracing::debug!(inferred, total = StyleField::ALL.len(), "inferred style config");
    patch
}
