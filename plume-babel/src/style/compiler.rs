//! Style compiler: one pure function per element kind
//!
//! Every function returns a single whitespace-collapsed declaration string (no selectors),
//! reading only the fields its element kind is documented to use.

use super::field::StyleConfig;

const MONO_FONT_STACK: &str = "ui-monospace, SFMono-Regular, Menlo, Monaco, Consolas, monospace";

/// List flavour, selects the marker type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    pub fn for_tag(tag: &str) -> Option<ListKind> {
        match tag {
            "ul" => Some(ListKind::Unordered),
            "ol" => Some(ListKind::Ordered),
            _ => None,
        }
    }

    fn marker(self) -> &'static str {
        match self {
            ListKind::Unordered => "disc",
            ListKind::Ordered => "decimal",
        }
    }
}

/// Join declarations with single spaces and collapse any inner whitespace runs.
fn compact<I, S>(declarations: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for declaration in declarations {
        for word in declaration.as_ref().split_whitespace() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(word);
        }
    }
    out
}

fn list_line_height(c: &StyleConfig) -> f64 {
    c.line_height.max(1.8)
}

pub fn paragraph_style(c: &StyleConfig) -> String {
    compact([
        format!("font-size:{}px;", c.body_font_size),
        format!("line-height:{};", c.line_height),
        format!("margin:{}px 0 {}px 0;", c.paragraph_margin_top, c.paragraph_spacing),
        format!("color:{};", c.p_text_color),
        format!("font-family:{};", c.body_font_family),
        format!("text-align:{};", c.body_text_align),
        format!("word-break:{};", c.body_word_break),
        "font-weight:400;".to_string(),
    ])
}

/// Heading declarations. Level 1 has its own field set, level 3 gets the pill treatment,
/// every other level uses the generic heading fields with the `h2` size and colour.
pub fn heading_style(level: u8, c: &StyleConfig) -> String {
    match level {
        1 => compact([
            format!("font-size:{}px;", c.h1_size),
            format!("line-height:{}em;", c.h1_line_height),
            format!("font-weight:{};", c.h1_weight),
            format!("margin-top:{}px;", c.h1_margin_top),
            format!("margin-bottom:{}px;", c.h1_margin_bottom),
            format!("padding-left:{}px;", c.h1_padding_left),
            format!(
                "border-left:{}px solid {};",
                c.h1_border_left_width, c.h1_border_left_color
            ),
            format!("color:{};", c.h1_color),
            format!("font-family:{};", c.body_font_family),
            format!("word-break:{};", c.body_word_break),
        ]),
        3 => compact([
            format!("font-size:{}px;", c.h3_size),
            format!("line-height:{}em;", c.heading_line_height),
            format!("font-weight:{};", c.heading_weight),
            format!("margin-top:{}px;", c.h3_margin_top),
            format!("margin-bottom:{}px;", c.h3_margin_bottom),
            format!(
                "padding:{}px {}px;",
                c.h3_padding_vertical, c.h3_padding_horizontal
            ),
            format!("background-color:{};", c.h3_background_color),
            format!("border-radius:{}px;", c.h3_border_radius),
            format!(
                "border-left:{}px solid {};",
                c.h3_border_left_width, c.heading_border_left_color
            ),
            format!("color:{};", c.h3_color),
            format!("font-family:{};", c.body_font_family),
            format!("word-break:{};", c.body_word_break),
        ]),
        _ => compact([
            format!("font-size:{}px;", c.h2_size),
            format!("line-height:{}em;", c.heading_line_height),
            format!("font-weight:{};", c.heading_weight),
            format!("margin-top:{}px;", c.heading_margin_top),
            format!("margin-bottom:{}px;", c.heading_margin_bottom),
            format!("padding-left:{}px;", c.heading_padding_left),
            format!(
                "border-left:{}px solid {};",
                c.heading_border_left_width, c.heading_border_left_color
            ),
            format!("color:{};", c.h2_color),
            format!("font-family:{};", c.body_font_family),
            format!("word-break:{};", c.body_word_break),
        ]),
    }
}

pub fn hr_style(c: &StyleConfig) -> String {
    compact([
        format!("margin:{};", c.hr_margin),
        format!("height:{}px;", c.hr_height),
        "border:none;".to_string(),
        format!("border-top:{};", c.hr_border_top),
        format!("background:{};", c.hr_background),
    ])
}

pub fn blockquote_style(c: &StyleConfig) -> String {
    compact([
        "margin:4px 0;".to_string(),
        format!("padding:{}px;", c.block_padding),
        format!("background:{};", c.quote_bg_color),
        format!("border-left:4px solid {};", c.quote_border_color),
        format!("border-radius:{}px;", c.block_radius),
        format!("font-size:{}px;", c.quote_font_size),
        format!("line-height:{};", c.quote_line_height),
        format!("color:{};", c.secondary_color),
        format!("font-family:{};", c.body_font_family),
    ])
}

pub fn list_style(kind: ListKind, c: &StyleConfig) -> String {
    compact([
        format!("margin:0 0 {}px 0;", c.paragraph_spacing),
        "padding-left:1.35em;".to_string(),
        format!("list-style-type:{};", kind.marker()),
        "list-style-position:outside;".to_string(),
        format!("color:{};", c.list_marker_color),
        format!("line-height:{};", list_line_height(c)),
        format!("font-family:{};", c.body_font_family),
    ])
}

pub fn list_item_style(c: &StyleConfig) -> String {
    compact([
        "display:list-item;".to_string(),
        "margin:8px 0;".to_string(),
        format!("font-size:{}px;", c.body_font_size),
        format!("line-height:{};", list_line_height(c)),
        format!("color:{};", c.li_text_color),
        format!("font-family:{};", c.body_font_family),
    ])
}

/// Image declarations. The responsive trio (`max-width:100%`, `height:auto`,
/// `display:block`) is always emitted first and is not configurable.
pub fn image_style(c: &StyleConfig) -> String {
    compact([
        "max-width:100%;".to_string(),
        "height:auto;".to_string(),
        "display:block;".to_string(),
        format!("max-height:{}px;", c.image_max_height),
        format!("margin:{};", c.image_margin),
        "border-radius:6px;".to_string(),
        format!("border:{};", c.image_border),
        format!("box-shadow:{};", c.image_box_shadow),
    ])
}

/// Declarations for `pre` blocks.
pub fn code_block_style(c: &StyleConfig) -> String {
    let vertical = (c.block_padding * 0.65).floor().max(6.0);
    let horizontal = (c.block_padding * 0.9).floor().max(8.0);
    compact([
        format!("font-family:{MONO_FONT_STACK};"),
        "font-size:14px;".to_string(),
        format!("line-height:{};", c.line_height),
        format!("color:{};", c.text_color),
        "background:#f3f4f6;".to_string(),
        format!("padding:{vertical}px {horizontal}px;"),
        format!("border-radius:{}px;", (c.block_radius - 2.0).max(4.0)),
        "overflow-x:auto;".to_string(),
        "white-space:pre-wrap;".to_string(),
    ])
}

pub fn inline_code_style(_c: &StyleConfig) -> String {
    format!("font-family:{MONO_FONT_STACK};")
}

pub fn strong_style(c: &StyleConfig) -> String {
    compact([
        format!("color:{};", c.primary_color),
        "font-weight:600;".to_string(),
    ])
}

pub fn link_style(c: &StyleConfig) -> String {
    compact([
        format!("color:{};", c.primary_color),
        "text-decoration:underline;".to_string(),
        "word-break:break-all;".to_string(),
    ])
}

/// Compiled declarations for an HTML tag, or `None` for tags without a compiler.
pub fn style_for_tag(tag: &str, c: &StyleConfig) -> Option<String> {
    let style = match tag {
        "p" => paragraph_style(c),
        "h1" => heading_style(1, c),
        "h2" => heading_style(2, c),
        "h3" => heading_style(3, c),
        "blockquote" => blockquote_style(c),
        "ul" => list_style(ListKind::Unordered, c),
        "ol" => list_style(ListKind::Ordered, c),
        "li" => list_item_style(c),
        "img" => image_style(c),
        "hr" => hr_style(c),
        "pre" => code_block_style(c),
        "code" => inline_code_style(c),
        "strong" => strong_style(c),
        "a" => link_style(c),
        _ => return None,
    };
    Some(style)
}
