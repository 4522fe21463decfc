//! The eight refinable element kinds and their editable-field allow-lists

use super::field::StyleField;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    H1,
    H2,
    H3,
    P,
    Li,
    Blockquote,
    Img,
    Hr,
}

impl ElementKind {
    pub const ALL: [ElementKind; 8] = [
        ElementKind::H1,
        ElementKind::H2,
        ElementKind::H3,
        ElementKind::P,
        ElementKind::Li,
        ElementKind::Blockquote,
        ElementKind::Img,
        ElementKind::Hr,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::H1 => "h1",
            ElementKind::H2 => "h2",
            ElementKind::H3 => "h3",
            ElementKind::P => "p",
            ElementKind::Li => "li",
            ElementKind::Blockquote => "blockquote",
            ElementKind::Img => "img",
            ElementKind::Hr => "hr",
        }
    }

    /// The kind whose refine patch applies to an HTML tag, if any.
    ///
    /// List containers share the `li` patch so marker colour and spacing follow the items.
    pub fn for_tag(tag: &str) -> Option<ElementKind> {
        match tag {
            "h1" => Some(ElementKind::H1),
            "h2" => Some(ElementKind::H2),
            "h3" => Some(ElementKind::H3),
            "p" => Some(ElementKind::P),
            "li" | "ul" | "ol" => Some(ElementKind::Li),
            "blockquote" => Some(ElementKind::Blockquote),
            "img" => Some(ElementKind::Img),
            "hr" => Some(ElementKind::Hr),
            _ => None,
        }
    }

    /// Tags whose declarations describe this kind when inferring styles.
    pub fn scope_tags(self) -> &'static [&'static str] {
        match self {
            ElementKind::H1 => &["h1"],
            ElementKind::H2 => &["h2"],
            ElementKind::H3 => &["h3"],
            ElementKind::P => &["p"],
            ElementKind::Li => &["li", "ul", "ol"],
            ElementKind::Blockquote => &["blockquote"],
            ElementKind::Img => &["img"],
            ElementKind::Hr => &["hr"],
        }
    }

    /// Fields a refine patch or preset for this kind may set.
    pub fn editable_fields(self) -> &'static [StyleField] {
        use StyleField::*;
        match self {
            ElementKind::H1 => &[
                H1Size,
                H1Weight,
                H1LineHeight,
                H1MarginTop,
                H1MarginBottom,
                H1PaddingLeft,
                H1BorderLeftWidth,
                H1BorderLeftColor,
                H1Color,
            ],
            ElementKind::H2 => &[
                H2Size,
                HeadingWeight,
                HeadingLineHeight,
                HeadingMarginTop,
                HeadingMarginBottom,
                HeadingPaddingLeft,
                HeadingBorderLeftWidth,
                HeadingBorderLeftColor,
                H2Color,
            ],
            ElementKind::H3 => &[
                H3Size,
                HeadingWeight,
                HeadingLineHeight,
                H3MarginTop,
                H3MarginBottom,
                H3PaddingVertical,
                H3PaddingHorizontal,
                H3BorderLeftWidth,
                H3BorderRadius,
                H3BackgroundColor,
                H3Color,
            ],
            ElementKind::P => &[
                BodyFontSize,
                LineHeight,
                ParagraphMarginTop,
                ParagraphSpacing,
                PTextColor,
                BodyTextAlign,
                BodyWordBreak,
                BodyFontFamily,
            ],
            ElementKind::Li => &[
                BodyFontSize,
                LineHeight,
                ParagraphSpacing,
                LiTextColor,
                ListMarkerColor,
                BodyFontFamily,
            ],
            ElementKind::Blockquote => &[
                QuoteFontSize,
                QuoteLineHeight,
                QuoteBgColor,
                QuoteBorderColor,
                SecondaryColor,
                BlockPadding,
                BlockRadius,
                BodyFontFamily,
            ],
            ElementKind::Img => &[ImageMargin, ImageMaxHeight, ImageBorder, ImageBoxShadow],
            ElementKind::Hr => &[HrMargin, HrHeight, HrBackground, HrBorderTop],
        }
    }

    pub fn allows(self, field: StyleField) -> bool {
        self.editable_fields().contains(&field)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown element kind '{s}'"))
    }
}
