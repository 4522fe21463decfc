//! Field table for [`StyleConfig`]
//!
//! Every visual knob is declared exactly once in the `style_fields!` invocation below, together
//! with its wire name, default and constraint. The macro expands into the [`StyleField`] key
//! enum, the total [`StyleConfig`] record and the glue between the two, so the field list can
//! never drift between the record, the validator and the (de)serializers.

use super::validate::{coerce_color, coerce_keyword, coerce_number, coerce_text};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single field value, as carried by partial configs and patches.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(f64),
    Text(String),
}

impl StyleValue {
    /// Numeric view: numbers as-is, text only when it parses as a plain number.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            StyleValue::Number(n) => *n,
            StyleValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        n.is_finite().then_some(n)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StyleValue::Text(s) => Some(s),
            StyleValue::Number(_) => None,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Number(n) => write!(f, "{n}"),
            StyleValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        StyleValue::Number(n)
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Text(s.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        StyleValue::Text(s)
    }
}

/// What a field accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldConstraint {
    /// Finite number, clamped into `[min, max]`
    Range { min: f64, max: f64 },
    /// `#rgb` or `#rrggbb`
    Color,
    /// One of a fixed set of keywords
    Keyword(&'static [&'static str]),
    /// Free-form CSS text, non-empty after trimming
    Text,
}

/// Closed keyword sets (text-align, word-break).
pub trait Keyword: Sized + Copy {
    const VALUES: &'static [&'static str];

    fn parse(raw: &str) -> Option<Self>;

    fn as_str(self) -> &'static str;
}

macro_rules! keyword_enum {
    ($name:ident { $( $variant:ident => $text:literal ),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant ),+
        }

        impl Keyword for $name {
            const VALUES: &'static [&'static str] = &[$( $text ),+];

            fn parse(raw: &str) -> Option<Self> {
                match raw {
                    $( $text => Some($name::$variant), )+
                    _ => None,
                }
            }

            fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

keyword_enum!(TextAlign {
    Left => "left",
    Center => "center",
    Right => "right",
    Justify => "justify",
    Start => "start",
});

keyword_enum!(WordBreak {
    Normal => "normal",
    BreakAll => "break-all",
    BreakWord => "break-word",
});

macro_rules! style_fields {
    (
        numeric { $( $nvar:ident => $nfield:ident, $nname:literal, $ndefault:expr, [$nmin:expr, $nmax:expr]; )* }
        color { $( $cvar:ident => $cfield:ident, $cname:literal, $cdefault:literal; )* }
        keyword { $( $kvar:ident => $kfield:ident: $kty:ident, $kname:literal, $kdefault:expr; )* }
        text { $( $tvar:ident => $tfield:ident, $tname:literal, $tdefault:literal; )* }
    ) => {
        /// Key of a single [`StyleConfig`] field.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum StyleField {
            $( $nvar, )*
            $( $cvar, )*
            $( $kvar, )*
            $( $tvar, )*
        }

        impl StyleField {
            /// Every field, in declaration order.
            pub const ALL: &'static [StyleField] = &[
                $( StyleField::$nvar, )*
                $( StyleField::$cvar, )*
                $( StyleField::$kvar, )*
                $( StyleField::$tvar, )*
            ];

            /// camelCase wire name.
            pub fn name(self) -> &'static str {
                match self {
                    $( StyleField::$nvar => $nname, )*
                    $( StyleField::$cvar => $cname, )*
                    $( StyleField::$kvar => $kname, )*
                    $( StyleField::$tvar => $tname, )*
                }
            }

            pub fn constraint(self) -> FieldConstraint {
                match self {
                    $( StyleField::$nvar => FieldConstraint::Range { min: $nmin as f64, max: $nmax as f64 }, )*
                    $( StyleField::$cvar => FieldConstraint::Color, )*
                    $( StyleField::$kvar => FieldConstraint::Keyword(<$kty as Keyword>::VALUES), )*
                    $( StyleField::$tvar => FieldConstraint::Text, )*
                }
            }
        }

        /// The flat, total record of every visual knob.
        ///
        /// Values are plain data; build one from [`Default`], or from a partial through
        /// [`validate`](super::validate), never by trusting external input directly.
        #[derive(Debug, Clone, PartialEq)]
        pub struct StyleConfig {
            $( pub $nfield: f64, )*
            $( pub $cfield: String, )*
            $( pub $kfield: $kty, )*
            $( pub $tfield: String, )*
        }

        impl Default for StyleConfig {
            fn default() -> Self {
                StyleConfig {
                    $( $nfield: $ndefault as f64, )*
                    $( $cfield: $cdefault.to_string(), )*
                    $( $kfield: $kdefault, )*
                    $( $tfield: $tdefault.to_string(), )*
                }
            }
        }

        impl StyleConfig {
            pub fn get(&self, field: StyleField) -> StyleValue {
                match field {
                    $( StyleField::$nvar => StyleValue::Number(self.$nfield), )*
                    $( StyleField::$cvar => StyleValue::Text(self.$cfield.clone()), )*
                    $( StyleField::$kvar => StyleValue::Text(self.$kfield.as_str().to_string()), )*
                    $( StyleField::$tvar => StyleValue::Text(self.$tfield.clone()), )*
                }
            }

            /// Coerce `value` into `field` and store it. Returns `false` (leaving the field
            /// untouched) when the value cannot be coerced.
            pub(crate) fn assign(&mut self, field: StyleField, value: &StyleValue) -> bool {
                match field {
                    $( StyleField::$nvar => match coerce_number(value, $nmin as f64, $nmax as f64) {
                        Some(n) => { self.$nfield = n; true }
                        None => false,
                    }, )*
                    $( StyleField::$cvar => match coerce_color(value) {
                        Some(c) => { self.$cfield = c; true }
                        None => false,
                    }, )*
                    $( StyleField::$kvar => match coerce_keyword::<$kty>(value) {
                        Some(k) => { self.$kfield = k; true }
                        None => false,
                    }, )*
                    $( StyleField::$tvar => match coerce_text(value) {
                        Some(t) => { self.$tfield = t; true }
                        None => false,
                    }, )*
                }
            }
        }
    };
}

style_fields! {
    numeric {
        BodyFontSize => body_font_size, "bodyFontSize", 16, [12, 24];
        LineHeight => line_height, "lineHeight", 1.75, [1.2, 2.2];
        ParagraphMarginTop => paragraph_margin_top, "paragraphMarginTop", 5, [0, 30];
        ParagraphSpacing => paragraph_spacing, "paragraphSpacing", 16, [4, 40];
        H1Size => h1_size, "h1Size", 28, [22, 54];
        H1Weight => h1_weight, "h1Weight", 800, [500, 900];
        H1LineHeight => h1_line_height, "h1LineHeight", 1.35, [1.1, 2.2];
        H1MarginTop => h1_margin_top, "h1MarginTop", 40, [0, 80];
        H1MarginBottom => h1_margin_bottom, "h1MarginBottom", 28, [0, 60];
        H1PaddingLeft => h1_padding_left, "h1PaddingLeft", 14, [0, 40];
        H1BorderLeftWidth => h1_border_left_width, "h1BorderLeftWidth", 6, [0, 12];
        H2Size => h2_size, "h2Size", 24, [18, 40];
        H3Size => h3_size, "h3Size", 20, [16, 32];
        HeadingWeight => heading_weight, "headingWeight", 700, [400, 900];
        HeadingLineHeight => heading_line_height, "headingLineHeight", 1.4, [1.1, 2.2];
        HeadingMarginTop => heading_margin_top, "headingMarginTop", 36, [0, 80];
        HeadingMarginBottom => heading_margin_bottom, "headingMarginBottom", 24, [0, 60];
        HeadingPaddingLeft => heading_padding_left, "headingPaddingLeft", 12, [0, 40];
        HeadingBorderLeftWidth => heading_border_left_width, "headingBorderLeftWidth", 4, [0, 12];
        H3MarginTop => h3_margin_top, "h3MarginTop", 28, [0, 80];
        H3MarginBottom => h3_margin_bottom, "h3MarginBottom", 20, [0, 60];
        H3PaddingVertical => h3_padding_vertical, "h3PaddingVertical", 6, [0, 24];
        H3PaddingHorizontal => h3_padding_horizontal, "h3PaddingHorizontal", 12, [0, 40];
        H3BorderLeftWidth => h3_border_left_width, "h3BorderLeftWidth", 3, [0, 12];
        H3BorderRadius => h3_border_radius, "h3BorderRadius", 6, [0, 24];
        BlockRadius => block_radius, "blockRadius", 8, [0, 24];
        BlockPadding => block_padding, "blockPadding", 14, [4, 32];
        QuoteFontSize => quote_font_size, "quoteFontSize", 15, [12, 24];
        QuoteLineHeight => quote_line_height, "quoteLineHeight", 1.8, [1.2, 2.4];
        ImageMaxHeight => image_max_height, "imageMaxHeight", 600, [100, 2000];
        HrHeight => hr_height, "hrHeight", 1, [1, 12];
    }
    color {
        H1Color => h1_color, "h1Color", "#111827";
        H2Color => h2_color, "h2Color", "#1f2937";
        H3Color => h3_color, "h3Color", "#1f2937";
        PTextColor => p_text_color, "pTextColor", "#111827";
        LiTextColor => li_text_color, "liTextColor", "#111827";
        PrimaryColor => primary_color, "primaryColor", "#1f2937";
        SecondaryColor => secondary_color, "secondaryColor", "#4b5563";
        TextColor => text_color, "textColor", "#111827";
        ListMarkerColor => list_marker_color, "listMarkerColor", "#4b5563";
        H1BorderLeftColor => h1_border_left_color, "h1BorderLeftColor", "#002fa7";
        HeadingBorderLeftColor => heading_border_left_color, "headingBorderLeftColor", "#002fa7";
        QuoteBgColor => quote_bg_color, "quoteBgColor", "#f8fafc";
        QuoteBorderColor => quote_border_color, "quoteBorderColor", "#d1d5db";
    }
    keyword {
        BodyTextAlign => body_text_align: TextAlign, "bodyTextAlign", TextAlign::Start;
        BodyWordBreak => body_word_break: WordBreak, "bodyWordBreak", WordBreak::BreakAll;
    }
    text {
        BodyFontFamily => body_font_family, "bodyFontFamily",
            "PingFang SC, system-ui, -apple-system, BlinkMacSystemFont, Helvetica Neue, Hiragino Sans GB, Microsoft YaHei UI, Microsoft YaHei, Arial, sans-serif";
        ImageMargin => image_margin, "imageMargin", "28px auto";
        ImageBorder => image_border, "imageBorder", "1px solid rgba(0, 47, 167, 0.1)";
        ImageBoxShadow => image_box_shadow, "imageBoxShadow",
            "0 2px 8px rgba(0, 47, 167, 0.06), 0 8px 24px rgba(0, 47, 167, 0.08)";
        H3BackgroundColor => h3_background_color, "h3BackgroundColor", "rgba(0, 47, 167, 0.1)";
        HrMargin => hr_margin, "hrMargin", "2.5rem auto";
        HrBackground => hr_background, "hrBackground",
            "linear-gradient(to right, transparent, rgba(0, 47, 167, 0.3), rgba(0, 47, 167, 0.3), transparent)";
        HrBorderTop => hr_border_top, "hrBorderTop", "none";
    }
}

impl StyleField {
    /// Look a field up by name. camelCase, snake_case and kebab-case spellings are accepted,
    /// case-insensitively.
    pub fn from_name(raw: &str) -> Option<StyleField> {
        let wanted: String = raw
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        StyleField::ALL
            .iter()
            .copied()
            .find(|field| field.name().eq_ignore_ascii_case(&wanted))
    }
}

impl fmt::Display for StyleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for StyleField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for StyleField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        StyleField::from_name(&raw)
            .ok_or_else(|| de::Error::custom(format!("unknown style field '{raw}'")))
    }
}
