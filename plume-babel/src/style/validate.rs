//! The single gate for externally sourced style data
//!
//! [`validate`] turns any partial config into a total one. Nothing here fails: a value that
//! cannot be coerced into its field's constraint is dropped and the default takes its place.

use super::config::StylePatch;
use super::field::{Keyword, StyleConfig, StyleValue};
use once_cell::sync::Lazy;
use regex::Regex;

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid hex regex"));

/// Build a total [`StyleConfig`] from `partial`, falling back to defaults field by field.
pub fn validate(partial: &StylePatch) -> StyleConfig {
    let mut config = StyleConfig::default();
    let mut rejected = 0usize;
    for (field, value) in partial.iter() {
        if !config.assign(field, value) {
            rejected += 1;
            tracing::trace!(field = field.name(), %value, "style value rejected, keeping default");
        }
    }
    if rejected > 0 {
        tracing::debug!(rejected, "style values degraded to defaults");
    }
    config
}

pub(crate) fn coerce_number(value: &StyleValue, min: f64, max: f64) -> Option<f64> {
    value.as_number().map(|n| n.clamp(min, max))
}

pub(crate) fn coerce_color(value: &StyleValue) -> Option<String> {
    let candidate = value.as_text()?.trim();
    HEX_COLOR
        .is_match(candidate)
        .then(|| candidate.to_string())
}

pub(crate) fn coerce_keyword<K: Keyword>(value: &StyleValue) -> Option<K> {
    K::parse(value.as_text()?.trim())
}

pub(crate) fn coerce_text(value: &StyleValue) -> Option<String> {
    let trimmed = match value {
        StyleValue::Text(s) => s.trim().to_string(),
        StyleValue::Number(n) => n.to_string(),
    };
    (!trimmed.is_empty()).then_some(trimmed)
}

/// True when `candidate` is a `#rgb` or `#rrggbb` colour.
pub fn is_hex_color(candidate: &str) -> bool {
    HEX_COLOR.is_match(candidate)
}
