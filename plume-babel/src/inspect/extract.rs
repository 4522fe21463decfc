//! Per-element preset extraction
//!
//! Runs the inference probes once per element kind, restricted to the kind's own tags and
//! editable fields. Unlike whole-document inference nothing falls back: a preset only carries
//! the fields the HTML actually showed.

use super::infer::{Probe, StyleIndex};
use crate::style::{ElementKind, StyleConfig, StylePatch};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedElementPreset {
    pub element_type: ElementKind,
    pub config_patch: StylePatch,
    pub source_stats: SourceStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceStats {
    /// Elements of the kind's primary tag
    pub matched_nodes: usize,
    /// Inline declarations seen on the kind's tags
    pub sampled_declarations: usize,
}

/// Outcome of [`extract_presets`](super::extract_presets).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub markdown: String,
    pub normalized_html: String,
    pub presets: Vec<ExtractedElementPreset>,
    pub warnings: Vec<String>,
}

pub const NOTHING_EXTRACTED: &str = "No extractable element styles were found in the pasted HTML";

pub fn no_fields_warning(kind: ElementKind, matched: usize) -> String {
    format!("Found {matched} <{kind}> element(s) but no usable inline styles for {kind}")
}

/// Tags a probe samples when run for `kind`: the probe's tags that belong to the kind,
/// or the kind's primary tag when none do.
fn retarget(kind: ElementKind, probe: &Probe) -> Vec<&'static str> {
    let scoped: Vec<&'static str> = probe
        .tags
        .iter()
        .copied()
        .filter(|tag| kind.scope_tags().contains(tag))
        .collect();
    if scoped.is_empty() {
        vec![kind.as_str()]
    } else {
        scoped
    }
}

/// Presets and warnings for every kind present in the indexed document, in
/// [`ElementKind::ALL`] order. Values are coerced against `base`.
pub fn extract_from_index(
    index: &StyleIndex,
    base: &StyleConfig,
) -> (Vec<ExtractedElementPreset>, Vec<String>) {
    let mut presets = Vec::new();
    let mut warnings = Vec::new();

    for kind in ElementKind::ALL {
        let matched_nodes = index.count(&[kind.as_str()]);
        if matched_nodes == 0 {
            continue;
        }
        let scope: &dyn Fn(&Probe) -> Vec<&'static str> = &|probe| retarget(kind, probe);
        let config_patch: StylePatch = kind
            .editable_fields()
            .iter()
            .filter_map(|&field| index.infer_field(field, base, Some(scope)).map(|value| (field, value)))
            .collect();

        if config_patch.is_empty() {
            warnings.push(no_fields_warning(kind, matched_nodes));
            continue;
        }
        tracing::debug!(kind = %kind, fields = config_patch.len(), "extracted element preset");
        presets.push(ExtractedElementPreset {
            element_type: kind,
            config_patch,
            source_stats: SourceStats {
                matched_nodes,
                sampled_declarations: index.declaration_count(kind.scope_tags()),
            },
        });
    }

    if presets.is_empty() {
        warnings.push(NOTHING_EXTRACTED.to_string());
    }
    (presets, warnings)
}
