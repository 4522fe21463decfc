//! Template preset references → refine patch

use super::preset::StyleLibrary;
use super::template::StyleTemplate;
use crate::style::RefineByTypePatch;

/// Resolve the template's per-kind preset references against `library`.
///
/// A reference to a missing preset, or to a preset of another kind, is skipped and that
/// kind keeps rendering from the global config.
pub fn derive_refine_by_type(template: &StyleTemplate, library: &StyleLibrary) -> RefineByTypePatch {
    let mut refine = RefineByTypePatch::new();
    for (&kind, preset_id) in &template.element_preset_mapping {
        match library.get(preset_id) {
            Some(preset) if preset.element_type == kind => {
                refine.set(kind, preset.config_patch.clone());
            }
            Some(preset) => tracing::debug!(
                kind = %kind,
                preset = preset_id.as_str(),
                preset_kind = %preset.element_type,
                "skipping preset of another element kind"
            ),
            None => tracing::debug!(kind = %kind, preset = preset_id.as_str(), "skipping missing preset"),
        }
    }
    refine
}
