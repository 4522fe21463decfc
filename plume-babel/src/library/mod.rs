//! Templates, element presets and the glue between them
//!
//! These are the persisted shapes exchanged with storage and import/export collaborators.
//! Nothing here touches storage itself: every operation takes and returns values.

pub mod mapping;
pub mod preset;
pub mod template;

pub use mapping::derive_refine_by_type;
pub use preset::{ElementStylePreset, ImportedPreset, PresetOrigin, PresetUpdate, StyleLibrary};
pub use template::{
    apply_template, export_template_json, parse_template_import, AppliedTemplate, NewTemplate,
    StyleTemplate, TemplateSource,
};
