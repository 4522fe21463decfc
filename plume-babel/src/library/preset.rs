//! Element style presets and the preset library
//!
//! A preset is a named partial config for one element kind. The library keeps preset names
//! unique: every insertion picks `<base>`, `<base>-2`, `<base>-3`, ... whichever is free first.
//! New presets are inserted at the front.

use crate::error::BabelError;
use crate::inspect::ExtractedElementPreset;
use crate::style::{ElementKind, StyleConfig, StylePatch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

pub const SYSTEM_SOURCE: &str = "System default";
pub const MANUAL_SOURCE: &str = "Manual";
pub const COPY_SOURCE: &str = "Manual copy";
pub const DEFAULT_SOURCE_TITLE: &str = "Reference document";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetOrigin {
    System,
    #[default]
    Manual,
    Extracted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStylePreset {
    pub id: String,
    pub name: String,
    pub element_type: ElementKind,
    #[serde(default)]
    pub config_patch: StylePatch,
    #[serde(default)]
    pub source_title: String,
    #[serde(default)]
    pub origin: PresetOrigin,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changes accepted by [`StyleLibrary::update`]; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct PresetUpdate {
    pub name: Option<String>,
    pub config_patch: Option<StylePatch>,
    pub source_title: Option<String>,
}

/// How one extracted preset landed in the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedPreset {
    pub id: String,
    pub element_type: ElementKind,
    pub final_name: String,
    /// The wanted name, when it was taken and a suffix had to be added
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renamed_from: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleLibrary {
    #[serde(default)]
    presets: Vec<ElementStylePreset>,
}

fn new_preset_id() -> String {
    format!("sp_{}", Uuid::new_v4().simple())
}

/// Default values of every field the kind may edit.
fn default_patch(kind: ElementKind) -> StylePatch {
    StyleConfig::default().project(kind.editable_fields())
}

/// `base` if free, otherwise the first free `base-N` for N >= 2.
fn unique_name(base: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}

impl StyleLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// One default preset per element kind.
    pub fn seeded() -> Self {
        let now = Utc::now();
        let presets = ElementKind::ALL
            .iter()
            .enumerate()
            .map(|(index, &kind)| ElementStylePreset {
                id: format!("sys_default_{kind}_{}", index + 1),
                name: format!("default-{kind}"),
                element_type: kind,
                config_patch: default_patch(kind),
                source_title: SYSTEM_SOURCE.to_string(),
                origin: PresetOrigin::System,
                created_at: now,
                updated_at: now,
            })
            .collect();
        StyleLibrary { presets }
    }

    /// Load a library document. An empty one is replaced by the seeded library.
    pub fn from_json(json: &str) -> Result<Self, BabelError> {
        let library: StyleLibrary = serde_json::from_str(json)?;
        if library.presets.is_empty() {
            return Ok(StyleLibrary::seeded());
        }
        Ok(library)
    }

    pub fn to_json(&self) -> Result<String, BabelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn presets(&self) -> &[ElementStylePreset] {
        &self.presets
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ElementStylePreset> {
        self.presets.iter().find(|preset| preset.id == id)
    }

    /// Presets usable for `kind`.
    pub fn for_kind(&self, kind: ElementKind) -> impl Iterator<Item = &ElementStylePreset> {
        self.presets.iter().filter(move |preset| preset.element_type == kind)
    }

    fn names(&self) -> HashSet<String> {
        self.presets.iter().map(|preset| preset.name.clone()).collect()
    }

    /// New preset holding the kind's default values, named `preferred` or `manual-<kind>`.
    pub fn create_manual(&mut self, kind: ElementKind, preferred: Option<&str>) -> ElementStylePreset {
        let base = preferred
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("manual-{kind}"));
        let now = Utc::now();
        let preset = ElementStylePreset {
            id: new_preset_id(),
            name: unique_name(&base, &self.names()),
            element_type: kind,
            config_patch: default_patch(kind),
            source_title: MANUAL_SOURCE.to_string(),
            origin: PresetOrigin::Manual,
            created_at: now,
            updated_at: now,
        };
        tracing::debug!(id = preset.id.as_str(), name = preset.name.as_str(), "created preset");
        self.presets.insert(0, preset.clone());
        preset
    }

    /// Store extracted presets as `<sourceTitle>-<kind>`, renaming on conflict.
    ///
    /// The new presets keep their extraction order and go in front of the existing ones.
    pub fn import_extracted(
        &mut self,
        extracted: &[ExtractedElementPreset],
        source_title: &str,
    ) -> Vec<ImportedPreset> {
        let source_title = match source_title.trim() {
            "" => DEFAULT_SOURCE_TITLE,
            trimmed => trimmed,
        };
        let mut taken = self.names();
        let now = Utc::now();
        let mut created = Vec::with_capacity(extracted.len());
        let mut report = Vec::with_capacity(extracted.len());

        for preset in extracted {
            let wanted = format!("{source_title}-{}", preset.element_type);
            let final_name = unique_name(&wanted, &taken);
            taken.insert(final_name.clone());
            let id = new_preset_id();
            report.push(ImportedPreset {
                id: id.clone(),
                element_type: preset.element_type,
                renamed_from: (final_name != wanted).then_some(wanted),
                final_name: final_name.clone(),
            });
            created.push(ElementStylePreset {
                id,
                name: final_name,
                element_type: preset.element_type,
                config_patch: preset.config_patch.clone(),
                source_title: source_title.to_string(),
                origin: PresetOrigin::Extracted,
                created_at: now,
                updated_at: now,
            });
        }

        tracing::debug!(imported = created.len(), source_title, "imported extracted presets");
        created.append(&mut self.presets);
        self.presets = created;
        report
    }

    /// Apply `changes` to the preset with `id`. Returns `false` when there is none.
    ///
    /// A new name is made unique among the other presets.
    pub fn update(&mut self, id: &str, changes: PresetUpdate) -> bool {
        let others: HashSet<String> = self
            .presets
            .iter()
            .filter(|preset| preset.id != id)
            .map(|preset| preset.name.clone())
            .collect();
        let Some(preset) = self.presets.iter_mut().find(|preset| preset.id == id) else {
            return false;
        };
        if let Some(name) = changes.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            preset.name = unique_name(name, &others);
        }
        if let Some(patch) = changes.config_patch {
            preset.config_patch = patch;
        }
        if let Some(source_title) = changes.source_title {
            preset.source_title = source_title;
        }
        preset.updated_at = Utc::now();
        true
    }

    /// Copy a preset under a new id, named `<name>-copy` (made unique).
    pub fn duplicate(&mut self, id: &str) -> Option<ElementStylePreset> {
        let source = self.get(id)?.clone();
        let now = Utc::now();
        let copy = ElementStylePreset {
            id: new_preset_id(),
            name: unique_name(&format!("{}-copy", source.name), &self.names()),
            source_title: COPY_SOURCE.to_string(),
            origin: PresetOrigin::Manual,
            created_at: now,
            updated_at: now,
            ..source
        };
        self.presets.insert(0, copy.clone());
        Some(copy)
    }

    /// Remove the preset with `id`. Returns whether one was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.presets.len();
        self.presets.retain(|preset| preset.id != id);
        before != self.presets.len()
    }
}
