//! Style templates: a named global config plus optional per-kind preset references

use crate::error::{BabelError, ImportIssue, TemplateImportError};
use crate::style::{validate, ElementKind, StyleConfig, StylePatch, SAMPLE_MARKDOWN};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

pub const UNTITLED_TEMPLATE: &str = "Untitled template";

/// Where a template came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateSource {
    #[default]
    Manual,
    HtmlImport,
}

impl TemplateSource {
    /// Lenient reading used by imports: anything but `html_import` is manual.
    pub fn from_wire(raw: Option<&str>) -> Self {
        match raw {
            Some("html_import") => TemplateSource::HtmlImport,
            _ => TemplateSource::Manual,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub source_type: TemplateSource,
    pub global_style_config: StyleConfig,
    #[serde(default = "sample_markdown")]
    pub preview_markdown: String,
    /// Preset id per element kind
    #[serde(default)]
    pub element_preset_mapping: BTreeMap<ElementKind, String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "first_version")]
    pub version: u32,
}

fn sample_markdown() -> String {
    SAMPLE_MARKDOWN.to_string()
}

fn first_version() -> u32 {
    1
}

/// Input for [`StyleTemplate::create`].
#[derive(Debug, Clone, Default)]
pub struct NewTemplate {
    pub name: String,
    pub source_type: TemplateSource,
    /// Laid over the default config, then validated
    pub global_style_config: StylePatch,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub preview_markdown: Option<String>,
    pub element_preset_mapping: BTreeMap<ElementKind, String>,
}

impl NewTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_config(mut self, patch: StylePatch) -> Self {
        self.global_style_config = patch;
        self
    }

    pub fn with_source(mut self, source: TemplateSource) -> Self {
        self.source_type = source;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_preview(mut self, markdown: impl Into<String>) -> Self {
        self.preview_markdown = Some(markdown.into());
        self
    }

    pub fn with_preset(mut self, kind: ElementKind, preset_id: impl Into<String>) -> Self {
        self.element_preset_mapping.insert(kind, preset_id.into());
        self
    }
}

pub fn new_template_id() -> String {
    format!("tpl_{}", Uuid::new_v4().simple())
}

impl StyleTemplate {
    /// Build a fresh, normalized template at version 1.
    pub fn create(input: NewTemplate) -> Self {
        let now = Utc::now();
        let name = input.name.trim();
        StyleTemplate {
            id: new_template_id(),
            name: if name.is_empty() {
                UNTITLED_TEMPLATE.to_string()
            } else {
                name.to_string()
            },
            description: input.description.unwrap_or_default(),
            tags: input.tags,
            source_type: input.source_type,
            global_style_config: validate(&input.global_style_config),
            preview_markdown: input.preview_markdown.unwrap_or_default(),
            element_preset_mapping: input.element_preset_mapping,
            created_at: now,
            updated_at: now,
            version: 1,
        }
        .normalized()
    }

    /// Trim text fields, drop blank tags and fill an empty preview or name.
    pub fn normalized(mut self) -> Self {
        let name = self.name.trim();
        self.name = if name.is_empty() {
            UNTITLED_TEMPLATE.to_string()
        } else {
            name.to_string()
        };
        self.description = self.description.trim().to_string();
        self.tags = self
            .tags
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();
        if self.preview_markdown.trim().is_empty() {
            self.preview_markdown = sample_markdown();
        }
        self.version = self.version.max(1);
        self
    }

    /// A manual copy under a new id, named `"<name> - copy"`.
    pub fn duplicate(&self) -> Self {
        StyleTemplate::create(NewTemplate {
            name: format!("{} - copy", self.name),
            source_type: TemplateSource::Manual,
            global_style_config: self.global_style_config.to_patch(),
            description: Some(self.description.clone()),
            tags: self.tags.clone(),
            preview_markdown: Some(self.preview_markdown.clone()),
            element_preset_mapping: self.element_preset_mapping.clone(),
        })
    }

    /// Record an edit: bump the version and refresh `updated_at`.
    pub fn revise(&mut self) {
        self.version += 1;
        self.updated_at = Utc::now();
    }
}

/// Result of [`apply_template`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedTemplate {
    pub next_style_config: StyleConfig,
    /// The config that was active before, for undo
    pub undo_snapshot: StyleConfig,
}

/// Replace the whole active config with the template's, keeping the old one for undo.
pub fn apply_template(current: &StyleConfig, template: &StyleTemplate) -> AppliedTemplate {
    AppliedTemplate {
        next_style_config: template.global_style_config.clone(),
        undo_snapshot: current.clone(),
    }
}

/// Parse and check an imported template document.
///
/// Shape problems are collected per field rather than stopping at the first one. A
/// document that passes becomes a brand new template (fresh id, version 1); only the
/// name, description, tags, provenance, config and preview are taken over.
pub fn parse_template_import(json: &str) -> Result<StyleTemplate, TemplateImportError> {
    let parsed: Value = serde_json::from_str(json).map_err(|e| {
        tracing::debug!(error = %e, "template import is not valid JSON");
        TemplateImportError {
            message: "Template import failed: the document is not valid JSON".to_string(),
            issues: vec![ImportIssue::new(
                "json",
                "check for missing commas, quotes or brackets",
            )],
        }
    })?;
    let Value::Object(object) = parsed else {
        return Err(TemplateImportError {
            message: "Template import failed: no template object found".to_string(),
            issues: vec![ImportIssue::new("root", "the document must be a JSON object")],
        });
    };

    let issues = check_template_object(&object);
    if !issues.is_empty() {
        tracing::debug!(issues = issues.len(), "template import rejected");
        return Err(TemplateImportError {
            message: "Template import failed: invalid fields".to_string(),
            issues,
        });
    }

    let text = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);
    let config = object
        .get("globalStyleConfig")
        .and_then(Value::as_object)
        .map(StylePatch::from_json_object)
        .unwrap_or_default();
    let tags = object
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| tags.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default();

    Ok(StyleTemplate::create(NewTemplate {
        name: text("name").unwrap_or_default(),
        source_type: TemplateSource::from_wire(object.get("sourceType").and_then(Value::as_str)),
        global_style_config: config,
        description: text("description"),
        tags,
        preview_markdown: text("previewMarkdown"),
        element_preset_mapping: BTreeMap::new(),
    }))
}

fn check_template_object(object: &Map<String, Value>) -> Vec<ImportIssue> {
    let mut issues = Vec::new();
    let is_string_or_absent = |key: &str| object.get(key).map_or(true, Value::is_string);

    if !object
        .get("name")
        .and_then(Value::as_str)
        .is_some_and(|name| !name.trim().is_empty())
    {
        issues.push(ImportIssue::new("name", "name must be a non-empty string"));
    }
    if !object.get("globalStyleConfig").is_some_and(Value::is_object) {
        issues.push(ImportIssue::new(
            "globalStyleConfig",
            "globalStyleConfig must be an object",
        ));
    }
    if !is_string_or_absent("previewMarkdown") {
        issues.push(ImportIssue::new("previewMarkdown", "previewMarkdown must be a string"));
    }
    if !is_string_or_absent("description") {
        issues.push(ImportIssue::new("description", "description must be a string"));
    }
    match object.get("tags") {
        None => {}
        Some(Value::Array(tags)) => {
            if !tags.iter().all(Value::is_string) {
                issues.push(ImportIssue::new("tags", "every tag must be a string"));
            }
        }
        Some(_) => issues.push(ImportIssue::new("tags", "tags must be an array of strings")),
    }
    issues
}

/// Pretty JSON of the normalized template.
pub fn export_template_json(template: &StyleTemplate) -> Result<String, BabelError> {
    Ok(serde_json::to_string_pretty(&template.clone().normalized())?)
}
