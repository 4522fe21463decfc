//! Shared configuration loader for the plume toolchain.
//!
//! `defaults/plume.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`PlumeConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use plume_babel::render::{RenderMode, RenderOptions, SanitizePolicy};
use plume_babel::style::{validate, StyleConfig, StylePatch};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/plume.default.toml");

/// Top-level configuration consumed by plume applications.
#[derive(Debug, Clone, Deserialize)]
pub struct PlumeConfig {
    pub render: RenderConfig,
    pub inspect: InspectConfig,
    pub log: LogConfig,
    /// Style field overrides, not yet validated
    #[serde(default)]
    pub style: StylePatch,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub mode: RenderModeConfig,
    pub allow_h1: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderModeConfig {
    Standard,
    Safe,
}

impl From<RenderModeConfig> for RenderMode {
    fn from(mode: RenderModeConfig) -> Self {
        match mode {
            RenderModeConfig::Standard => RenderMode::Standard,
            RenderModeConfig::Safe => RenderMode::Safe,
        }
    }
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        RenderOptions::new(config.mode.into()).with_policy(SanitizePolicy {
            allow_h1: config.allow_h1,
        })
    }
}

/// Controls inspection reports.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub max_declarations: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub level: String,
}

impl PlumeConfig {
    /// The configured style overrides laid over the defaults, validated.
    pub fn style_config(&self) -> StyleConfig {
        validate(&self.style)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<PlumeConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<PlumeConfig, ConfigError> {
    Loader::new().build()
}
