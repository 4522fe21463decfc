//! Error types for render and inspection operations

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while compiling or inspecting documents.
///
/// Style validation and inference never fail; invalid values degrade to defaults.
/// What remains are genuine internal faults and boundary (de)serialization problems.
#[derive(Debug, Error)]
pub enum BabelError {
    /// The HTML tree could not be written out
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// An option value was not recognised
    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

impl BabelError {
    pub(crate) fn serialization(context: &str, err: impl std::fmt::Display) -> Self {
        BabelError::Serialization(format!("{context}: {err}"))
    }
}

/// One rejected field of an imported template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportIssue {
    /// Offending key, or `json` / `root` for document-level problems
    pub field: String,
    pub message: String,
}

impl ImportIssue {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Rejection of a template JSON document, listing every offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct TemplateImportError {
    pub message: String,
    pub issues: Vec<ImportIssue>,
}
