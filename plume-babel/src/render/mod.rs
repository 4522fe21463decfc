//! Markdown → inline-styled, sanitized HTML
//!
//! Pipeline: Markdown → Comrak AST → element tree → passes → HTML string
//!
//! The element tree is rewritten by a fixed sequence of [`TreePass`]es:
//!
//!     1. StyleInjection    compiled inline styles (per-kind refinement applied)
//!     2. SafeModeDegrade   only in [`RenderMode::Safe`]
//!     3. Sanitizer         always
//!
//! Each call builds a fresh tree; nothing is shared between renders.

pub mod inject;
pub mod lower;
pub mod safe;
pub mod sanitize;

use crate::dom::serialize_node;
use crate::error::BabelError;
use crate::style::{RefineByTypePatch, ResolvedStyles, StyleConfig};
use markup5ever_rcdom::Handle;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use inject::StyleInjection;
pub use safe::SafeModeDegrade;
pub use sanitize::{SanitizePolicy, Sanitizer};

/// One stage of the element-tree rewrite.
///
/// Passes only see the detached container holding the document's top-level blocks.
pub trait TreePass {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    fn run(&self, root: &Handle);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    Standard,
    /// Degrades tables and media embeds into placeholder paragraphs, empty images into spans
    Safe,
}

impl FromStr for RenderMode {
    type Err = BabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(RenderMode::Standard),
            "safe" => Ok(RenderMode::Safe),
            other => Err(BabelError::InvalidOption(format!(
                "unknown render mode '{other}' (expected 'standard' or 'safe')"
            ))),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::Standard => f.write_str("standard"),
            RenderMode::Safe => f.write_str("safe"),
        }
    }
}

/// Options for a render call
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub mode: RenderMode,
    /// Per-element-kind overrides of the base config
    pub refine_by_type: Option<RefineByTypePatch>,
    pub policy: SanitizePolicy,
}

impl RenderOptions {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn with_refine_by_type(mut self, refine: RefineByTypePatch) -> Self {
        self.refine_by_type = Some(refine);
        self
    }

    pub fn with_policy(mut self, policy: SanitizePolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Render Markdown to sanitized HTML with every visual property inlined.
///
/// Top-level blocks are serialized one per line. Malformed Markdown never fails; the only
/// error is an internal serializer fault.
pub fn render(
    markdown: &str,
    config: &StyleConfig,
    options: &RenderOptions,
) -> Result<String, BabelError> {
    let root = lower::markdown_to_dom(markdown);
    let styles = ResolvedStyles::new(config, options.refine_by_type.as_ref());

    let injection = StyleInjection::new(&styles);
    let sanitizer = Sanitizer::new(options.policy);
    let mut passes: Vec<&dyn TreePass> = vec![&injection];
    if options.mode == RenderMode::Safe {
        passes.push(&SafeModeDegrade);
    }
    passes.push(&sanitizer);

    for pass in passes {
        tracing::debug!(pass = pass.name(), mode = %options.mode, "running render pass");
        pass.run(&root);
    }

    serialize_blocks(&root)
}

/// Shorthand for [`render`] with a mode and optional refinement.
pub fn render_markdown(
    markdown: &str,
    config: &StyleConfig,
    mode: RenderMode,
    refine_by_type: Option<&RefineByTypePatch>,
) -> Result<String, BabelError> {
    let mut options = RenderOptions::new(mode);
    options.refine_by_type = refine_by_type.cloned();
    render(markdown, config, &options)
}

fn serialize_blocks(root: &Handle) -> Result<String, BabelError> {
    let blocks = root
        .children
        .borrow()
        .iter()
        .map(serialize_node)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(blocks.join("\n"))
}
