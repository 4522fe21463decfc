//! Allow-list sanitizer
//!
//! Always the last pass before serialization, in both render modes. Guarantees:
//!
//!     - only allow-listed tags survive; other elements are unwrapped (children kept)
//!     - `script` and `style` elements disappear together with their content
//!     - comments and other non-element, non-text nodes are dropped
//!     - attributes are filtered per tag, URL attributes per protocol

use super::TreePass;
use crate::dom::{get_attr, replace_children, retain_attrs, tag_name, take_children};
use markup5ever_rcdom::{Handle, NodeData};
use serde::{Deserialize, Serialize};
use url::Url;

/// Tags that always survive sanitizing.
const BASE_TAGS: &[&str] = &[
    "p", "h2", "h3", "strong", "em", "span", "ul", "ol", "li", "blockquote", "hr", "pre", "code",
    "img", "a",
];

/// Elements removed together with everything inside them.
const STRIPPED_WITH_CONTENT: &[&str] = &["script", "style"];

const LINK_ATTRS: &[&str] = &["href", "title", "target", "rel"];
const IMAGE_ATTRS: &[&str] = &["src", "alt", "title"];

const HREF_PROTOCOLS: &[&str] = &["http", "https", "mailto", "tel"];
const SRC_PROTOCOLS: &[&str] = &["http", "https", "data"];

/// Tunable part of the allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizePolicy {
    /// Keep `h1` elements (otherwise they are unwrapped like any other disallowed tag)
    pub allow_h1: bool,
}

impl Default for SanitizePolicy {
    fn default() -> Self {
        Self { allow_h1: true }
    }
}

impl SanitizePolicy {
    pub fn allows_tag(&self, tag: &str) -> bool {
        BASE_TAGS.contains(&tag) || (self.allow_h1 && tag == "h1")
    }
}

/// Allow-list enforcement as a pipeline pass.
pub struct Sanitizer {
    policy: SanitizePolicy,
}

impl Sanitizer {
    pub fn new(policy: SanitizePolicy) -> Self {
        Self { policy }
    }
}

impl TreePass for Sanitizer {
    fn name(&self) -> &'static str {
        "sanitize"
    }

    fn run(&self, root: &Handle) {
        sanitize(root, &self.policy);
    }
}

/// Sanitize every descendant of `root` in place. `root` itself is left as is.
pub fn sanitize(root: &Handle, policy: &SanitizePolicy) {
    let mut stats = SanitizeStats::default();
    sanitize_children(root, policy, &mut stats);
    tracing::debug!(
        removed = stats.removed,
        unwrapped = stats.unwrapped,
        "sanitize finished"
    );
}

#[derive(Default)]
struct SanitizeStats {
    removed: usize,
    unwrapped: usize,
}

fn sanitize_children(parent: &Handle, policy: &SanitizePolicy, stats: &mut SanitizeStats) {
    let mut next = Vec::new();
    for child in take_children(parent) {
        if matches!(child.data, NodeData::Text { .. }) {
            next.push(child);
            continue;
        }
        let Some(tag) = tag_name(&child) else {
            stats.removed += 1;
            continue;
        };
        if STRIPPED_WITH_CONTENT.contains(&tag.as_str()) {
            stats.removed += 1;
            tracing::trace!(tag = tag.as_str(), "removed element with content");
            continue;
        }
        sanitize_children(&child, policy, stats);
        if policy.allows_tag(&tag) {
            filter_attributes(&child, &tag);
            next.push(child);
        } else {
            stats.unwrapped += 1;
            tracing::trace!(tag = tag.as_str(), "unwrapped disallowed element");
            next.extend(take_children(&child));
        }
    }
    replace_children(parent, next);
}

fn filter_attributes(node: &Handle, tag: &str) {
    let extra: &[&str] = match tag {
        "a" => LINK_ATTRS,
        "img" => IMAGE_ATTRS,
        _ => &[],
    };
    retain_attrs(node, |name, value| {
        if name == "style" {
            return true;
        }
        if !extra.contains(&name) {
            return false;
        }
        let keep = match name {
            "href" => url_allowed(value, HREF_PROTOCOLS),
            "src" => url_allowed(value, SRC_PROTOCOLS),
            _ => true,
        };
        if !keep {
            tracing::trace!(tag, attribute = name, "dropped URL with disallowed protocol");
        }
        keep
    });
    // An emptied style attribute carries nothing.
    if get_attr(node, "style").is_some_and(|style| style.trim().is_empty()) {
        retain_attrs(node, |name, _| name != "style");
    }
}

/// Relative URLs pass; absolute ones only with an allow-listed scheme.
pub fn url_allowed(raw: &str, protocols: &[&str]) -> bool {
    match Url::parse(raw.trim()) {
        Ok(url) => protocols.contains(&url.scheme()),
        Err(url::ParseError::RelativeUrlWithoutBase) => true,
        Err(_) => false,
    }
}
