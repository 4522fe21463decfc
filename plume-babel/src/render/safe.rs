//! Safe-mode degrade pass
//!
//! Replaces host-incompatible nodes with inert placeholders: a paragraph for block nodes, a
//! span for images, which only occur in inline context. Runs after style injection, so
//! placeholders never inherit the dropped node's style.

use super::TreePass;
use crate::dom::{create_text_element, get_attr, replace_children, tag_name, take_children};
use markup5ever_rcdom::Handle;

/// Tags replaced wholesale in safe mode.
pub const DROPPED_TAGS: &[&str] = &[
    "table", "thead", "tbody", "tfoot", "tr", "th", "td", "iframe", "video", "audio",
];

pub const EMPTY_IMAGE_PLACEHOLDER: &str = "[image removed: empty src]";

pub fn removed_placeholder(tag: &str) -> String {
    format!("[removed {tag} in safe mode]")
}

pub struct SafeModeDegrade;

impl SafeModeDegrade {
    fn degrade(&self, parent: &Handle, degraded: &mut usize) {
        let mut next = Vec::new();
        for child in take_children(parent) {
            match self.placeholder_for(&child) {
                Some((tag, text)) => {
                    tracing::trace!(placeholder = text.as_str(), "degraded node in safe mode");
                    *degraded += 1;
                    next.push(create_text_element(tag, &text));
                }
                None => {
                    self.degrade(&child, degraded);
                    next.push(child);
                }
            }
        }
        replace_children(parent, next);
    }

    fn placeholder_for(&self, node: &Handle) -> Option<(&'static str, String)> {
        let tag = tag_name(node)?;
        if tag == "img" {
            let src = get_attr(node, "src").unwrap_or_default();
            return src
                .trim()
                .is_empty()
                .then(|| ("span", EMPTY_IMAGE_PLACEHOLDER.to_string()));
        }
        DROPPED_TAGS
            .contains(&tag.as_str())
            .then(|| ("p", removed_placeholder(&tag)))
    }
}

impl TreePass for SafeModeDegrade {
    fn name(&self) -> &'static str {
        "safe-mode"
    }

    fn run(&self, root: &Handle) {
        let mut degraded = 0;
        self.degrade(root, &mut degraded);
        tracing::debug!(degraded, "safe-mode degrade finished");
    }
}
