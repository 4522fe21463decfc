//! Editor-artifact cleanup for pasted HTML
//!
//! Rich-text editors wrap content in bookkeeping nodes that carry no formatting of their own.
//! Normalization removes or unwraps them so statistics and inference only see the styled
//! content:
//!
//!     removed     elements classed `ProseMirror-separator` or `ProseMirror-trailingBreak`
//!     unwrapped   `span[leaf]`, `section[nodeleaf]`, `.ProseMirror`, `.rich_media_content`
//!     stripped    `contenteditable`, `spellcheck`, `translate`, `lang`, `data-*`

use crate::dom::{has_attr, has_class, replace_children, retain_attrs, tag_name, take_children, HtmlDocument};
use crate::error::BabelError;
use markup5ever_rcdom::Handle;

const REMOVED_CLASSES: &[&str] = &["ProseMirror-separator", "ProseMirror-trailingBreak"];
const UNWRAPPED_CLASSES: &[&str] = &["ProseMirror", "rich_media_content"];
const STRIPPED_ATTRS: &[&str] = &["contenteditable", "spellcheck", "translate", "lang"];

/// Normalize pasted HTML and return the cleaned body markup.
///
/// Normalizing already-normalized HTML returns it unchanged.
pub fn normalize(html: &str) -> Result<String, BabelError> {
    let document = HtmlDocument::parse(html);
    normalize_tree(document.body());
    crate::dom::serialize_children(document.body())
}

/// In-place variant working on an already parsed tree.
pub fn normalize_tree(root: &Handle) {
    let mut counts = Counts::default();
    clean_children(root, &mut counts);
    tracing::debug!(
        removed = counts.removed,
        unwrapped = counts.unwrapped,
        "normalized pasted HTML"
    );
}

#[derive(Default)]
struct Counts {
    removed: usize,
    unwrapped: usize,
}

fn clean_children(parent: &Handle, counts: &mut Counts) {
    let mut next = Vec::new();
    for child in take_children(parent) {
        let Some(tag) = tag_name(&child) else {
            next.push(child);
            continue;
        };
        if REMOVED_CLASSES.iter().any(|class| has_class(&child, class)) {
            counts.removed += 1;
            continue;
        }
        clean_children(&child, counts);
        if is_wrapper(&child, &tag) {
            counts.unwrapped += 1;
            next.extend(take_children(&child));
        } else {
            strip_editor_attrs(&child);
            next.push(child);
        }
    }
    replace_children(parent, next);
}

fn is_wrapper(node: &Handle, tag: &str) -> bool {
    (tag == "span" && has_attr(node, "leaf"))
        || (tag == "section" && has_attr(node, "nodeleaf"))
        || UNWRAPPED_CLASSES.iter().any(|class| has_class(node, class))
}

fn strip_editor_attrs(node: &Handle) {
    retain_attrs(node, |name, _| {
        !STRIPPED_ATTRS.contains(&name) && !name.starts_with("data-")
    });
}
