//! Style injection pass

use super::TreePass;
use crate::dom::{children_of, get_attr, remove_attr, set_attr, tag_name};
use crate::style::compiler::style_for_tag;
use crate::style::ResolvedStyles;
use markup5ever_rcdom::Handle;

/// Compiles and injects the inline style of every element with a compiler.
///
/// Compiled declarations are appended after any style already on the node, and
/// `class`/`className` attributes are removed from every node that gets a style.
pub struct StyleInjection<'s> {
    styles: &'s ResolvedStyles<'s>,
}

impl<'s> StyleInjection<'s> {
    pub fn new(styles: &'s ResolvedStyles<'s>) -> Self {
        Self { styles }
    }

    fn visit(&self, node: &Handle, styled: &mut usize) {
        if let Some(tag) = tag_name(node) {
            let config = self.styles.for_tag(&tag);
            if let Some(style) = style_for_tag(&tag, config) {
                assign_style(node, &style);
                *styled += 1;
            }
        }
        for child in children_of(node) {
            self.visit(&child, styled);
        }
    }
}

impl TreePass for StyleInjection<'_> {
    fn name(&self) -> &'static str {
        "inject-styles"
    }

    fn run(&self, root: &Handle) {
        let mut styled = 0;
        for child in children_of(root) {
            self.visit(&child, &mut styled);
        }
        tracing::debug!(styled, "inline styles injected");
    }
}

/// Append `style` to the node's inline style and drop its class attributes.
pub fn assign_style(node: &Handle, style: &str) {
    let merged = match get_attr(node, "style") {
        Some(existing) if !existing.trim().is_empty() => {
            format!("{}; {}", existing.trim().trim_end_matches(';').trim_end(), style)
        }
        _ => style.to_string(),
    };
    set_attr(node, "style", merged.trim());
    remove_attr(node, "class");
    remove_attr(node, "className");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{create_element, has_attr};

    #[test]
    fn appends_to_existing_style() {
        let td = create_element("td", vec![("style", "text-align:center;"), ("class", "x")]);
        assign_style(&td, "color:red;");
        assert_eq!(get_attr(&td, "style").as_deref(), Some("text-align:center; color:red;"));
        assert!(!has_attr(&td, "class"));
    }

    #[test]
    fn sets_style_when_absent() {
        let p = create_element("p", vec![]);
        assign_style(&p, "color:red;");
        assert_eq!(get_attr(&p, "style").as_deref(), Some("color:red;"));
    }
}
