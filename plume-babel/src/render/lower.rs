//! Markdown → HTML element tree
//!
//! Pipeline: Markdown string → Comrak AST → RcDom elements (unstyled)
//!
//! The tree produced here is deliberately plain: no styles except the structural
//! `text-align` seeded on table cells, and `language-*` classes on code, which the
//! style pass strips again. Raw HTML in the source is dropped; it never reaches the DOM.

use crate::dom::{append, create_element, create_text, set_attr};
use comrak::nodes::{AstNode, NodeValue, TableAlignment};
use comrak::{parse_document, Arena, ComrakOptions};
use markup5ever_rcdom::Handle;

/// Deepest heading level the host accepts; deeper headings are lowered onto it.
const MAX_HEADING_LEVEL: u8 = 3;

pub(crate) fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options
}

/// Parse `source` and lower it into a detached container element.
///
/// Every top-level block of the document becomes a child of the returned container.
pub fn markdown_to_dom(source: &str) -> Handle {
    let arena = Arena::new();
    let options = default_comrak_options();
    let root = parse_document(&arena, source, &options);

    let container = create_element("div", vec![]);
    for child in root.children() {
        lower_block(child, &container, false);
    }
    tracing::debug!(
        blocks = container.children.borrow().len(),
        "lowered markdown into element tree"
    );
    container
}

fn lower_block<'a>(node: &'a AstNode<'a>, parent: &Handle, tight: bool) {
    let value = node.data.borrow().value.clone();
    match value {
        NodeValue::Paragraph => {
            if tight {
                // Tight list items carry their text directly.
                lower_inlines(node, parent);
            } else {
                let p = create_element("p", vec![]);
                lower_inlines(node, &p);
                append(parent, p);
            }
        }

        NodeValue::Heading(heading) => {
            let level = heading.level.clamp(1, MAX_HEADING_LEVEL);
            let h = create_element(&format!("h{level}"), vec![]);
            lower_inlines(node, &h);
            append(parent, h);
        }

        NodeValue::List(list) => {
            let tag = match list.list_type {
                comrak::nodes::ListType::Bullet => "ul",
                comrak::nodes::ListType::Ordered => "ol",
            };
            let element = create_element(tag, vec![]);
            for item in node.children() {
                lower_block(item, &element, list.tight);
            }
            append(parent, element);
        }

        NodeValue::Item(_) => {
            let li = create_element("li", vec![]);
            for child in node.children() {
                lower_block(child, &li, tight);
            }
            append(parent, li);
        }

        NodeValue::BlockQuote => {
            let quote = create_element("blockquote", vec![]);
            for child in node.children() {
                lower_block(child, &quote, false);
            }
            append(parent, quote);
        }

        NodeValue::CodeBlock(code_block) => {
            let pre = create_element("pre", vec![]);
            let language = code_block.info.split_whitespace().next().unwrap_or("");
            let code = if language.is_empty() {
                create_element("code", vec![])
            } else {
                create_element("code", vec![("class", &format!("language-{language}"))])
            };
            append(&code, create_text(&code_block.literal));
            append(&pre, code);
            append(parent, pre);
        }

        NodeValue::ThematicBreak => append(parent, create_element("hr", vec![])),

        NodeValue::HtmlBlock(_) => {
            tracing::trace!("dropping raw HTML block");
        }

        NodeValue::Table(table) => {
            let element = create_element("table", vec![]);
            let mut body: Option<Handle> = None;
            for row in node.children() {
                let is_header = matches!(row.data.borrow().value, NodeValue::TableRow(true));
                let tr = create_element("tr", vec![]);
                for cell in row.children() {
                    let tag = if is_header { "th" } else { "td" };
                    let td = create_element(tag, vec![]);
                    let column = column_index(cell);
                    if let Some(align) = table.alignments.get(column).and_then(|a| css_align(*a)) {
                        set_attr(&td, "style", &format!("text-align:{align};"));
                    }
                    lower_inlines(cell, &td);
                    append(&tr, td);
                }
                if is_header {
                    let head = create_element("thead", vec![]);
                    append(&head, tr);
                    append(&element, head);
                } else {
                    let tbody = body.get_or_insert_with(|| create_element("tbody", vec![]));
                    append(tbody, tr);
                }
            }
            if let Some(tbody) = body {
                append(&element, tbody);
            }
            append(parent, element);
        }

        // Containers without a host equivalent contribute their content only.
        _ => {
            for child in node.children() {
                lower_block(child, parent, tight);
            }
        }
    }
}

fn lower_inlines<'a>(node: &'a AstNode<'a>, parent: &Handle) {
    for child in node.children() {
        lower_inline(child, parent);
    }
}

fn lower_inline<'a>(node: &'a AstNode<'a>, parent: &Handle) {
    let value = node.data.borrow().value.clone();
    match value {
        NodeValue::Text(text) => append(parent, create_text(&text)),
        NodeValue::SoftBreak => append(parent, create_text("\n")),
        NodeValue::LineBreak => append(parent, create_element("br", vec![])),
        NodeValue::Code(code) => {
            let element = create_element("code", vec![]);
            append(&element, create_text(&code.literal));
            append(parent, element);
        }
        NodeValue::Emph => wrap_inlines(node, parent, "em"),
        NodeValue::Strong => wrap_inlines(node, parent, "strong"),
        NodeValue::Strikethrough => wrap_inlines(node, parent, "del"),
        NodeValue::Link(link) => {
            let a = create_element("a", vec![("href", &link.url)]);
            if !link.title.is_empty() {
                set_attr(&a, "title", &link.title);
            }
            lower_inlines(node, &a);
            append(parent, a);
        }
        NodeValue::Image(link) => {
            let alt = plain_text(node);
            let img = create_element("img", vec![("src", &link.url), ("alt", &alt)]);
            if !link.title.is_empty() {
                set_attr(&img, "title", &link.title);
            }
            append(parent, img);
        }
        NodeValue::HtmlInline(_) => {
            tracing::trace!("dropping inline raw HTML");
        }
        _ => lower_inlines(node, parent),
    }
}

fn wrap_inlines<'a>(node: &'a AstNode<'a>, parent: &Handle, tag: &str) {
    let element = create_element(tag, vec![]);
    lower_inlines(node, &element);
    append(parent, element);
}

/// Text of an inline subtree, used for image alt text.
fn plain_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut out = String::new();
    for child in node.descendants().skip(1) {
        match &child.data.borrow().value {
            NodeValue::Text(text) => out.push_str(text),
            NodeValue::Code(code) => out.push_str(&code.literal),
            NodeValue::SoftBreak | NodeValue::LineBreak => out.push(' '),
            _ => {}
        }
    }
    out
}

/// Column index of a table cell among its siblings.
fn column_index<'a>(cell: &'a AstNode<'a>) -> usize {
    let mut index = 0;
    let mut current = cell.previous_sibling();
    while let Some(sibling) = current {
        index += 1;
        current = sibling.previous_sibling();
    }
    index
}

fn css_align(alignment: TableAlignment) -> Option<&'static str> {
    match alignment {
        TableAlignment::None => None,
        TableAlignment::Left => Some("left"),
        TableAlignment::Center => Some("center"),
        TableAlignment::Right => Some("right"),
    }
}
