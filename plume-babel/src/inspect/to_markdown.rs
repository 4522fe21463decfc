//! HTML → Markdown conversion for pasted content
//!
//! Pipeline: element tree → inline runs → Comrak AST → Markdown string
//!
//! Block elements map onto their CommonMark counterparts; unknown containers (`div`,
//! `section`, table parts, ...) are transparent and their content is lifted into the
//! surrounding flow. Loose text and inline elements between blocks are gathered into
//! paragraphs. Styling is discarded: the output is plain CommonMark.

use crate::dom::{children_of, get_attr, tag_name, text_content};
use crate::error::BabelError;
use crate::render::lower::default_comrak_options;
use comrak::nodes::{
    Ast, AstNode, ListDelimType, ListType, NodeCode, NodeCodeBlock, NodeHeading, NodeLink,
    NodeList, NodeValue,
};
use comrak::{format_commonmark, Arena};
use markup5ever_rcdom::{Handle, NodeData};
use std::cell::RefCell;

/// Elements skipped together with their content.
const IGNORED: &[&str] = &["script", "style", "head", "title", "meta", "link", "template"];

/// Inline content collected from the element tree before it is lowered to Comrak nodes.
#[derive(Debug, Clone, PartialEq)]
enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Emph(Vec<Inline>),
    Strike(Vec<Inline>),
    Code(String),
    Link { url: String, title: String, children: Vec<Inline> },
    Image { url: String, title: String, alt: String },
    Break,
}

/// Convert the children of `root` to CommonMark.
pub fn tree_to_markdown(root: &Handle) -> Result<String, BabelError> {
    let arena = Arena::new();
    let document = new_node(&arena, NodeValue::Document);
    let builder = Builder { arena: &arena };
    builder.blocks(&children_of(root), document);

    let mut output = Vec::new();
    format_commonmark(document, &default_comrak_options(), &mut output)
        .map_err(|e| BabelError::serialization("Comrak serialization failed", e))?;
    let markdown = String::from_utf8(output)
        .map_err(|e| BabelError::serialization("UTF-8 conversion failed", e))?;

    // Comrak separates adjacent lists with an HTML comment
    let markdown = markdown.replace("<!-- end list -->\n\n", "");
    Ok(tighten_fence_info(&markdown).trim().to_string())
}

/// Comrak writes a space between an opening fence and its info string ("``` rust").
/// Joins them back so the fence reads "```rust". Lines inside a code block are left as is.
fn tighten_fence_info(markdown: &str) -> String {
    let mut open_fence: Option<&str> = None;
    let mut lines = Vec::new();
    for line in markdown.split('\n') {
        let body = line.trim_start();
        let fence_len = body.bytes().take_while(|&b| b == b'`').count();
        match open_fence {
            Some(fence) => {
                if body.trim_end() == fence {
                    open_fence = None;
                }
                lines.push(line.to_string());
            }
            None if fence_len >= 3 => {
                let (fence, info) = body.split_at(fence_len);
                open_fence = Some(fence);
                let indent = &line[..line.len() - body.len()];
                lines.push(format!("{indent}{fence}{}", info.trim_start()));
            }
            None => lines.push(line.to_string()),
        }
    }
    lines.join("\n")
}

fn new_node<'a>(arena: &'a Arena<AstNode<'a>>, value: NodeValue) -> &'a AstNode<'a> {
    arena.alloc(AstNode::new(RefCell::new(Ast::new(value, (0, 0).into()))))
}

struct Builder<'a> {
    arena: &'a Arena<AstNode<'a>>,
}

impl<'a> Builder<'a> {
    fn node(&self, value: NodeValue) -> &'a AstNode<'a> {
        new_node(self.arena, value)
    }

    /// Lower a sibling sequence into `parent`, flushing inline runs as paragraphs.
    fn blocks(&self, nodes: &[Handle], parent: &'a AstNode<'a>) {
        let mut run = Vec::new();
        for node in nodes {
            match tag_name(node) {
                Some(tag) if is_block(&tag) => {
                    self.flush(&mut run, parent);
                    self.block(node, &tag, parent);
                }
                Some(tag) if IGNORED.contains(&tag.as_str()) => {}
                _ => collect_inline(node, &mut run),
            }
        }
        self.flush(&mut run, parent);
    }

    fn block(&self, node: &Handle, tag: &str, parent: &'a AstNode<'a>) {
        match tag {
            "p" => {
                let mut run = Vec::new();
                for child in children_of(node) {
                    collect_inline(&child, &mut run);
                }
                self.flush(&mut run, parent);
            }
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = tag[1..].parse::<u8>().unwrap_or(2);
                let mut run = Vec::new();
                for child in children_of(node) {
                    collect_inline(&child, &mut run);
                }
                let run = tidy(run);
                if run.is_empty() {
                    return;
                }
                let heading = self.node(NodeValue::Heading(NodeHeading { level, setext: false }));
                parent.append(heading);
                self.inlines(&run, heading);
            }
            "ul" | "ol" => self.list(node, tag == "ol", parent),
            "blockquote" => {
                let quote = self.node(NodeValue::BlockQuote);
                parent.append(quote);
                self.blocks(&children_of(node), quote);
            }
            "pre" => {
                let mut literal = text_content(node);
                if !literal.ends_with('\n') {
                    literal.push('\n');
                }
                let code = self.node(NodeValue::CodeBlock(NodeCodeBlock {
                    fenced: true,
                    fence_char: b'`',
                    fence_length: 3,
                    fence_offset: 0,
                    info: code_language(node).unwrap_or_default(),
                    literal,
                }));
                parent.append(code);
            }
            "hr" => parent.append(self.node(NodeValue::ThematicBreak)),
            // a stray list item outside a list still becomes a list
            "li" => self.list_items(&[node.clone()], false, 1, parent),
            _ => self.blocks(&children_of(node), parent),
        }
    }

    fn list(&self, node: &Handle, ordered: bool, parent: &'a AstNode<'a>) {
        let start = get_attr(node, "start")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(1);
        let items: Vec<Handle> = children_of(node)
            .into_iter()
            .filter(|child| tag_name(child).as_deref() == Some("li"))
            .collect();
        if !items.is_empty() {
            self.list_items(&items, ordered, start, parent);
        }
    }

    fn list_items(&self, items: &[Handle], ordered: bool, start: usize, parent: &'a AstNode<'a>) {
        let list_data = NodeList {
            list_type: if ordered { ListType::Ordered } else { ListType::Bullet },
            marker_offset: 0,
            padding: 0,
            start,
            delimiter: ListDelimType::Period,
            bullet_char: b'-',
            tight: true,
        };
        let list = self.node(NodeValue::List(list_data));
        parent.append(list);
        for item in items {
            let item_node = self.node(NodeValue::Item(list_data));
            list.append(item_node);
            self.blocks(&children_of(item), item_node);
        }
    }

    fn flush(&self, run: &mut Vec<Inline>, parent: &'a AstNode<'a>) {
        let inlines = tidy(std::mem::take(run));
        if inlines.is_empty() {
            return;
        }
        let paragraph = self.node(NodeValue::Paragraph);
        parent.append(paragraph);
        self.inlines(&inlines, paragraph);
    }

    fn inlines(&self, inlines: &[Inline], parent: &'a AstNode<'a>) {
        for inline in inlines {
            self.inline(inline, parent);
        }
    }

    fn inline(&self, inline: &Inline, parent: &'a AstNode<'a>) {
        let wrap = |value: NodeValue, children: &[Inline]| {
            let node = self.node(value);
            parent.append(node);
            self.inlines(children, node);
        };
        match inline {
            Inline::Text(text) => parent.append(self.node(NodeValue::Text(text.clone()))),
            Inline::Break => parent.append(self.node(NodeValue::LineBreak)),
            Inline::Code(literal) => parent.append(self.node(NodeValue::Code(NodeCode {
                num_backticks: 1,
                literal: literal.clone(),
            }))),
            Inline::Strong(children) => wrap(NodeValue::Strong, children),
            Inline::Emph(children) => wrap(NodeValue::Emph, children),
            Inline::Strike(children) => wrap(NodeValue::Strikethrough, children),
            Inline::Link {
                url,
                title,
                children,
            } => wrap(
                NodeValue::Link(NodeLink {
                    url: url.clone(),
                    title: title.clone(),
                }),
                children,
            ),
            Inline::Image { url, title, alt } => {
                let image = self.node(NodeValue::Image(NodeLink {
                    url: url.clone(),
                    title: title.clone(),
                }));
                parent.append(image);
                if !alt.is_empty() {
                    image.append(self.node(NodeValue::Text(alt.clone())));
                }
            }
        }
    }
}

fn is_block(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "ul"
            | "ol"
            | "li"
            | "blockquote"
            | "pre"
            | "hr"
            | "div"
            | "section"
            | "article"
            | "header"
            | "footer"
            | "main"
            | "aside"
            | "nav"
            | "figure"
            | "figcaption"
            | "table"
            | "thead"
            | "tbody"
            | "tfoot"
            | "tr"
            | "td"
            | "th"
            | "dl"
            | "dt"
            | "dd"
            | "address"
            | "details"
            | "summary"
    )
}

fn code_language(pre: &Handle) -> Option<String> {
    let from_class = |node: &Handle| {
        get_attr(node, "class").and_then(|class| {
            class
                .split_whitespace()
                .find_map(|c| c.strip_prefix("language-").map(str::to_string))
        })
    };
    from_class(pre).or_else(|| {
        children_of(pre)
            .iter()
            .filter(|child| tag_name(child).as_deref() == Some("code"))
            .find_map(from_class)
    })
}

fn collect_inline(node: &Handle, out: &mut Vec<Inline>) {
    if let NodeData::Text { contents } = &node.data {
        out.push(Inline::Text(contents.borrow().to_string()));
        return;
    }
    let Some(tag) = tag_name(node) else {
        return;
    };
    let nested = |out: &mut Vec<Inline>| {
        for child in children_of(node) {
            collect_inline(&child, out);
        }
    };
    let mut children = Vec::new();
    match tag.as_str() {
        "strong" | "b" => {
            nested(&mut children);
            out.push(Inline::Strong(children));
        }
        "em" | "i" => {
            nested(&mut children);
            out.push(Inline::Emph(children));
        }
        "del" | "s" | "strike" => {
            nested(&mut children);
            out.push(Inline::Strike(children));
        }
        "code" | "kbd" | "tt" => out.push(Inline::Code(text_content(node))),
        "br" => out.push(Inline::Break),
        "a" => {
            nested(&mut children);
            match get_attr(node, "href").filter(|href| !href.trim().is_empty()) {
                Some(url) => out.push(Inline::Link {
                    url: url.trim().to_string(),
                    title: get_attr(node, "title").unwrap_or_default(),
                    children,
                }),
                None => out.extend(children),
            }
        }
        "img" => {
            if let Some(url) = get_attr(node, "src").filter(|src| !src.trim().is_empty()) {
                out.push(Inline::Image {
                    url: url.trim().to_string(),
                    title: get_attr(node, "title").unwrap_or_default(),
                    alt: get_attr(node, "alt").unwrap_or_default(),
                });
            }
        }
        t if IGNORED.contains(&t) => {}
        _ => nested(out),
    }
}

/// Collapse whitespace, trim the run's edges and drop empty wrappers.
fn tidy(run: Vec<Inline>) -> Vec<Inline> {
    let mut inlines = collapse(run);
    trim_start(&mut inlines);
    trim_end(&mut inlines);
    inlines
}

fn collapse(run: Vec<Inline>) -> Vec<Inline> {
    let mut out = Vec::new();
    for inline in run {
        match inline {
            Inline::Text(text) => push_text(&mut out, &collapse_whitespace(&text)),
            Inline::Strong(children) => push_wrapped(&mut out, Inline::Strong, children),
            Inline::Emph(children) => push_wrapped(&mut out, Inline::Emph, children),
            Inline::Strike(children) => push_wrapped(&mut out, Inline::Strike, children),
            Inline::Link {
                url,
                title,
                children,
            } => out.push(Inline::Link {
                url,
                title,
                children: collapse(children),
            }),
            other => out.push(other),
        }
    }
    out
}

/// Append text, merging with a preceding text item without doubling spaces.
fn push_text(out: &mut Vec<Inline>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Inline::Text(prev)) = out.last_mut() {
        if prev.ends_with(' ') {
            prev.push_str(text.trim_start());
        } else {
            prev.push_str(text);
        }
    } else {
        out.push(Inline::Text(text.to_string()));
    }
}

/// Emphasis markers must hug their content, so edge whitespace moves outside the wrapper.
fn push_wrapped(out: &mut Vec<Inline>, make: fn(Vec<Inline>) -> Inline, children: Vec<Inline>) {
    let mut children = collapse(children);
    let leading = trim_start(&mut children);
    let trailing = trim_end(&mut children);
    if leading {
        push_text(out, " ");
    }
    if !children.is_empty() {
        out.push(make(children));
    }
    if trailing {
        push_text(out, " ");
    }
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out
}

/// Trim leading whitespace of the run; returns whether any was removed.
fn trim_start(inlines: &mut Vec<Inline>) -> bool {
    let mut trimmed = false;
    while let Some(Inline::Text(text)) = inlines.first_mut() {
        let kept = text.trim_start().to_string();
        trimmed |= kept.len() != text.len();
        if kept.is_empty() {
            inlines.remove(0);
        } else {
            *text = kept;
            break;
        }
    }
    while matches!(inlines.first(), Some(Inline::Break)) {
        inlines.remove(0);
    }
    trimmed
}

/// Trim trailing whitespace and line breaks of the run; returns whether any whitespace was removed.
fn trim_end(inlines: &mut Vec<Inline>) -> bool {
    let mut trimmed = false;
    loop {
        match inlines.last_mut() {
            Some(Inline::Text(text)) => {
                let kept = text.trim_end().to_string();
                trimmed |= kept.len() != text.len();
                if kept.is_empty() {
                    inlines.pop();
                } else {
                    *text = kept;
                    break;
                }
            }
            Some(Inline::Break) => {
                inlines.pop();
            }
            _ => break,
        }
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::HtmlDocument;

    fn md(html: &str) -> String {
        let doc = HtmlDocument::parse(html);
        tree_to_markdown(doc.body()).unwrap()
    }

    #[test]
    fn headings_and_paragraphs() {
        assert_eq!(
            md("<h2>Hello</h2><p>World <strong>bold</strong></p>"),
            "## Hello\n\nWorld **bold**"
        );
    }

    #[test]
    fn wrappers_are_transparent() {
        assert_eq!(
            md("<section><div><p>one</p></div>loose <em>text</em></section>"),
            "one\n\nloose *text*"
        );
    }

    #[test]
    fn lists() {
        assert_eq!(md("<ul><li>a</li><li>b</li></ul>"), "- a\n- b");
        assert!(md("<ol start=\"3\"><li>c</li></ol>").starts_with("3."));
    }

    #[test]
    fn code_block_keeps_language() {
        assert_eq!(
            md("<pre><code class=\"language-rust\">fn main() {}</code></pre>"),
            "```rust\nfn main() {}\n```"
        );
    }

    #[test]
    fn fence_contents_are_untouched() {
        let markdown = "```` rust\n``` not a fence\n````\n\n``` \nplain\n```";
        assert_eq!(
            tighten_fence_info(markdown),
            "````rust\n``` not a fence\n````\n\n```\nplain\n```"
        );
    }

    #[test]
    fn whitespace_moves_outside_emphasis() {
        assert_eq!(md("<p>a<strong> b </strong>c</p>"), "a **b** c");
    }

    #[test]
    fn empty_paragraphs_vanish() {
        assert_eq!(md("<p> </p><p><br></p><p>x</p>"), "x");
    }

    #[test]
    fn links_and_images() {
        assert_eq!(
            md(r#"<p><a href="https://x.test">site</a> <img src="https://x.test/a.png" alt="pic"></p>"#),
            "[site](https://x.test) ![pic](https://x.test/a.png)"
        );
    }

    #[test]
    fn whitespace_collapsing() {
        assert_eq!(collapse_whitespace("a \n\t b"), "a b");
    }
}
