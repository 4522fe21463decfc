//! Format inspection report
//!
//! A read-only summary of how pasted HTML is styled: element counts per tag and the most
//! common inline declarations for each tag.

use super::declarations::{parse_inline_style, FrequencyTable};
use crate::dom::{for_each_element, get_attr, tag_name};
use markup5ever_rcdom::Handle;
use serde::Serialize;
use std::collections::HashMap;

/// Default number of declarations listed per tag.
pub const DEFAULT_MAX_DECLARATIONS: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatInspectionReport {
    /// Elements below `body`
    pub total_elements: usize,
    /// Elements with a non-empty `style` attribute
    pub inline_style_elements: usize,
    /// Elements with a non-empty `class` attribute
    pub class_elements: usize,
    /// Per-tag summaries, most frequent tag first
    pub tag_summaries: Vec<TagFormatSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagFormatSummary {
    pub tag: String,
    pub count: usize,
    pub style_usage: Vec<StyleUsage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleUsage {
    /// `"property: value"`
    pub declaration: String,
    pub count: usize,
}

/// Build the report for an already normalized tree.
pub fn build_report(root: &Handle, max_declarations: usize) -> FormatInspectionReport {
    let mut report = FormatInspectionReport {
        total_elements: 0,
        inline_style_elements: 0,
        class_elements: 0,
        tag_summaries: Vec::new(),
    };
    let mut tags = TagCounter::default();

    for_each_element(root, &mut |node| {
        let Some(tag) = tag_name(node) else {
            return;
        };
        report.total_elements += 1;
        let usage = tags.entry(&tag);
        if get_attr(node, "class").is_some_and(|class| !class.trim().is_empty()) {
            report.class_elements += 1;
        }
        if let Some(style) = get_attr(node, "style").filter(|style| !style.trim().is_empty()) {
            report.inline_style_elements += 1;
            for declaration in parse_inline_style(&style) {
                usage.add(&declaration.normalized());
            }
        }
    });

    report.tag_summaries = tags
        .ranked()
        .into_iter()
        .map(|(tag, count, usage)| TagFormatSummary {
            tag,
            count,
            style_usage: usage
                .ranked()
                .into_iter()
                .take(max_declarations)
                .map(|(declaration, count)| StyleUsage { declaration, count })
                .collect(),
        })
        .collect();
    report
}

/// Per-tag element count plus declaration usage, in first-seen tag order.
#[derive(Default)]
struct TagCounter {
    tags: Vec<(String, usize, FrequencyTable)>,
    index: HashMap<String, usize>,
}

impl TagCounter {
    /// Count one more element of `tag` and hand back its declaration table.
    fn entry(&mut self, tag: &str) -> &mut FrequencyTable {
        let slot = match self.index.get(tag) {
            Some(&slot) => slot,
            None => {
                self.index.insert(tag.to_string(), self.tags.len());
                self.tags.push((tag.to_string(), 0, FrequencyTable::new()));
                self.tags.len() - 1
            }
        };
        let entry = &mut self.tags[slot];
        entry.1 += 1;
        &mut entry.2
    }

    fn ranked(self) -> Vec<(String, usize, FrequencyTable)> {
        let mut tags = self.tags;
        tags.sort_by(|a, b| b.1.cmp(&a.1));
        tags
    }
}
