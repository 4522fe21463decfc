//! Inline-style declaration parsing and frequency counting

use std::collections::HashMap;

/// One `property: value` pair from a `style` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Lower-cased property name
    pub property: String,
    /// Trimmed value with any trailing `!important` removed
    pub value: String,
}

impl Declaration {
    /// Canonical `"property: value"` form used in reports.
    pub fn normalized(&self) -> String {
        format!("{}: {}", self.property, self.value)
    }
}

/// Split a `style` attribute into declarations, in source order.
///
/// Entries without a colon or with an empty property are skipped.
pub fn parse_inline_style(style: &str) -> Vec<Declaration> {
    style
        .split(';')
        .filter_map(|entry| {
            let (property, value) = entry.split_once(':')?;
            let property = property.trim().to_ascii_lowercase();
            if property.is_empty() {
                return None;
            }
            Some(Declaration {
                property,
                value: strip_important(value.trim()).to_string(),
            })
        })
        .collect()
}

fn strip_important(value: &str) -> &str {
    const IMPORTANT: &str = "!important";
    if value.len() >= IMPORTANT.len() {
        let split = value.len() - IMPORTANT.len();
        if value.is_char_boundary(split) && value[split..].eq_ignore_ascii_case(IMPORTANT) {
            return value[..split].trim_end();
        }
    }
    value
}

/// Last value per property, as a browser would resolve duplicates within one attribute.
pub fn last_values(declarations: &[Declaration]) -> HashMap<String, String> {
    declarations
        .iter()
        .map(|d| (d.property.clone(), d.value.clone()))
        .collect()
}

/// Insertion-ordered occurrence counter.
///
/// Ties always resolve to the key seen first, which keeps ranking and mode selection
/// deterministic for identical input.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    pub fn count(&self, key: &str) -> usize {
        self.index.get(key).map(|&slot| self.entries[slot].1).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most frequent key; the first-seen one wins a tie.
    pub fn mode(&self) -> Option<&str> {
        let mut best: Option<&(String, usize)> = None;
        for entry in &self.entries {
            if best.map_or(true, |b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(key, _)| key.as_str())
    }

    /// Entries by descending count, first-seen order among equals.
    pub fn ranked(&self) -> Vec<(String, usize)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

impl<'a> FromIterator<&'a str> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for key in iter {
            table.add(key);
        }
        table
    }
}
