//! Partial configs and the serde surface of [`StyleConfig`]

use super::field::{StyleConfig, StyleField, StyleValue};
use super::validate::validate;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Default preview document for templates.
pub const SAMPLE_MARKDOWN: &str = "## Plume Style Engine

This project compiles Markdown into inline HTML for rich-text publishing.

### Why inline style

- The host strips most external styles.
- Inline styles are more reliable for paste workflows.

> Keep content and style fully separated.

![Sample image](https://images.unsplash.com/photo-1455390582262-044cdead277a?w=900)

~~~ts
export const answer = 42;
~~~
";

/// A partial [`StyleConfig`]: any subset of fields with raw, not yet validated values.
///
/// On the wire this is a camelCase JSON object. Unknown keys and values that are neither
/// numbers nor strings are ignored when decoding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StylePatch {
    values: BTreeMap<StyleField, StyleValue>,
}

impl StylePatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: StyleField, value: impl Into<StyleValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: StyleField, value: impl Into<StyleValue>) {
        self.values.insert(field, value.into());
    }

    pub fn get(&self, field: StyleField) -> Option<&StyleValue> {
        self.values.get(&field)
    }

    pub fn contains(&self, field: StyleField) -> bool {
        self.values.contains_key(&field)
    }

    pub fn remove(&mut self, field: StyleField) -> Option<StyleValue> {
        self.values.remove(&field)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(StyleField) -> bool) {
        self.values.retain(|field, _| keep(*field));
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleField, &StyleValue)> {
        self.values.iter().map(|(field, value)| (*field, value))
    }

    pub fn fields(&self) -> impl Iterator<Item = StyleField> + '_ {
        self.values.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Decode a JSON object. Unknown keys and non-scalar values are skipped.
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        let mut patch = StylePatch::new();
        for (key, value) in object {
            let Some(field) = StyleField::from_name(key) else {
                tracing::trace!(key = key.as_str(), "ignoring unknown style field");
                continue;
            };
            match value {
                Value::Number(n) => {
                    if let Some(n) = n.as_f64() {
                        patch.insert(field, n);
                    }
                }
                Value::String(s) => patch.insert(field, s.as_str()),
                _ => {}
            }
        }
        patch
    }

    /// Encode as a JSON object keyed by camelCase field names.
    pub fn to_json_object(&self) -> Map<String, Value> {
        self.iter()
            .map(|(field, value)| (field.name().to_string(), json_value(value)))
            .collect()
    }
}

impl FromIterator<(StyleField, StyleValue)> for StylePatch {
    fn from_iter<I: IntoIterator<Item = (StyleField, StyleValue)>>(iter: I) -> Self {
        StylePatch {
            values: iter.into_iter().collect(),
        }
    }
}

fn json_value(value: &StyleValue) -> Value {
    match value {
        StyleValue::Number(n) => serde_json::Number::from_f64(*n)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        StyleValue::Text(s) => Value::String(s.clone()),
    }
}

impl Serialize for StylePatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.name(), value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StylePatch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let object = Map::<String, Value>::deserialize(deserializer)?;
        Ok(StylePatch::from_json_object(&object))
    }
}

impl StyleConfig {
    /// Every field as a patch; validating it yields `self` back.
    pub fn to_patch(&self) -> StylePatch {
        StyleField::ALL
            .iter()
            .map(|field| (*field, self.get(*field)))
            .collect()
    }

    /// Only the listed fields, with this config's values.
    pub fn project(&self, fields: &[StyleField]) -> StylePatch {
        fields.iter().map(|field| (*field, self.get(*field))).collect()
    }

    /// A new config with `patch` laid over `self`. Values that cannot be coerced keep the
    /// value from `self`.
    pub fn patched(&self, patch: &StylePatch) -> StyleConfig {
        let mut next = self.clone();
        for (field, value) in patch.iter() {
            next.assign(field, value);
        }
        next
    }
}

impl Serialize for StyleConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(StyleField::ALL.len()))?;
        for field in StyleField::ALL {
            map.serialize_entry(field.name(), &self.get(*field))?;
        }
        map.end()
    }
}

/// Decoding always validates: a deserialized config is total and within constraints.
impl<'de> Deserialize<'de> for StyleConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let patch = StylePatch::deserialize(deserializer)?;
        Ok(validate(&patch))
    }
}
