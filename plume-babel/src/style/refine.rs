//! Per-element-kind refinement over a base config

use super::config::StylePatch;
use super::field::{StyleConfig, StyleField};
use super::kind::ElementKind;
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Partial configs keyed by element kind.
///
/// Each patch only ever holds fields from its kind's editable allow-list; anything else is
/// dropped on insertion (and when decoding).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RefineByTypePatch {
    patches: BTreeMap<ElementKind, StylePatch>,
}

impl RefineByTypePatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, kind: ElementKind, patch: StylePatch) -> Self {
        self.set(kind, patch);
        self
    }

    /// Replace the patch for `kind`, keeping only allow-listed fields. An empty result clears
    /// the entry.
    pub fn set(&mut self, kind: ElementKind, mut patch: StylePatch) {
        patch.retain(|field| {
            let allowed = kind.allows(field);
            if !allowed {
                tracing::trace!(kind = kind.as_str(), field = field.name(), "field not editable for kind");
            }
            allowed
        });
        if patch.is_empty() {
            self.patches.remove(&kind);
        } else {
            self.patches.insert(kind, patch);
        }
    }

    /// Set a single field on one kind's patch. Returns `false` when the field is not
    /// editable for that kind.
    pub fn set_field(
        &mut self,
        kind: ElementKind,
        field: StyleField,
        value: impl Into<super::field::StyleValue>,
    ) -> bool {
        if !kind.allows(field) {
            return false;
        }
        self.patches.entry(kind).or_default().insert(field, value);
        true
    }

    pub fn get(&self, kind: ElementKind) -> Option<&StylePatch> {
        self.patches.get(&kind)
    }

    pub fn remove(&mut self, kind: ElementKind) -> Option<StylePatch> {
        self.patches.remove(&kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = ElementKind> + '_ {
        self.patches.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }
}

impl<'de> Deserialize<'de> for RefineByTypePatch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<ElementKind, StylePatch>::deserialize(deserializer)?;
        let mut refine = RefineByTypePatch::new();
        for (kind, patch) in raw {
            refine.set(kind, patch);
        }
        Ok(refine)
    }
}

/// Effective config for one element kind.
///
/// Without a patch for `kind` this borrows `base`. Otherwise the patch is laid over a copy of
/// `base`; patch values that cannot be coerced keep the base value. `base` is never modified.
pub fn resolve<'a>(
    base: &'a StyleConfig,
    refine: Option<&RefineByTypePatch>,
    kind: ElementKind,
) -> Cow<'a, StyleConfig> {
    match refine.and_then(|r| r.get(kind)) {
        Some(patch) => Cow::Owned(base.patched(patch)),
        None => Cow::Borrowed(base),
    }
}

/// Effective configs for all kinds, resolved once per render.
#[derive(Debug, Clone)]
pub struct ResolvedStyles<'a> {
    base: &'a StyleConfig,
    by_kind: BTreeMap<ElementKind, Cow<'a, StyleConfig>>,
}

impl<'a> ResolvedStyles<'a> {
    pub fn new(base: &'a StyleConfig, refine: Option<&RefineByTypePatch>) -> Self {
        let by_kind = ElementKind::ALL
            .into_iter()
            .map(|kind| (kind, resolve(base, refine, kind)))
            .collect();
        Self { base, by_kind }
    }

    pub fn base(&self) -> &StyleConfig {
        self.base
    }

    pub fn for_kind(&self, kind: ElementKind) -> &StyleConfig {
        self.by_kind
            .get(&kind)
            .map(|config| config.as_ref())
            .unwrap_or(self.base)
    }

    /// Config for an HTML tag: its kind's effective config, or the base for tags no kind
    /// covers (code, links, strong text).
    pub fn for_tag(&self, tag: &str) -> &StyleConfig {
        match ElementKind::for_tag(tag) {
            Some(kind) => self.for_kind(kind),
            None => self.base,
        }
    }
}
