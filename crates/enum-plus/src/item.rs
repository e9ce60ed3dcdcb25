use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::registry::{resolve_label, EnumRegistry, LocalizeFn};
use crate::value::EnumValue;

/// One normalized enum entry: `(key, value, label, raw)`.
///
/// Items are immutable after construction; all state is reached through
/// accessors. The display label is resolved through the localization
/// chain at call time, so a localization function installed after the
/// collection was built still applies.
#[derive(Clone)]
pub struct EnumItem {
    key: String,
    value: EnumValue,
    label: String,
    raw: Value,
    localize: Option<Arc<LocalizeFn>>,
    registry: Arc<EnumRegistry>,
}

impl EnumItem {
    pub(crate) fn new(
        key: String,
        value: EnumValue,
        label: String,
        raw: Value,
        localize: Option<Arc<LocalizeFn>>,
        registry: Arc<EnumRegistry>,
    ) -> Self {
        Self {
            key,
            value,
            label,
            raw,
            localize,
            registry,
        }
    }

    /// The item's key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The item's value.
    #[must_use]
    pub fn value(&self) -> &EnumValue {
        &self.value
    }

    /// The localized display label, resolved at call time through the
    /// per-collection localization override or the registry.
    #[must_use]
    pub fn label(&self) -> String {
        resolve_label(self.localize.as_ref(), &self.registry, &self.label)
    }

    /// The label text as declared, before localization.
    #[must_use]
    pub fn raw_label(&self) -> &str {
        &self.label
    }

    /// The original initializer fragment this item was built from.
    #[must_use]
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl fmt::Display for EnumItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl fmt::Debug for EnumItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumItem")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("label", &self.label)
            .field("raw", &self.raw)
            .finish_non_exhaustive()
    }
}

/// Items compare by their declared identity; localization state does not
/// participate.
impl PartialEq for EnumItem {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value && self.label == other.label
    }
}

/// An item compares directly against a bare value, so it can stand in
/// for its value in equality contexts.
impl PartialEq<EnumValue> for EnumItem {
    fn eq(&self, other: &EnumValue) -> bool {
        self.value == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(registry: Arc<EnumRegistry>, localize: Option<Arc<LocalizeFn>>) -> EnumItem {
        EnumItem::new(
            "Monday".into(),
            EnumValue::Int(1),
            "Monday".into(),
            json!(1),
            localize,
            registry,
        )
    }

    #[test]
    fn accessors() {
        let it = item(Arc::new(EnumRegistry::new()), None);
        assert_eq!(it.key(), "Monday");
        assert_eq!(*it.value(), 1);
        assert_eq!(it.raw_label(), "Monday");
        assert_eq!(it.raw(), &json!(1));
    }

    #[test]
    fn label_is_resolved_lazily_through_the_registry() {
        let registry = Arc::new(EnumRegistry::new());
        let it = item(Arc::clone(&registry), None);
        assert_eq!(it.label(), "Monday");

        registry.set_localize(|content| (content == "Monday").then(|| "Montag".to_owned()));
        assert_eq!(it.label(), "Montag");
        assert_eq!(it.to_string(), "Montag");
        assert_eq!(it.raw_label(), "Monday");
    }

    #[test]
    fn per_item_override_wins_over_registry() {
        let registry = Arc::new(EnumRegistry::new());
        registry.set_localize(|_| Some("from registry".to_owned()));

        let localize: Arc<LocalizeFn> = Arc::new(|content: &str| Some(format!("<{content}>")));
        let it = item(Arc::clone(&registry), Some(localize));
        assert_eq!(it.label(), "<Monday>");
    }

    #[test]
    fn compares_against_bare_values() {
        let it = item(Arc::new(EnumRegistry::new()), None);
        assert_eq!(it, EnumValue::Int(1));
        assert_ne!(it, EnumValue::Int(2));
    }
}
