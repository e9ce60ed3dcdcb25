use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::item::EnumItem;
use crate::option::{
    FilterEntry, FirstOption, MenuEntry, SelectEntry, ToSelectConfig, ValueMapEntry,
};
use crate::registry::{resolve_label, EnumRegistry, LocalizeFn, OPTIONS_ALL_KEY};
use crate::value::EnumValue;

/// The ordered item list of a collection, with lookup queries and the
/// UI view projections.
///
/// Dereferences to `[EnumItem]`, so indexing and iteration work directly:
/// `items[0].key()`, `items.iter().map(...)`.
#[derive(Clone)]
pub struct EnumItems {
    items: Vec<EnumItem>,
    raw: IndexMap<String, Value>,
    localize: Option<Arc<LocalizeFn>>,
    registry: Arc<EnumRegistry>,
}

impl EnumItems {
    pub(crate) fn new(
        items: Vec<EnumItem>,
        raw: IndexMap<String, Value>,
        localize: Option<Arc<LocalizeFn>>,
        registry: Arc<EnumRegistry>,
    ) -> Self {
        Self {
            items,
            raw,
            localize,
            registry,
        }
    }

    /// The key of the first item whose value strictly equals `value`.
    pub fn key(&self, value: impl Into<EnumValue>) -> Option<&str> {
        let value = value.into();
        self.items
            .iter()
            .find(|i| *i.value() == value)
            .map(EnumItem::key)
    }

    /// The localized label of the first item matching by value, else by
    /// key.
    pub fn label(&self, key_or_value: impl Into<EnumValue>) -> Option<String> {
        let probe = key_or_value.into();
        self.find(&probe).map(EnumItem::label)
    }

    /// Whether any item matches by value or by key.
    pub fn has(&self, key_or_value: impl Into<EnumValue>) -> bool {
        self.find(&key_or_value.into()).is_some()
    }

    fn find(&self, probe: &EnumValue) -> Option<&EnumItem> {
        self.items
            .iter()
            .find(|i| i.value() == probe)
            .or_else(|| {
                let key = probe.as_str()?;
                self.items.iter().find(|i| i.key() == key)
            })
    }

    /// The full raw initializer (array form is seen in its reduced
    /// mapping shape).
    #[must_use]
    pub fn raw(&self) -> &IndexMap<String, Value> {
        &self.raw
    }

    /// The original per-key initializer fragment, resolved by key first,
    /// then by value.
    pub fn raw_of(&self, key_or_value: impl Into<EnumValue>) -> Option<&Value> {
        let probe = key_or_value.into();
        if let Some(key) = probe.as_str() {
            if let Some(fragment) = self.raw.get(key) {
                return Some(fragment);
            }
        }
        self.items
            .iter()
            .find(|i| *i.value() == probe)
            .map(EnumItem::raw)
    }

    /// Project the items into select (drop-down) entries, optionally
    /// prepending a synthetic first entry per the config.
    #[must_use]
    pub fn to_select(&self, config: &ToSelectConfig) -> Vec<SelectEntry> {
        let mut entries = Vec::with_capacity(self.items.len() + 1);
        match &config.first_option {
            FirstOption::None => {}
            FirstOption::All { value, label } => {
                let label = label.as_deref().unwrap_or(OPTIONS_ALL_KEY);
                entries.push(SelectEntry {
                    key: String::new(),
                    value: value.clone().unwrap_or_else(|| EnumValue::Str(String::new())),
                    label: self.localize(label),
                });
            }
            FirstOption::Entry(entry) => {
                entries.push(SelectEntry {
                    key: entry
                        .key
                        .clone()
                        .unwrap_or_else(|| entry.value.to_string()),
                    value: entry.value.clone(),
                    label: self.localize(&entry.label),
                });
            }
        }
        entries.extend(self.items.iter().map(|i| SelectEntry {
            key: i.key().to_owned(),
            value: i.value().clone(),
            label: i.label(),
        }));
        entries
    }

    /// Project the items into menu entries (`{key: value, label}`).
    #[must_use]
    pub fn to_menu(&self) -> Vec<MenuEntry> {
        self.items
            .iter()
            .map(|i| MenuEntry {
                key: i.value().clone(),
                label: i.label(),
            })
            .collect()
    }

    /// Project the items into table-filter entries (`{text: label, value}`).
    #[must_use]
    pub fn to_filter(&self) -> Vec<FilterEntry> {
        self.items
            .iter()
            .map(|i| FilterEntry {
                text: i.label(),
                value: i.value().clone(),
            })
            .collect()
    }

    /// Project the items into a map keyed by each value's string form,
    /// for components that bind by value instead of iterating a list.
    #[must_use]
    pub fn to_value_map(&self) -> IndexMap<String, ValueMapEntry> {
        self.items
            .iter()
            .map(|i| (i.value().to_string(), ValueMapEntry { text: i.label() }))
            .collect()
    }

    #[deprecated(note = "use `to_select` instead")]
    #[must_use]
    pub fn options(&self, config: &ToSelectConfig) -> Vec<SelectEntry> {
        self.to_select(config)
    }

    #[deprecated(note = "use `to_menu` instead")]
    #[must_use]
    pub fn menus(&self) -> Vec<MenuEntry> {
        self.to_menu()
    }

    #[deprecated(note = "use `to_filter` instead")]
    #[must_use]
    pub fn filters(&self) -> Vec<FilterEntry> {
        self.to_filter()
    }

    #[deprecated(note = "use `to_value_map` instead")]
    #[must_use]
    pub fn values_enum(&self) -> IndexMap<String, ValueMapEntry> {
        self.to_value_map()
    }

    fn localize(&self, content: &str) -> String {
        resolve_label(self.localize.as_ref(), &self.registry, content)
    }

    pub(crate) fn registry(&self) -> &EnumRegistry {
        &self.registry
    }
}

impl Deref for EnumItems {
    type Target = [EnumItem];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<'a> IntoIterator for &'a EnumItems {
    type Item = &'a EnumItem;
    type IntoIter = std::slice::Iter<'a, EnumItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Debug for EnumItems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.items).finish()
    }
}
