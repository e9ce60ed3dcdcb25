use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::EnumError;
use crate::init::{entry_keys, EnumInit, FieldSelector};
use crate::item::EnumItem;
use crate::items::EnumItems;
use crate::normalize::normalize_item;
use crate::option::{FilterEntry, MenuEntry, SelectEntry, ToSelectConfig, ValueMapEntry};
use crate::registry::{EnumRegistry, LocalizeFn};
use crate::value::EnumValue;

/// Construction options for a collection.
///
/// All fields are optional; the zero value builds with the process-global
/// registry, the default localization chain, and the default `value` /
/// `label` / `key` field selectors for array-form input.
#[derive(Default)]
pub struct EnumOptions {
    localize: Option<Arc<LocalizeFn>>,
    registry: Option<Arc<EnumRegistry>>,
    get_value: Option<FieldSelector>,
    get_label: Option<FieldSelector>,
    get_key: Option<FieldSelector>,
}

impl EnumOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Localize labels of this collection through `f` instead of the
    /// registry's localization function.
    #[must_use]
    pub fn localize(mut self, f: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
        self.localize = Some(Arc::new(f));
        self
    }

    /// Read localization and extensions from an explicit registry
    /// instead of [`EnumRegistry::global`].
    #[must_use]
    pub fn registry(mut self, registry: Arc<EnumRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// How to extract the value from an array-form record.
    #[must_use]
    pub fn get_value(mut self, selector: impl Into<FieldSelector>) -> Self {
        self.get_value = Some(selector.into());
        self
    }

    /// How to extract the label from an array-form record.
    #[must_use]
    pub fn get_label(mut self, selector: impl Into<FieldSelector>) -> Self {
        self.get_label = Some(selector.into());
        self
    }

    /// How to extract the key from an array-form record.
    #[must_use]
    pub fn get_key(mut self, selector: impl Into<FieldSelector>) -> Self {
        self.get_key = Some(selector.into());
        self
    }
}

impl fmt::Debug for EnumOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumOptions")
            .field("localize", &self.localize.is_some())
            .field("registry", &self.registry.is_some())
            .field("get_value", &self.get_value)
            .field("get_label", &self.get_label)
            .field("get_key", &self.get_key)
            .finish()
    }
}

/// An immutable enum collection: per-key members plus the item list and
/// its query/view surface.
///
/// Members are reached by key — `collection["Monday"]` or
/// [`get`](Self::get) — and hold the member's bare value. The `items`,
/// `keys`, and `values` features of the collection are methods, so a
/// member whose key is literally `"items"`, `"keys"`, or `"values"`
/// never shadows them (and vice versa).
pub struct EnumCollection {
    members: IndexMap<String, EnumValue>,
    items: EnumItems,
}

impl EnumCollection {
    /// Build a collection from an initializer with default options.
    ///
    /// Construction is atomic: the first invalid per-key initializer
    /// aborts with an error and no partial collection exists.
    pub fn new(init: EnumInit) -> Result<Self, EnumError> {
        Self::with_options(init, EnumOptions::default())
    }

    /// Build a collection from an initializer with explicit options.
    pub fn with_options(init: EnumInit, options: EnumOptions) -> Result<Self, EnumError> {
        let get_value = options
            .get_value
            .unwrap_or_else(|| FieldSelector::from("value"));
        let get_label = options
            .get_label
            .unwrap_or_else(|| FieldSelector::from("label"));
        let get_key = options.get_key.unwrap_or_else(|| FieldSelector::from("key"));

        let mapping = init.into_mapping(&get_value, &get_label, &get_key)?;
        let registry = options.registry.unwrap_or_else(EnumRegistry::global);
        let keys = entry_keys(&mapping);

        let mut members = IndexMap::with_capacity(keys.len());
        let mut items = Vec::with_capacity(keys.len());
        for key in keys {
            let fragment = mapping.get(&key);
            let normalized = normalize_item(&key, fragment)?;
            members.insert(key.clone(), normalized.value.clone());
            items.push(EnumItem::new(
                key,
                normalized.value,
                normalized.label,
                fragment.cloned().unwrap_or(Value::Null),
                options.localize.clone(),
                Arc::clone(&registry),
            ));
        }

        tracing::debug!(members = members.len(), "built enum collection");

        let items = EnumItems::new(items, mapping, options.localize, registry);
        Ok(Self { members, items })
    }

    /// The value of the member with the given key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&EnumValue> {
        self.members.get(key)
    }

    /// The ordered member keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    /// The number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the collection has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The ordered item list.
    #[must_use]
    pub fn items(&self) -> &EnumItems {
        &self.items
    }

    /// Membership test: true if `key_or_value` loosely matches some
    /// member's value (numeric strings match their number) or strictly
    /// matches some member's key.
    pub fn contains(&self, key_or_value: impl Into<EnumValue>) -> bool {
        let probe = key_or_value.into();
        self.items
            .iter()
            .any(|i| i.value().loose_eq(&probe) || probe.as_str() == Some(i.key()))
    }

    /// The key of the first member whose value strictly equals `value`.
    pub fn key(&self, value: impl Into<EnumValue>) -> Option<&str> {
        self.items.key(value)
    }

    /// The localized label of the member matching by value, else by key.
    pub fn label(&self, key_or_value: impl Into<EnumValue>) -> Option<String> {
        self.items.label(key_or_value)
    }

    /// Whether any member matches by value or by key.
    pub fn has(&self, key_or_value: impl Into<EnumValue>) -> bool {
        self.items.has(key_or_value)
    }

    /// The full raw initializer.
    #[must_use]
    pub fn raw(&self) -> &IndexMap<String, Value> {
        self.items.raw()
    }

    /// The original per-key initializer fragment, by key first, then by
    /// value.
    pub fn raw_of(&self, key_or_value: impl Into<EnumValue>) -> Option<&Value> {
        self.items.raw_of(key_or_value)
    }

    /// See [`EnumItems::to_select`].
    #[must_use]
    pub fn to_select(&self, config: &ToSelectConfig) -> Vec<SelectEntry> {
        self.items.to_select(config)
    }

    /// See [`EnumItems::to_menu`].
    #[must_use]
    pub fn to_menu(&self) -> Vec<MenuEntry> {
        self.items.to_menu()
    }

    /// See [`EnumItems::to_filter`].
    #[must_use]
    pub fn to_filter(&self) -> Vec<FilterEntry> {
        self.items.to_filter()
    }

    /// See [`EnumItems::to_value_map`].
    #[must_use]
    pub fn to_value_map(&self) -> IndexMap<String, ValueMapEntry> {
        self.items.to_value_map()
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

    #[deprecated(note = "use `items` instead")]
    #[must_use]
    pub fn values(&self) -> &EnumItems {
        self.items()
    }

    /// Look up one entry of the shared extension object on the registry
    /// this collection was built with. The lookup is lazy, so extensions
    /// registered after construction are visible here.
    #[must_use]
    pub fn extension(&self, name: &str) -> Option<Value> {
        self.items.registry().extension(name)
    }
}

/// `collection["Monday"]` yields the member's bare value.
///
/// # Panics
///
/// Panics if the key is not a member; use [`get`](Self::get) for a
/// fallible lookup.
impl Index<&str> for EnumCollection {
    type Output = EnumValue;

    fn index(&self, key: &str) -> &Self::Output {
        &self.members[key]
    }
}

impl fmt::Debug for EnumCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumCollection")
            .field("members", &self.members)
            .finish_non_exhaustive()
    }
}
