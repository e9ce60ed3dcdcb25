use serde::Serialize;

use crate::value::EnumValue;

/// One entry of a select (drop-down) binding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectEntry {
    /// Machine-readable identifier.
    pub key: String,

    /// The value produced when this entry is selected.
    pub value: EnumValue,

    /// Localized display label.
    pub label: String,
}

/// One entry of a menu binding: the value plays the key role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuEntry {
    pub key: EnumValue,
    pub label: String,
}

/// One entry of a table-filter binding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterEntry {
    pub text: String,
    pub value: EnumValue,
}

/// One entry of a value-keyed map binding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueMapEntry {
    pub text: String,
}

/// Configuration for [`to_select`](crate::items::EnumItems::to_select).
#[derive(Debug, Clone, Default)]
pub struct ToSelectConfig {
    /// A synthetic entry prepended before the real items.
    pub first_option: FirstOption,
}

impl ToSelectConfig {
    /// Prepend the built-in "all" pseudo-entry with its defaults: key
    /// `""`, value `""`, label localized from
    /// [`OPTIONS_ALL_KEY`](crate::registry::OPTIONS_ALL_KEY).
    #[must_use]
    pub fn with_all() -> Self {
        Self {
            first_option: FirstOption::All {
                value: None,
                label: None,
            },
        }
    }

    /// Prepend a caller-supplied entry.
    #[must_use]
    pub fn with_entry(entry: FirstOptionEntry) -> Self {
        Self {
            first_option: FirstOption::Entry(entry),
        }
    }
}

/// The synthetic first entry of a select projection.
#[derive(Debug, Clone, Default)]
pub enum FirstOption {
    /// No synthetic entry; the projection contains only real items.
    #[default]
    None,

    /// The built-in "all" pseudo-entry. `value` overrides the default
    /// empty-string value; `label` overrides the built-in resource key
    /// (it is still run through localization).
    All {
        value: Option<EnumValue>,
        label: Option<String>,
    },

    /// A fully caller-supplied entry.
    Entry(FirstOptionEntry),
}

/// A caller-supplied synthetic select entry. The label is run through
/// localization; a missing key defaults to the value's string form.
#[derive(Debug, Clone, PartialEq)]
pub struct FirstOptionEntry {
    pub key: Option<String>,
    pub value: EnumValue,
    pub label: String,
}

impl FirstOptionEntry {
    /// Create an entry with the key defaulting to the value's string form.
    #[must_use]
    pub fn new(value: impl Into<EnumValue>, label: impl Into<String>) -> Self {
        Self {
            key: None,
            value: value.into(),
            label: label.into(),
        }
    }

    /// Set an explicit key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}
