use std::fmt;
use std::sync::{Arc, LazyLock};

use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;

use crate::error::EnumError;

/// Matches keys that look like the numeric half of a bidirectional
/// (reverse-mapped) enum dump.
static NUMERIC_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+$").expect("static pattern"));

/// Renders an atomic JSON value the way a dynamic host renders a
/// property key. Non-atomic values have no key form.
pub(crate) fn json_scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Extracts one field from an array-form record: either a named field of
/// the record object, or an arbitrary closure over the whole record.
#[derive(Clone)]
pub enum FieldSelector {
    /// Read the named field of the record.
    Field(String),
    /// Compute the field from the whole record.
    Extract(Arc<dyn Fn(&Value) -> Option<Value> + Send + Sync>),
}

impl FieldSelector {
    /// Wrap a closure as a selector.
    pub fn extract(f: impl Fn(&Value) -> Option<Value> + Send + Sync + 'static) -> Self {
        Self::Extract(Arc::new(f))
    }

    /// Apply the selector to a record. Missing fields and explicit JSON
    /// `null` both count as absent.
    #[must_use]
    pub fn select(&self, record: &Value) -> Option<Value> {
        match self {
            Self::Field(name) => record.get(name).filter(|v| !v.is_null()).cloned(),
            Self::Extract(f) => f(record).filter(|v| !v.is_null()),
        }
    }
}

impl fmt::Debug for FieldSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Self::Extract(_) => f.write_str("Extract(..)"),
        }
    }
}

impl From<&str> for FieldSelector {
    fn from(name: &str) -> Self {
        Self::Field(name.to_owned())
    }
}

impl From<String> for FieldSelector {
    fn from(name: String) -> Self {
        Self::Field(name)
    }
}

/// The author-supplied description an enum collection is built from.
///
/// Mapping form pairs each key name with a per-item initializer. Array
/// form is an ordered sequence of arbitrary records, reduced to mapping
/// form through the `value` / `label` / `key` field selectors before the
/// collection is built.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumInit {
    Mapping(IndexMap<String, Value>),
    Array(Vec<Value>),
}

impl EnumInit {
    /// Build a mapping-form initializer from ordered key/initializer pairs.
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build an array-form initializer from ordered records.
    pub fn array<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Self::Array(records.into_iter().collect())
    }

    /// Reduce to mapping form. Mapping input passes through unchanged;
    /// array input is folded entry by entry with the given selectors,
    /// defaulting the key to the element's resolved value and the label
    /// to the key.
    pub(crate) fn into_mapping(
        self,
        get_value: &FieldSelector,
        get_label: &FieldSelector,
        get_key: &FieldSelector,
    ) -> Result<IndexMap<String, Value>, EnumError> {
        let records = match self {
            Self::Mapping(mapping) => return Ok(mapping),
            Self::Array(records) => records,
        };

        let mut mapping = IndexMap::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let value = get_value.select(&record);
            let label = get_label.select(&record).as_ref().and_then(json_scalar_string);
            let key = get_key
                .select(&record)
                .as_ref()
                .and_then(json_scalar_string)
                .or_else(|| value.as_ref().and_then(json_scalar_string));

            let Some(key) = key else {
                return Err(EnumError::InvalidArrayElement {
                    index,
                    init: record,
                });
            };

            // Carry the whole record as the raw fragment, with the
            // resolved value and label written over its own fields.
            let mut fragment = record.as_object().cloned().unwrap_or_default();
            if let Some(value) = value {
                fragment.insert("value".to_owned(), value);
            } else {
                fragment.remove("value");
            }
            let label = label.unwrap_or_else(|| key.clone());
            fragment.insert("label".to_owned(), Value::String(label));

            mapping.insert(key, Value::Object(fragment));
        }
        Ok(mapping)
    }
}

/// The ordered key list of a mapping, with reverse-mapping artifacts
/// removed: a purely numeric key whose value leads back to itself through
/// the mapping is taken to be the reverse half of a bidirectional enum
/// dump and is skipped.
pub(crate) fn entry_keys(mapping: &IndexMap<String, Value>) -> Vec<String> {
    mapping
        .keys()
        .filter(|key| !is_reverse_mapping_entry(mapping, key))
        .cloned()
        .collect()
}

fn is_reverse_mapping_entry(mapping: &IndexMap<String, Value>, key: &str) -> bool {
    if !NUMERIC_KEY.is_match(key) {
        return false;
    }
    let Some(forward) = mapping.get(key).and_then(json_scalar_string) else {
        return false;
    };
    mapping
        .get(forward.as_str())
        .and_then(json_scalar_string)
        .is_some_and(|round_trip| round_trip == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn selectors() -> (FieldSelector, FieldSelector, FieldSelector) {
        (
            FieldSelector::from("value"),
            FieldSelector::from("label"),
            FieldSelector::from("key"),
        )
    }

    #[test]
    fn array_reduces_with_default_fields() {
        let (gv, gl, gk) = selectors();
        let init = EnumInit::array([
            json!({"value": 0, "label": "Sun", "key": "Sun"}),
            json!({"value": 1, "label": "Mon", "key": "Mon"}),
        ]);

        let mapping = init.into_mapping(&gv, &gl, &gk).unwrap();
        let keys: Vec<&String> = mapping.keys().collect();
        assert_eq!(keys, ["Sun", "Mon"]);
        assert_eq!(mapping["Sun"]["value"], json!(0));
        assert_eq!(mapping["Sun"]["label"], json!("Sun"));
    }

    #[test]
    fn array_key_falls_back_to_value() {
        let (gv, gl, gk) = selectors();
        let init = EnumInit::array([json!({"value": "P", "label": "Pending"})]);

        let mapping = init.into_mapping(&gv, &gl, &gk).unwrap();
        assert_eq!(mapping.keys().next().map(String::as_str), Some("P"));
        assert_eq!(mapping["P"]["label"], json!("Pending"));
    }

    #[test]
    fn array_label_falls_back_to_key() {
        let (gv, gl, gk) = selectors();
        let init = EnumInit::array([json!({"value": 2, "key": "Tue"})]);

        let mapping = init.into_mapping(&gv, &gl, &gk).unwrap();
        assert_eq!(mapping["Tue"]["label"], json!("Tue"));
    }

    #[test]
    fn array_with_custom_field_names() {
        let gv = FieldSelector::from("id");
        let gl = FieldSelector::from("name");
        let gk = FieldSelector::from("code");
        let init = EnumInit::array([json!({"id": 7, "name": "Seven", "code": "VII"})]);

        let mapping = init.into_mapping(&gv, &gl, &gk).unwrap();
        assert_eq!(mapping["VII"]["value"], json!(7));
        assert_eq!(mapping["VII"]["label"], json!("Seven"));
    }

    #[test]
    fn array_with_extractor_closures() {
        let gv = FieldSelector::extract(|record| record.get("n").cloned());
        let gl = FieldSelector::extract(|record| {
            record
                .get("n")
                .and_then(serde_json::Value::as_i64)
                .map(|n| Value::String(format!("#{n}")))
        });
        let gk = FieldSelector::from("key");
        let init = EnumInit::array([json!({"n": 4, "key": "Four"})]);

        let mapping = init.into_mapping(&gv, &gl, &gk).unwrap();
        assert_eq!(mapping["Four"]["value"], json!(4));
        assert_eq!(mapping["Four"]["label"], json!("#4"));
    }

    #[test]
    fn array_element_without_key_or_value_is_rejected() {
        let (gv, gl, gk) = selectors();
        let init = EnumInit::array([json!({"label": "orphan"})]);

        let err = init.into_mapping(&gv, &gl, &gk).unwrap_err();
        assert_eq!(err.code(), "ENUM_INVALID_ARRAY_ELEMENT");
    }

    #[test]
    fn mapping_passes_through_untouched() {
        let (gv, gl, gk) = selectors();
        let init = EnumInit::mapping([("Sunday", json!(0)), ("Monday", json!(1))]);

        let mapping = init.into_mapping(&gv, &gl, &gk).unwrap();
        assert_eq!(mapping["Sunday"], json!(0));
        assert_eq!(mapping["Monday"], json!(1));
    }

    #[test]
    fn reverse_mapping_keys_are_filtered() {
        // The shape produced by dumping a native numeric enum: each
        // member appears once forward and once reversed.
        let mapping: IndexMap<String, Value> = [
            ("0".to_owned(), json!("Sunday")),
            ("1".to_owned(), json!("Monday")),
            ("Sunday".to_owned(), json!(0)),
            ("Monday".to_owned(), json!(1)),
        ]
        .into_iter()
        .collect();

        assert_eq!(entry_keys(&mapping), ["Sunday", "Monday"]);
    }

    #[test]
    fn plain_numeric_keys_survive() {
        // A numeric key that does not round-trip is a legitimate member.
        let mapping: IndexMap<String, Value> =
            [("0".to_owned(), json!("zero")), ("one".to_owned(), json!(1))]
                .into_iter()
                .collect();

        assert_eq!(entry_keys(&mapping), ["0", "one"]);
    }

    #[test]
    fn negative_numeric_reverse_keys_are_filtered() {
        let mapping: IndexMap<String, Value> = [
            ("-1".to_owned(), json!("Unknown")),
            ("Unknown".to_owned(), json!(-1)),
        ]
        .into_iter()
        .collect();

        assert_eq!(entry_keys(&mapping), ["Unknown"]);
    }

    #[test]
    fn selector_treats_null_as_absent() {
        let sel = FieldSelector::from("value");
        assert_eq!(sel.select(&json!({"value": null})), None);
        assert_eq!(sel.select(&json!({"value": 3})), Some(json!(3)));
        assert_eq!(sel.select(&json!("not an object")), None);
    }
}
