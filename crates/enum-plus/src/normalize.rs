use serde_json::Value;

use crate::error::EnumError;
use crate::init::json_scalar_string;
use crate::value::EnumValue;

/// A per-key initializer reduced to its canonical form.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Normalized {
    pub value: EnumValue,
    pub label: String,
}

/// Normalize one per-key initializer fragment.
///
/// Accepted shapes, in the order they are recognized:
/// - absent or `null`: value and label both default to the key;
/// - a bare number or string literal: it becomes the value, the label
///   is the key;
/// - a record with its own `value` field (and optionally `label`);
/// - a record with only a `label` field: the value defaults to the key;
/// - any other record, including an empty one: both default to the key.
///
/// Anything else (a bare boolean, an array, or a record whose `value` /
/// `label` fields are themselves non-atomic) is a construction error.
/// Boolean values are accepted only inside a `{value: ...}` record.
pub(crate) fn normalize_item(key: &str, init: Option<&Value>) -> Result<Normalized, EnumError> {
    let Some(init) = init.filter(|v| !v.is_null()) else {
        return Ok(Normalized {
            value: EnumValue::Str(key.to_owned()),
            label: key.to_owned(),
        });
    };

    if init.is_boolean() {
        return Err(EnumError::InvalidEnumItem {
            key: key.to_owned(),
            init: init.clone(),
        });
    }

    if let Some(value) = EnumValue::from_json(init) {
        return Ok(Normalized {
            value,
            label: key.to_owned(),
        });
    }

    let Some(record) = init.as_object() else {
        return Err(EnumError::InvalidEnumItem {
            key: key.to_owned(),
            init: init.clone(),
        });
    };

    if record.contains_key("value") {
        let value = match &record["value"] {
            Value::Null => EnumValue::Str(key.to_owned()),
            raw => EnumValue::from_json(raw).ok_or_else(|| EnumError::InvalidEnumItem {
                key: key.to_owned(),
                init: init.clone(),
            })?,
        };
        let label = match record.get("label") {
            None | Some(Value::Null) => key.to_owned(),
            Some(raw) => label_string(key, init, raw)?,
        };
        Ok(Normalized { value, label })
    } else if let Some(raw) = record.get("label") {
        let label = match raw {
            Value::Null => key.to_owned(),
            raw => label_string(key, init, raw)?,
        };
        Ok(Normalized {
            value: EnumValue::Str(key.to_owned()),
            label,
        })
    } else {
        // Empty record, or a record with only unrecognized fields.
        Ok(Normalized {
            value: EnumValue::Str(key.to_owned()),
            label: key.to_owned(),
        })
    }
}

fn label_string(key: &str, init: &Value, raw: &Value) -> Result<String, EnumError> {
    json_scalar_string(raw).ok_or_else(|| EnumError::InvalidEnumItem {
        key: key.to_owned(),
        init: init.clone(),
    })
}
