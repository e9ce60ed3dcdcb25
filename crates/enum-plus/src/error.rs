/// Error type for enum collection construction and registry operations.
///
/// Lookup methods (`key`, `label`, `has`, `raw_of`) never produce errors;
/// they return `Option` / `bool` for unmatched input. Errors only arise
/// while building a collection from an initializer or while registering
/// a global extension.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EnumError {
    /// A per-key initializer has a shape the normalizer does not accept
    /// (for example an array where an atomic value or a `{value, label}`
    /// record was expected).
    #[error("invalid enum item for key `{key}`: unsupported initializer {init}")]
    InvalidEnumItem {
        key: String,
        init: serde_json::Value,
    },

    /// An array-form element produced neither a key nor a value through
    /// the configured extractors, so it cannot become a mapping entry.
    #[error("invalid array element at index {index}: no key or value could be extracted")]
    InvalidArrayElement {
        index: usize,
        init: serde_json::Value,
    },

    /// A non-object value was supplied to the extension registration call.
    #[error("enum extension must be an object, got {actual}")]
    InvalidExtension { actual: String },
}

impl EnumError {
    /// Broad error category for grouping in logs.
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::InvalidEnumItem { .. } | Self::InvalidArrayElement { .. } => "init",
            Self::InvalidExtension { .. } => "extension",
        }
    }

    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::InvalidEnumItem { .. } => "ENUM_INVALID_ITEM",
            Self::InvalidArrayElement { .. } => "ENUM_INVALID_ARRAY_ELEMENT",
            Self::InvalidExtension { .. } => "ENUM_INVALID_EXTENSION",
        }
    }
}
