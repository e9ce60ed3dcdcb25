use std::fmt;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use serde_json::Value;

use crate::error::EnumError;

/// Resolves a label (or a built-in resource key) to display text.
/// Returning `None` falls back to the input unchanged.
pub type LocalizeFn = dyn Fn(&str) -> Option<String> + Send + Sync;

/// The built-in resource key for the synthetic "all" select option.
/// A custom localization function should resolve it to its own locale;
/// the default resolves it to `"All"`.
pub const OPTIONS_ALL_KEY: &str = "enum-plus.options.all";

static GLOBAL: LazyLock<Arc<EnumRegistry>> = LazyLock::new(|| Arc::new(EnumRegistry::new()));

/// Shared localization and extension state read by enum collections.
///
/// Collections read the registry lazily, at label-resolution and
/// extension-lookup time, so replacing the localization function or the
/// extension object is observed by collections built earlier.
///
/// Most callers use the process-wide default via [`EnumRegistry::global`],
/// set once during startup. Isolated registries can be constructed for
/// tests or for embedding several independently localized enum sets in
/// one process.
pub struct EnumRegistry {
    localize: RwLock<Option<Arc<LocalizeFn>>>,
    extension: RwLock<Option<Arc<serde_json::Map<String, Value>>>>,
}

impl EnumRegistry {
    /// Create an isolated registry with the default localization and no
    /// extension object.
    #[must_use]
    pub fn new() -> Self {
        Self {
            localize: RwLock::new(None),
            extension: RwLock::new(None),
        }
    }

    /// The process-wide default registry.
    #[must_use]
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL)
    }

    /// Replace the localization function. Labels of collections built
    /// before this call resolve through the new function as well.
    pub fn set_localize(&self, f: impl Fn(&str) -> Option<String> + Send + Sync + 'static) {
        *self.localize.write() = Some(Arc::new(f));
    }

    /// Restore the default localization function.
    pub fn reset_localize(&self) {
        *self.localize.write() = None;
    }

    /// Resolve display text through the current localization function.
    /// The default resolves [`OPTIONS_ALL_KEY`] and passes everything
    /// else through unchanged; a custom function that returns `None`
    /// falls back to the input.
    #[must_use]
    pub fn localize(&self, content: &str) -> String {
        let current = self.localize.read().clone();
        match current {
            Some(f) => f(content).unwrap_or_else(|| content.to_owned()),
            None => default_localize(content),
        }
    }

    /// Install the shared extension object, replacing any previous one
    /// wholesale. Only a JSON object is accepted.
    ///
    /// Registration is retroactive: collections built before this call
    /// see the new extension entries through [`EnumCollection::extension`],
    /// because lookups read the registry lazily.
    ///
    /// [`EnumCollection::extension`]: crate::collection::EnumCollection::extension
    pub fn register_extension(&self, extension: Value) -> Result<(), EnumError> {
        let Value::Object(map) = extension else {
            return Err(EnumError::InvalidExtension {
                actual: json_kind(&extension).to_owned(),
            });
        };
        let replaced = self.extension.write().replace(Arc::new(map)).is_some();
        tracing::debug!(replaced, "registered enum extension object");
        Ok(())
    }

    /// Remove the shared extension object.
    pub fn clear_extension(&self) {
        *self.extension.write() = None;
    }

    /// Look up one entry of the shared extension object.
    #[must_use]
    pub fn extension(&self, name: &str) -> Option<Value> {
        self.extension.read().as_ref()?.get(name).cloned()
    }

    /// The whole shared extension object, if one is registered.
    #[must_use]
    pub fn extensions(&self) -> Option<Arc<serde_json::Map<String, Value>>> {
        self.extension.read().clone()
    }
}

impl Default for EnumRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EnumRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumRegistry")
            .field("localize", &self.localize.read().is_some())
            .field("extension", &self.extension.read().is_some())
            .finish()
    }
}

/// The default localization: resolve the built-in resource keys to
/// English, pass everything else through.
fn default_localize(content: &str) -> String {
    if content == OPTIONS_ALL_KEY {
        "All".to_owned()
    } else {
        content.to_owned()
    }
}

/// Resolve a label through a per-collection override if present, else
/// through the registry.
pub(crate) fn resolve_label(
    localize: Option<&Arc<LocalizeFn>>,
    registry: &EnumRegistry,
    content: &str,
) -> String {
    match localize {
        Some(f) => f(content).unwrap_or_else(|| content.to_owned()),
        None => registry.localize(content),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
