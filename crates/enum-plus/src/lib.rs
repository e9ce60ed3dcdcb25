//! Enum collections with localized labels and UI-ready view projections.
//!
//! A collection is built once from an author-supplied initializer
//! (mapping or array form), normalized into immutable items, and then
//! queried by key or value and projected into select / menu / filter /
//! value-map shapes for UI binding. Labels resolve through a
//! localization function at read time, so installing one later still
//! affects collections built earlier.
//!
//! ```
//! use enum_plus::prelude::*;
//! use serde_json::json;
//!
//! let week = EnumCollection::new(EnumInit::mapping([
//!     ("Sunday", json!(0)),
//!     ("Monday", json!({"value": 1, "label": "Mon"})),
//! ]))?;
//!
//! assert_eq!(week["Sunday"], 0);
//! assert_eq!(week.label(1).as_deref(), Some("Mon"));
//! assert_eq!(week.label("Sunday").as_deref(), Some("Sunday"));
//! assert!(week.contains("Monday"));
//!
//! let options = week.to_select(&ToSelectConfig::with_all());
//! assert_eq!(options.len(), 3);
//! assert_eq!(options[0].label, "All");
//! # Ok::<(), enum_plus::error::EnumError>(())
//! ```

pub mod collection;
pub mod error;
pub mod init;
pub mod item;
pub mod items;
pub mod option;
pub mod registry;
pub mod value;

mod normalize;

pub mod prelude {
    pub use crate::collection::{EnumCollection, EnumOptions};
    pub use crate::error::EnumError;
    pub use crate::init::{EnumInit, FieldSelector};
    pub use crate::item::EnumItem;
    pub use crate::items::EnumItems;
    pub use crate::option::{
        FilterEntry, FirstOption, FirstOptionEntry, MenuEntry, SelectEntry, ToSelectConfig,
        ValueMapEntry,
    };
    pub use crate::registry::{EnumRegistry, OPTIONS_ALL_KEY};
    pub use crate::value::EnumValue;
}
