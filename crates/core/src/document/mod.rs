//! Document translation layer.
//!
//! Native documents are `serde_json` values. Wire documents use
//! [`AttributeValue`], the store's typed attribute representation.

mod attribute;
mod error;
mod marshall;

use std::collections::BTreeMap;

use serde_json::Value;

pub use attribute::{AttributeValue, WireItem};
pub use error::{Result, TranslateError};
pub use marshall::{
    parse_number, DocumentTranslator, MarshallOptions, TranslateConfig, UnmarshallOptions,
};

/// A native item as returned to callers.
pub type Item = serde_json::Map<String, Value>;

/// A native item, key or value map as supplied by callers.
///
/// `None` marks a field the caller never supplied, which is not the same
/// thing as JSON `null`.
pub type InputItem = BTreeMap<String, Option<Value>>;
