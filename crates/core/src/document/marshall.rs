//! Conversion between native JSON values and wire attribute values.
//!
//! The options mirror the store SDK's document client settings. The server
//! always runs with [`TranslateConfig::default`]: empty strings are kept,
//! undefined fields are rejected and numbers decode to native numbers.

use base64::Engine;
use serde_json::{Number, Value};

use super::attribute::{AttributeValue, WireItem};
use super::error::{Result, TranslateError};
use super::{InputItem, Item};

/// Options applied when converting native values to wire values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarshallOptions {
    /// Convert empty strings to `NULL` instead of keeping `S("")`.
    pub convert_empty_values: bool,
    /// Drop undefined fields instead of rejecting them.
    pub remove_undefined_values: bool,
}

/// Options applied when converting wire values back to native values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnmarshallOptions {
    /// Decode `N` attributes as decimal strings instead of JSON numbers.
    pub wrap_numbers: bool,
}

/// Full translation configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslateConfig {
    pub marshall: MarshallOptions,
    pub unmarshall: UnmarshallOptions,
}

/// Lossless bidirectional converter between native and wire documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentTranslator {
    config: TranslateConfig,
}

impl DocumentTranslator {
    pub fn new(config: TranslateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> TranslateConfig {
        self.config
    }

    /// Marshall a defined native value.
    pub fn marshall_value(&self, value: &Value) -> AttributeValue {
        match value {
            Value::Null => AttributeValue::Null(true),
            Value::Bool(b) => AttributeValue::Bool(*b),
            Value::Number(n) => AttributeValue::N(n.to_string()),
            Value::String(s) if s.is_empty() && self.config.marshall.convert_empty_values => {
                AttributeValue::Null(true)
            }
            Value::String(s) => AttributeValue::S(s.clone()),
            Value::Array(items) => {
                AttributeValue::L(items.iter().map(|v| self.marshall_value(v)).collect())
            }
            Value::Object(map) => AttributeValue::M(
                map.iter()
                    .map(|(k, v)| (k.clone(), self.marshall_value(v)))
                    .collect(),
            ),
        }
    }

    /// Marshall a possibly undefined field.
    ///
    /// Returns `Ok(None)` when the field is undefined and the options allow
    /// dropping it.
    pub fn marshall_field(
        &self,
        name: &str,
        value: Option<&Value>,
    ) -> Result<Option<AttributeValue>> {
        match value {
            Some(value) => Ok(Some(self.marshall_value(value))),
            None if self.config.marshall.remove_undefined_values => Ok(None),
            None => Err(TranslateError::UndefinedValue {
                field: name.to_string(),
            }),
        }
    }

    /// Marshall a native input item (or key, or expression value map).
    pub fn marshall_item(&self, item: &InputItem) -> Result<WireItem> {
        let mut wire = WireItem::new();
        for (name, value) in item {
            if let Some(attribute) = self.marshall_field(name, value.as_ref())? {
                wire.insert(name.clone(), attribute);
            }
        }
        Ok(wire)
    }

    /// Unmarshall a wire value into plain JSON.
    pub fn unmarshall_value(&self, value: &AttributeValue) -> Result<Value> {
        Ok(match value {
            AttributeValue::S(s) => Value::String(s.clone()),
            AttributeValue::N(n) => self.unmarshall_number(n)?,
            AttributeValue::B(bytes) => Value::String(encode_binary(bytes)),
            AttributeValue::Bool(b) => Value::Bool(*b),
            AttributeValue::Null(_) => Value::Null,
            AttributeValue::M(map) => Value::Object(self.unmarshall_item(map)?),
            AttributeValue::L(items) => Value::Array(
                items
                    .iter()
                    .map(|v| self.unmarshall_value(v))
                    .collect::<Result<_>>()?,
            ),
            AttributeValue::Ss(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
            AttributeValue::Ns(items) => Value::Array(
                items
                    .iter()
                    .map(|n| self.unmarshall_number(n))
                    .collect::<Result<_>>()?,
            ),
            AttributeValue::Bs(items) => Value::Array(
                items
                    .iter()
                    .map(|b| Value::String(encode_binary(b)))
                    .collect(),
            ),
        })
    }

    /// Unmarshall a wire item into a JSON object.
    pub fn unmarshall_item(&self, item: &WireItem) -> Result<Item> {
        item.iter()
            .map(|(k, v)| Ok((k.clone(), self.unmarshall_value(v)?)))
            .collect()
    }

    fn unmarshall_number(&self, n: &str) -> Result<Value> {
        if self.config.unmarshall.wrap_numbers {
            return Ok(Value::String(n.to_string()));
        }
        parse_number(n).map(Value::Number)
    }
}

/// Parse a wire decimal string into a JSON number, preferring integers.
pub fn parse_number(n: &str) -> Result<Number> {
    if let Ok(i) = n.parse::<i64>() {
        return Ok(Number::from(i));
    }
    if let Ok(u) = n.parse::<u64>() {
        return Ok(Number::from(u));
    }
    n.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| TranslateError::InvalidNumber(n.to_string()))
}

fn encode_binary(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn translator() -> DocumentTranslator {
        DocumentTranslator::default()
    }

    #[test]
    fn test_marshall_nested_document() {
        let value = json!({"rating": 8.3, "actors": ["Daniel Bruhl"], "plot": ""});
        let wire = translator().marshall_value(&value);

        let map = wire.as_m().unwrap();
        assert_eq!(map["rating"], AttributeValue::N("8.3".into()));
        assert_eq!(
            map["actors"],
            AttributeValue::L(vec![AttributeValue::S("Daniel Bruhl".into())])
        );
        // convert_empty_values is off: empty strings survive
        assert_eq!(map["plot"], AttributeValue::S(String::new()));
    }

    #[test]
    fn test_convert_empty_values_turns_empty_string_into_null() {
        let translator = DocumentTranslator::new(TranslateConfig {
            marshall: MarshallOptions {
                convert_empty_values: true,
                ..Default::default()
            },
            ..Default::default()
        });

        assert_eq!(
            translator.marshall_value(&json!("")),
            AttributeValue::Null(true)
        );
        assert_eq!(
            translator.marshall_value(&json!([])),
            AttributeValue::L(vec![])
        );
    }

    #[test]
    fn test_undefined_field_is_rejected_by_default() {
        let mut item = InputItem::new();
        item.insert("year".into(), Some(json!(2013)));
        item.insert("title".into(), None);

        let err = translator().marshall_item(&item).unwrap_err();
        assert_eq!(
            err,
            TranslateError::UndefinedValue {
                field: "title".into()
            }
        );
    }

    #[test]
    fn test_undefined_field_is_dropped_when_allowed() {
        let translator = DocumentTranslator::new(TranslateConfig {
            marshall: MarshallOptions {
                remove_undefined_values: true,
                ..Default::default()
            },
            ..Default::default()
        });
        let mut item = InputItem::new();
        item.insert("year".into(), Some(json!(2013)));
        item.insert("info".into(), None);

        let wire = translator.marshall_item(&item).unwrap();
        assert_eq!(wire.len(), 1);
        assert!(wire.contains_key("year"));
    }

    #[test]
    fn test_unmarshall_numbers_prefers_integers() {
        let t = translator();
        assert_eq!(
            t.unmarshall_value(&AttributeValue::N("2013".into())).unwrap(),
            json!(2013)
        );
        assert_eq!(
            t.unmarshall_value(&AttributeValue::N("8.3".into())).unwrap(),
            json!(8.3)
        );
        assert!(t.unmarshall_value(&AttributeValue::N("abc".into())).is_err());
    }

    #[test]
    fn test_wrap_numbers_keeps_decimal_strings() {
        let translator = DocumentTranslator::new(TranslateConfig {
            unmarshall: UnmarshallOptions { wrap_numbers: true },
            ..Default::default()
        });

        assert_eq!(
            translator
                .unmarshall_value(&AttributeValue::N("8.30".into()))
                .unwrap(),
            json!("8.30")
        );
    }

    #[test]
    fn test_unmarshall_sets_and_binary() {
        let t = translator();
        assert_eq!(
            t.unmarshall_value(&AttributeValue::Ss(vec!["a".into(), "b".into()]))
                .unwrap(),
            json!(["a", "b"])
        );
        assert_eq!(
            t.unmarshall_value(&AttributeValue::Ns(vec!["1".into(), "2.5".into()]))
                .unwrap(),
            json!([1, 2.5])
        );
        assert_eq!(
            t.unmarshall_value(&AttributeValue::B(b"hi".to_vec())).unwrap(),
            json!("aGk=")
        );
    }

    #[test]
    fn test_item_survives_translation() {
        let t = translator();
        let info = json!({"rating": 5, "actors": ["A", "B", "C"], "nested": {"ok": true, "none": null}});
        let mut item = InputItem::new();
        item.insert("year".into(), Some(json!(2020)));
        item.insert("title".into(), Some(json!("Foo")));
        item.insert("info".into(), Some(info.clone()));

        let wire = t.marshall_item(&item).unwrap();
        let native = t.unmarshall_item(&wire).unwrap();

        assert_eq!(native["year"], json!(2020));
        assert_eq!(native["title"], json!("Foo"));
        assert_eq!(native["info"], info);
    }
}
