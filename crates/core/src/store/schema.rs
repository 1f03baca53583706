use serde::{Deserialize, Serialize};

use crate::document::{AttributeValue, WireItem};

use super::{Result, StoreError};

/// Scalar types allowed for key attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarAttributeType {
    S,
    N,
    B,
}

impl ScalarAttributeType {
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarAttributeType::S => "S",
            ScalarAttributeType::N => "N",
            ScalarAttributeType::B => "B",
        }
    }

    pub fn matches(self, value: &AttributeValue) -> bool {
        matches!(
            (self, value),
            (ScalarAttributeType::S, AttributeValue::S(_))
                | (ScalarAttributeType::N, AttributeValue::N(_))
                | (ScalarAttributeType::B, AttributeValue::B(_))
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KeyType {
    Hash,
    Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeySchemaElement {
    pub attribute_name: String,
    pub key_type: KeyType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeDefinition {
    pub attribute_name: String,
    pub attribute_type: ScalarAttributeType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProvisionedThroughput {
    pub read_capacity_units: i64,
    pub write_capacity_units: i64,
}

/// A key attribute and its declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: ScalarAttributeType,
}

impl KeyAttribute {
    pub fn new(name: impl Into<String>, attribute_type: ScalarAttributeType) -> Self {
        Self {
            name: name.into(),
            attribute_type,
        }
    }
}

/// Primary key layout of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub partition_key: KeyAttribute,
    pub sort_key: Option<KeyAttribute>,
}

impl TableSchema {
    pub fn key_attributes(&self) -> impl Iterator<Item = &KeyAttribute> {
        std::iter::once(&self.partition_key).chain(self.sort_key.as_ref())
    }

    pub fn is_key_attribute(&self, name: &str) -> bool {
        self.key_attributes().any(|k| k.name == name)
    }

    pub fn key_schema(&self) -> Vec<KeySchemaElement> {
        let mut schema = vec![KeySchemaElement {
            attribute_name: self.partition_key.name.clone(),
            key_type: KeyType::Hash,
        }];
        if let Some(sort) = &self.sort_key {
            schema.push(KeySchemaElement {
                attribute_name: sort.name.clone(),
                key_type: KeyType::Range,
            });
        }
        schema
    }

    pub fn attribute_definitions(&self) -> Vec<AttributeDefinition> {
        self.key_attributes()
            .map(|k| AttributeDefinition {
                attribute_name: k.name.clone(),
                attribute_type: k.attribute_type,
            })
            .collect()
    }

    /// Check that an item carries every key attribute with its declared type.
    pub fn validate_item(&self, item: &WireItem) -> Result<()> {
        for key in self.key_attributes() {
            let Some(value) = item.get(&key.name) else {
                return Err(StoreError::Validation(format!(
                    "One or more parameter values were invalid: Missing the key {} in the item",
                    key.name
                )));
            };
            check_key_value(key, value)?;
        }
        Ok(())
    }

    /// Check that a key has exactly the key attributes with their declared
    /// types.
    pub fn validate_key(&self, key: &WireItem) -> Result<()> {
        let expected = self.key_attributes().count();
        if key.len() != expected {
            return Err(key_mismatch());
        }
        for attribute in self.key_attributes() {
            let value = key.get(&attribute.name).ok_or_else(key_mismatch)?;
            if !attribute.attribute_type.matches(value) {
                return Err(key_mismatch());
            }
            check_key_value(attribute, value)?;
        }
        Ok(())
    }
}

fn check_key_value(key: &KeyAttribute, value: &AttributeValue) -> Result<()> {
    if !key.attribute_type.matches(value) {
        return Err(StoreError::Validation(format!(
            "One or more parameter values were invalid: Type mismatch for key {} expected: {} actual: {}",
            key.name,
            key.attribute_type.as_str(),
            value.type_descriptor()
        )));
    }
    let empty = match value {
        AttributeValue::S(s) => s.is_empty(),
        AttributeValue::B(b) => b.is_empty(),
        _ => false,
    };
    if empty {
        return Err(StoreError::Validation(format!(
            "One or more parameter values are not valid. The AttributeValue for a key attribute cannot contain an empty string value. Key: {}",
            key.name
        )));
    }
    Ok(())
}

fn key_mismatch() -> StoreError {
    StoreError::Validation("The provided key element does not match the schema".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> TableSchema {
        TableSchema {
            partition_key: KeyAttribute::new("year", ScalarAttributeType::N),
            sort_key: Some(KeyAttribute::new("title", ScalarAttributeType::S)),
        }
    }

    fn key(year: AttributeValue, title: AttributeValue) -> WireItem {
        WireItem::from([("year".to_string(), year), ("title".to_string(), title)])
    }

    #[test]
    fn test_key_schema_order() {
        let schema = schema().key_schema();
        assert_eq!(schema[0].key_type, KeyType::Hash);
        assert_eq!(schema[1].attribute_name, "title");
    }

    #[test]
    fn test_validate_item_missing_key() {
        let item = WireItem::from([("year".to_string(), AttributeValue::N("2013".into()))]);
        let err = schema().validate_item(&item).unwrap_err();
        assert_eq!(
            err.to_string(),
            "One or more parameter values were invalid: Missing the key title in the item"
        );
    }

    #[test]
    fn test_validate_item_type_mismatch() {
        let item = key(AttributeValue::S("2013".into()), AttributeValue::S("Rush".into()));
        let err = schema().validate_item(&item).unwrap_err();
        assert!(err.to_string().contains("expected: N actual: S"));
    }

    #[test]
    fn test_validate_key_rejects_extra_attributes() {
        let mut k = key(AttributeValue::N("2013".into()), AttributeValue::S("Rush".into()));
        assert!(schema().validate_key(&k).is_ok());

        k.insert("info".to_string(), AttributeValue::Null(true));
        assert_eq!(
            schema().validate_key(&k).unwrap_err().to_string(),
            "The provided key element does not match the schema"
        );
    }

    #[test]
    fn test_empty_string_key_is_rejected() {
        let k = key(AttributeValue::N("2013".into()), AttributeValue::S(String::new()));
        assert!(matches!(
            schema().validate_key(&k),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn test_serialized_names() {
        let definition = serde_json::to_value(&schema().attribute_definitions()[0]).unwrap();
        assert_eq!(
            definition,
            serde_json::json!({"AttributeName": "year", "AttributeType": "N"})
        );
        let element = serde_json::to_value(&schema().key_schema()[1]).unwrap();
        assert_eq!(element["KeyType"], "RANGE");
    }
}
