//! Conversion between wire attribute values and SDK attribute values.
//!
//! Pure functions, testable without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::{
    AttributeValue as SdkValue, KeySchemaElement as SdkKeySchemaElement, KeyType as SdkKeyType,
    ScalarAttributeType as SdkScalarType, TableDescription as SdkTableDescription,
    TableStatus as SdkTableStatus,
};
use chrono::{DateTime, Utc};

use movies_core::document::{AttributeValue, WireItem};
use movies_core::store::{
    AttributeDefinition, KeySchemaElement, KeyType, ProvisionedThroughputDescription, Result,
    ScalarAttributeType, StoreError, TableDescription, TableStatus,
};

pub type SdkItem = HashMap<String, SdkValue>;

pub fn value_to_sdk(value: AttributeValue) -> SdkValue {
    match value {
        AttributeValue::S(s) => SdkValue::S(s),
        AttributeValue::N(n) => SdkValue::N(n),
        AttributeValue::B(b) => SdkValue::B(Blob::new(b)),
        AttributeValue::Bool(b) => SdkValue::Bool(b),
        AttributeValue::Null(n) => SdkValue::Null(n),
        AttributeValue::M(m) => SdkValue::M(item_to_sdk(m)),
        AttributeValue::L(l) => SdkValue::L(l.into_iter().map(value_to_sdk).collect()),
        AttributeValue::Ss(ss) => SdkValue::Ss(ss),
        AttributeValue::Ns(ns) => SdkValue::Ns(ns),
        AttributeValue::Bs(bs) => SdkValue::Bs(bs.into_iter().map(Blob::new).collect()),
    }
}

pub fn value_from_sdk(value: SdkValue) -> Result<AttributeValue> {
    Ok(match value {
        SdkValue::S(s) => AttributeValue::S(s),
        SdkValue::N(n) => AttributeValue::N(n),
        SdkValue::B(b) => AttributeValue::B(b.into_inner()),
        SdkValue::Bool(b) => AttributeValue::Bool(b),
        SdkValue::Null(n) => AttributeValue::Null(n),
        SdkValue::M(m) => AttributeValue::M(item_from_sdk(m)?),
        SdkValue::L(l) => AttributeValue::L(
            l.into_iter()
                .map(value_from_sdk)
                .collect::<Result<Vec<_>>>()?,
        ),
        SdkValue::Ss(ss) => AttributeValue::Ss(ss),
        SdkValue::Ns(ns) => AttributeValue::Ns(ns),
        SdkValue::Bs(bs) => AttributeValue::Bs(bs.into_iter().map(Blob::into_inner).collect()),
        other => {
            return Err(StoreError::Service(format!(
                "Unsupported attribute value: {other:?}"
            )))
        }
    })
}

pub fn item_to_sdk(item: WireItem) -> SdkItem {
    item.into_iter()
        .map(|(k, v)| (k, value_to_sdk(v)))
        .collect()
}

pub fn item_from_sdk(item: SdkItem) -> Result<WireItem> {
    item.into_iter()
        .map(|(k, v)| Ok((k, value_from_sdk(v)?)))
        .collect()
}

pub fn scalar_type_to_sdk(attribute_type: ScalarAttributeType) -> SdkScalarType {
    match attribute_type {
        ScalarAttributeType::S => SdkScalarType::S,
        ScalarAttributeType::N => SdkScalarType::N,
        ScalarAttributeType::B => SdkScalarType::B,
    }
}

fn scalar_type_from_sdk(attribute_type: &SdkScalarType) -> ScalarAttributeType {
    match attribute_type {
        SdkScalarType::N => ScalarAttributeType::N,
        SdkScalarType::B => ScalarAttributeType::B,
        _ => ScalarAttributeType::S,
    }
}

pub fn key_type_to_sdk(key_type: KeyType) -> SdkKeyType {
    match key_type {
        KeyType::Hash => SdkKeyType::Hash,
        KeyType::Range => SdkKeyType::Range,
    }
}

fn key_schema_from_sdk(element: &SdkKeySchemaElement) -> KeySchemaElement {
    KeySchemaElement {
        attribute_name: element.attribute_name().to_string(),
        key_type: match element.key_type() {
            SdkKeyType::Hash => KeyType::Hash,
            _ => KeyType::Range,
        },
    }
}

fn status_from_sdk(status: Option<&SdkTableStatus>) -> TableStatus {
    match status {
        Some(SdkTableStatus::Active) => TableStatus::Active,
        Some(SdkTableStatus::Updating) => TableStatus::Updating,
        Some(SdkTableStatus::Deleting) => TableStatus::Deleting,
        _ => TableStatus::Creating,
    }
}

/// Convert the SDK table description into the response shape.
pub fn table_description_from_sdk(description: &SdkTableDescription) -> TableDescription {
    let throughput = description.provisioned_throughput();

    TableDescription {
        table_name: description.table_name().unwrap_or_default().to_string(),
        table_status: status_from_sdk(description.table_status()),
        key_schema: description
            .key_schema()
            .iter()
            .map(key_schema_from_sdk)
            .collect(),
        attribute_definitions: description
            .attribute_definitions()
            .iter()
            .map(|d| AttributeDefinition {
                attribute_name: d.attribute_name().to_string(),
                attribute_type: scalar_type_from_sdk(d.attribute_type()),
            })
            .collect(),
        provisioned_throughput: ProvisionedThroughputDescription {
            read_capacity_units: throughput.and_then(|t| t.read_capacity_units()).unwrap_or(0),
            write_capacity_units: throughput
                .and_then(|t| t.write_capacity_units())
                .unwrap_or(0),
            number_of_decreases_today: throughput
                .and_then(|t| t.number_of_decreases_today())
                .unwrap_or(0),
        },
        item_count: description.item_count().unwrap_or(0),
        table_size_bytes: description.table_size_bytes().unwrap_or(0),
        creation_date_time: description
            .creation_date_time()
            .and_then(|t| DateTime::<Utc>::from_timestamp(t.secs(), t.subsec_nanos())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_item_survives_conversion() {
        let item = WireItem::from([
            ("year".to_string(), AttributeValue::N("2013".into())),
            (
                "info".to_string(),
                AttributeValue::M(WireItem::from([
                    (
                        "actors".to_string(),
                        AttributeValue::L(vec![AttributeValue::S("Daniel Bruhl".into())]),
                    ),
                    ("image".to_string(), AttributeValue::B(vec![1, 2, 3])),
                    ("unrated".to_string(), AttributeValue::Null(true)),
                ])),
            ),
        ]);

        let sdk = item_to_sdk(item.clone());
        assert_eq!(sdk["year"], SdkValue::N("2013".into()));

        assert_eq!(item_from_sdk(sdk).unwrap(), item);
    }

    #[test]
    fn test_binary_sets_use_blobs() {
        let value = value_to_sdk(AttributeValue::Bs(vec![vec![0xff]]));
        assert_eq!(value, SdkValue::Bs(vec![Blob::new(vec![0xff])]));
    }

    #[test]
    fn test_key_type_mapping() {
        assert_eq!(key_type_to_sdk(KeyType::Hash), SdkKeyType::Hash);
        assert_eq!(scalar_type_to_sdk(ScalarAttributeType::N), SdkScalarType::N);
    }
}
