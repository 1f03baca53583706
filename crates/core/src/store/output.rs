//! Operation results, serialized in the store's own response shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::Item;

use super::{AttributeDefinition, CreateTableRequest, KeySchemaElement, ProvisionedThroughput};

/// Transport metadata attached to every result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    pub http_status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub attempts: u32,
    pub total_retry_delay: u64,
}

impl ResponseMetadata {
    /// Metadata for a successful single-attempt call.
    pub fn ok(request_id: Option<String>) -> Self {
        Self {
            http_status_code: 200,
            request_id,
            attempts: 1,
            total_retry_delay: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TableStatus {
    Creating,
    Updating,
    Deleting,
    Active,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProvisionedThroughputDescription {
    pub read_capacity_units: i64,
    pub write_capacity_units: i64,
    pub number_of_decreases_today: i64,
}

impl From<ProvisionedThroughput> for ProvisionedThroughputDescription {
    fn from(throughput: ProvisionedThroughput) -> Self {
        Self {
            read_capacity_units: throughput.read_capacity_units,
            write_capacity_units: throughput.write_capacity_units,
            number_of_decreases_today: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableDescription {
    pub table_name: String,
    pub table_status: TableStatus,
    pub key_schema: Vec<KeySchemaElement>,
    pub attribute_definitions: Vec<AttributeDefinition>,
    pub provisioned_throughput: ProvisionedThroughputDescription,
    pub item_count: i64,
    pub table_size_bytes: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date_time: Option<DateTime<Utc>>,
}

impl TableDescription {
    /// Description of a freshly created, empty table.
    pub fn created(request: &CreateTableRequest, status: TableStatus, at: DateTime<Utc>) -> Self {
        Self {
            table_name: request.table_name.clone(),
            table_status: status,
            key_schema: request.schema.key_schema(),
            attribute_definitions: request.schema.attribute_definitions(),
            provisioned_throughput: request.throughput.into(),
            item_count: 0,
            table_size_bytes: 0,
            creation_date_time: Some(at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateTableOutput {
    #[serde(rename = "$metadata")]
    pub metadata: ResponseMetadata,
    pub table_description: TableDescription,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutItemOutput {
    #[serde(rename = "$metadata")]
    pub metadata: ResponseMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemOutput {
    #[serde(rename = "$metadata")]
    pub metadata: ResponseMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateItemOutput {
    #[serde(rename = "$metadata")]
    pub metadata: ResponseMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteItemOutput {
    #[serde(rename = "$metadata")]
    pub metadata: ResponseMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Item>,
}

/// Result of a query or a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemsOutput {
    #[serde(rename = "$metadata")]
    pub metadata: ResponseMetadata,
    pub items: Vec<Item>,
    pub count: usize,
    pub scanned_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_evaluated_key: Option<Item>,
}

pub type QueryOutput = ItemsOutput;
pub type ScanOutput = ItemsOutput;

/// Result of [`DocumentStore::send`](super::DocumentStore::send).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OperationOutput {
    CreateTable(CreateTableOutput),
    Put(PutItemOutput),
    Get(GetItemOutput),
    Update(UpdateItemOutput),
    Delete(DeleteItemOutput),
    Query(QueryOutput),
    Scan(ScanOutput),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metadata_key_and_casing() {
        let output = GetItemOutput {
            metadata: ResponseMetadata::ok(Some("req-1".to_string())),
            item: None,
        };

        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(
            value,
            json!({
                "$metadata": {
                    "httpStatusCode": 200,
                    "requestId": "req-1",
                    "attempts": 1,
                    "totalRetryDelay": 0
                }
            })
        );
    }

    #[test]
    fn test_items_output_shape() {
        let mut item = Item::new();
        item.insert("year".to_string(), json!(2013));
        let output = ItemsOutput {
            metadata: ResponseMetadata::ok(None),
            items: vec![item],
            count: 1,
            scanned_count: 4,
            last_evaluated_key: None,
        };

        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["Items"][0]["year"], 2013);
        assert_eq!(value["Count"], 1);
        assert_eq!(value["ScannedCount"], 4);
        assert!(value.get("LastEvaluatedKey").is_none());
    }

    #[test]
    fn test_operation_output_is_untagged() {
        let output = OperationOutput::Put(PutItemOutput {
            metadata: ResponseMetadata::ok(None),
            attributes: None,
        });
        let value = serde_json::to_value(&output).unwrap();
        assert!(value.get("$metadata").is_some());
        assert!(value.get("Put").is_none());
    }
}
