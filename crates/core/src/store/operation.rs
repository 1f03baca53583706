//! Request descriptors, one per store operation.

use crate::document::InputItem;
use crate::expression::{Condition, KeyCondition, Projection, UpdateExpression};

use super::{ProvisionedThroughput, TableSchema};

/// Which attributes an update returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReturnValues {
    #[default]
    None,
    /// The updated attributes as they are after the update.
    UpdatedNew,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableRequest {
    pub table_name: String,
    pub schema: TableSchema,
    pub throughput: ProvisionedThroughput,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PutItemRequest {
    pub table_name: String,
    pub item: InputItem,
    pub condition: Option<Condition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetItemRequest {
    pub table_name: String,
    pub key: InputItem,
    pub projection: Option<Projection>,
    pub consistent_read: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateItemRequest {
    pub table_name: String,
    pub key: InputItem,
    pub update: UpdateExpression,
    pub condition: Option<Condition>,
    pub return_values: ReturnValues,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteItemRequest {
    pub table_name: String,
    pub key: InputItem,
    pub condition: Option<Condition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub table_name: String,
    pub key_condition: KeyCondition,
    pub filter: Option<Condition>,
    pub projection: Option<Projection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanRequest {
    pub table_name: String,
    pub filter: Option<Condition>,
    pub projection: Option<Projection>,
}

/// Any store operation, as accepted by [`DocumentStore::send`].
///
/// [`DocumentStore::send`]: super::DocumentStore::send
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    CreateTable(CreateTableRequest),
    Put(PutItemRequest),
    Get(GetItemRequest),
    Update(UpdateItemRequest),
    Delete(DeleteItemRequest),
    Query(QueryRequest),
    Scan(ScanRequest),
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::CreateTable(_) => "CreateTable",
            Operation::Put(_) => "PutItem",
            Operation::Get(_) => "GetItem",
            Operation::Update(_) => "UpdateItem",
            Operation::Delete(_) => "DeleteItem",
            Operation::Query(_) => "Query",
            Operation::Scan(_) => "Scan",
        }
    }

    pub fn table_name(&self) -> &str {
        match self {
            Operation::CreateTable(r) => &r.table_name,
            Operation::Put(r) => &r.table_name,
            Operation::Get(r) => &r.table_name,
            Operation::Update(r) => &r.table_name,
            Operation::Delete(r) => &r.table_name,
            Operation::Query(r) => &r.table_name,
            Operation::Scan(r) => &r.table_name,
        }
    }
}
