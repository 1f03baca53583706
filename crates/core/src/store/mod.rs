//! Store descriptors, results, errors and the [`DocumentStore`] trait.

mod bulk;
mod error;
mod http_mapping;
mod operation;
mod output;
mod schema;
mod traits;

pub use bulk::put_items;
pub use error::{Result, StoreError};
pub use http_mapping::store_error_to_status_code;
pub use operation::{
    CreateTableRequest, DeleteItemRequest, GetItemRequest, Operation, PutItemRequest,
    QueryRequest, ReturnValues, ScanRequest, UpdateItemRequest,
};
pub use output::{
    CreateTableOutput, DeleteItemOutput, GetItemOutput, ItemsOutput, OperationOutput,
    ProvisionedThroughputDescription, PutItemOutput, QueryOutput, ResponseMetadata, ScanOutput,
    TableDescription, TableStatus, UpdateItemOutput,
};
pub use schema::{
    AttributeDefinition, KeyAttribute, KeySchemaElement, KeyType, ProvisionedThroughput,
    ScalarAttributeType, TableSchema,
};
pub use traits::DocumentStore;
