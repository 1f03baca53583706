use async_trait::async_trait;

use super::{
    CreateTableOutput, CreateTableRequest, DeleteItemOutput, DeleteItemRequest, GetItemOutput,
    GetItemRequest, Operation, OperationOutput, PutItemOutput, PutItemRequest, QueryOutput,
    QueryRequest, Result, ScanOutput, ScanRequest, UpdateItemOutput, UpdateItemRequest,
};

/// A key-value/document store holding tables of items.
///
/// Implementations marshal native values into the wire format, perform the
/// call, and unmarshal the result.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Creates a table.
    async fn create_table(&self, request: CreateTableRequest) -> Result<CreateTableOutput>;

    /// Creates or replaces an item.
    async fn put_item(&self, request: PutItemRequest) -> Result<PutItemOutput>;

    /// Reads an item by its key.
    async fn get_item(&self, request: GetItemRequest) -> Result<GetItemOutput>;

    /// Applies an update expression to an item, creating it if missing.
    async fn update_item(&self, request: UpdateItemRequest) -> Result<UpdateItemOutput>;

    /// Deletes an item by its key.
    async fn delete_item(&self, request: DeleteItemRequest) -> Result<DeleteItemOutput>;

    /// Reads the items of one partition.
    async fn query(&self, request: QueryRequest) -> Result<QueryOutput>;

    /// Reads every item of a table.
    async fn scan(&self, request: ScanRequest) -> Result<ScanOutput>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<()>;

    /// Dispatches any operation descriptor.
    async fn send(&self, operation: Operation) -> Result<OperationOutput> {
        Ok(match operation {
            Operation::CreateTable(r) => OperationOutput::CreateTable(self.create_table(r).await?),
            Operation::Put(r) => OperationOutput::Put(self.put_item(r).await?),
            Operation::Get(r) => OperationOutput::Get(self.get_item(r).await?),
            Operation::Update(r) => OperationOutput::Update(self.update_item(r).await?),
            Operation::Delete(r) => OperationOutput::Delete(self.delete_item(r).await?),
            Operation::Query(r) => OperationOutput::Query(self.query(r).await?),
            Operation::Scan(r) => OperationOutput::Scan(self.scan(r).await?),
        })
    }
}
