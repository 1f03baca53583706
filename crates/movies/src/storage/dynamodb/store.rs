//! DynamoDB document store.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::operation::RequestId;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, KeySchemaElement, ProvisionedThroughput, ReturnValue,
};
use aws_sdk_dynamodb::Client;

use movies_core::document::{DocumentTranslator, Item};
use movies_core::expression::ExpressionRenderer;
use movies_core::store::{
    CreateTableOutput, CreateTableRequest, DeleteItemOutput, DeleteItemRequest, DocumentStore,
    GetItemOutput, GetItemRequest, ItemsOutput, PutItemOutput, PutItemRequest, QueryOutput,
    QueryRequest, ResponseMetadata, Result, ReturnValues, ScanOutput, ScanRequest,
    UpdateItemOutput, UpdateItemRequest,
};

use super::conversions::{
    item_from_sdk, item_to_sdk, key_type_to_sdk, scalar_type_to_sdk,
    table_description_from_sdk, value_to_sdk, SdkItem,
};
use super::error::{
    map_build_error, map_create_table_error, map_delete_item_error, map_get_item_error,
    map_list_tables_error, map_put_item_error, map_query_error, map_scan_error,
    map_update_item_error,
};
use crate::config::StoreConfig;

/// Attribute name and value maps for one request. `None` when empty, since
/// the store rejects empty maps.
struct ExpressionAttributes {
    names: Option<HashMap<String, String>>,
    values: Option<SdkItem>,
}

/// DynamoDB-backed document store.
pub struct DynamoDbStore {
    client: Client,
    translator: DocumentTranslator,
}

impl DynamoDbStore {
    /// Creates a store over an existing client.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            translator: DocumentTranslator::default(),
        }
    }

    /// Creates a store from connection settings.
    pub async fn from_config(config: &StoreConfig) -> Self {
        Self::new(super::build_client(config).await)
    }

    fn marshall(&self, item: &movies_core::document::InputItem) -> Result<SdkItem> {
        Ok(item_to_sdk(self.translator.marshall_item(item)?))
    }

    fn unmarshall(&self, item: SdkItem) -> Result<Item> {
        Ok(self.translator.unmarshall_item(&item_from_sdk(item)?)?)
    }

    fn unmarshall_some(&self, item: Option<SdkItem>) -> Result<Option<Item>> {
        item.map(|i| self.unmarshall(i)).transpose()
    }

    fn unmarshall_all(&self, items: Option<Vec<SdkItem>>) -> Result<Vec<Item>> {
        items
            .unwrap_or_default()
            .into_iter()
            .map(|i| self.unmarshall(i))
            .collect()
    }

    fn attributes(&self, renderer: ExpressionRenderer) -> Result<ExpressionAttributes> {
        let placeholders = renderer.finish();

        let mut values = SdkItem::new();
        for (placeholder, value) in placeholders.values {
            if let Some(attribute) = self
                .translator
                .marshall_field(&value.label, value.value.as_ref())?
            {
                values.insert(placeholder, value_to_sdk(attribute));
            }
        }
        let names: HashMap<String, String> = placeholders.names.into_iter().collect();

        Ok(ExpressionAttributes {
            names: (!names.is_empty()).then_some(names),
            values: (!values.is_empty()).then_some(values),
        })
    }
}

fn metadata(request_id: Option<&str>) -> ResponseMetadata {
    ResponseMetadata::ok(request_id.map(str::to_string))
}

fn return_value(return_values: ReturnValues) -> Option<ReturnValue> {
    match return_values {
        ReturnValues::None => None,
        ReturnValues::UpdatedNew => Some(ReturnValue::UpdatedNew),
    }
}

#[async_trait]
impl DocumentStore for DynamoDbStore {
    async fn create_table(&self, request: CreateTableRequest) -> Result<CreateTableOutput> {
        let key_schema = request
            .schema
            .key_schema()
            .into_iter()
            .map(|k| {
                KeySchemaElement::builder()
                    .attribute_name(k.attribute_name)
                    .key_type(key_type_to_sdk(k.key_type))
                    .build()
                    .map_err(map_build_error)
            })
            .collect::<Result<Vec<_>>>()?;
        let attribute_definitions = request
            .schema
            .attribute_definitions()
            .into_iter()
            .map(|d| {
                AttributeDefinition::builder()
                    .attribute_name(d.attribute_name)
                    .attribute_type(scalar_type_to_sdk(d.attribute_type))
                    .build()
                    .map_err(map_build_error)
            })
            .collect::<Result<Vec<_>>>()?;
        let throughput = ProvisionedThroughput::builder()
            .read_capacity_units(request.throughput.read_capacity_units)
            .write_capacity_units(request.throughput.write_capacity_units)
            .build()
            .map_err(map_build_error)?;

        let output = self
            .client
            .create_table()
            .table_name(&request.table_name)
            .set_key_schema(Some(key_schema))
            .set_attribute_definitions(Some(attribute_definitions))
            .provisioned_throughput(throughput)
            .send()
            .await
            .map_err(map_create_table_error)?;

        let table_description = match output.table_description() {
            Some(description) => table_description_from_sdk(description),
            None => movies_core::store::TableDescription::created(
                &request,
                movies_core::store::TableStatus::Creating,
                chrono::Utc::now(),
            ),
        };

        Ok(CreateTableOutput {
            metadata: metadata(output.request_id()),
            table_description,
        })
    }

    async fn put_item(&self, request: PutItemRequest) -> Result<PutItemOutput> {
        let item = self.marshall(&request.item)?;
        let mut renderer = ExpressionRenderer::new();
        let condition = request.condition.as_ref().map(|c| renderer.condition(c));
        let attributes = self.attributes(renderer)?;

        let output = self
            .client
            .put_item()
            .table_name(&request.table_name)
            .set_item(Some(item))
            .set_condition_expression(condition)
            .set_expression_attribute_names(attributes.names)
            .set_expression_attribute_values(attributes.values)
            .send()
            .await
            .map_err(map_put_item_error)?;

        let metadata = metadata(output.request_id());
        Ok(PutItemOutput {
            metadata,
            attributes: self.unmarshall_some(output.attributes)?,
        })
    }

    async fn get_item(&self, request: GetItemRequest) -> Result<GetItemOutput> {
        let key = self.marshall(&request.key)?;
        let mut renderer = ExpressionRenderer::new();
        let projection = request.projection.as_ref().map(|p| renderer.projection(p));
        let attributes = self.attributes(renderer)?;

        let output = self
            .client
            .get_item()
            .table_name(&request.table_name)
            .set_key(Some(key))
            .set_projection_expression(projection)
            .set_expression_attribute_names(attributes.names)
            .consistent_read(request.consistent_read)
            .send()
            .await
            .map_err(map_get_item_error)?;

        let metadata = metadata(output.request_id());
        Ok(GetItemOutput {
            metadata,
            item: self.unmarshall_some(output.item)?,
        })
    }

    async fn update_item(&self, request: UpdateItemRequest) -> Result<UpdateItemOutput> {
        let key = self.marshall(&request.key)?;
        let mut renderer = ExpressionRenderer::new();
        let update = renderer.update(&request.update);
        let condition = request.condition.as_ref().map(|c| renderer.condition(c));
        let attributes = self.attributes(renderer)?;

        let output = self
            .client
            .update_item()
            .table_name(&request.table_name)
            .set_key(Some(key))
            .update_expression(update)
            .set_condition_expression(condition)
            .set_expression_attribute_names(attributes.names)
            .set_expression_attribute_values(attributes.values)
            .set_return_values(return_value(request.return_values))
            .send()
            .await
            .map_err(map_update_item_error)?;

        let metadata = metadata(output.request_id());
        Ok(UpdateItemOutput {
            metadata,
            attributes: self.unmarshall_some(output.attributes)?,
        })
    }

    async fn delete_item(&self, request: DeleteItemRequest) -> Result<DeleteItemOutput> {
        let key = self.marshall(&request.key)?;
        let mut renderer = ExpressionRenderer::new();
        let condition = request.condition.as_ref().map(|c| renderer.condition(c));
        let attributes = self.attributes(renderer)?;

        let output = self
            .client
            .delete_item()
            .table_name(&request.table_name)
            .set_key(Some(key))
            .set_condition_expression(condition)
            .set_expression_attribute_names(attributes.names)
            .set_expression_attribute_values(attributes.values)
            .send()
            .await
            .map_err(map_delete_item_error)?;

        let metadata = metadata(output.request_id());
        Ok(DeleteItemOutput {
            metadata,
            attributes: self.unmarshall_some(output.attributes)?,
        })
    }

    async fn query(&self, request: QueryRequest) -> Result<QueryOutput> {
        let mut renderer = ExpressionRenderer::new();
        let key_condition = renderer.key_condition(&request.key_condition);
        let filter = request.filter.as_ref().map(|f| renderer.condition(f));
        let projection = request.projection.as_ref().map(|p| renderer.projection(p));
        let attributes = self.attributes(renderer)?;

        let output = self
            .client
            .query()
            .table_name(&request.table_name)
            .key_condition_expression(key_condition)
            .set_filter_expression(filter)
            .set_projection_expression(projection)
            .set_expression_attribute_names(attributes.names)
            .set_expression_attribute_values(attributes.values)
            .send()
            .await
            .map_err(map_query_error)?;

        let metadata = metadata(output.request_id());
        Ok(ItemsOutput {
            metadata,
            count: output.count.max(0) as usize,
            scanned_count: output.scanned_count.max(0) as usize,
            items: self.unmarshall_all(output.items)?,
            last_evaluated_key: self.unmarshall_some(output.last_evaluated_key)?,
        })
    }

    async fn scan(&self, request: ScanRequest) -> Result<ScanOutput> {
        let mut renderer = ExpressionRenderer::new();
        let filter = request.filter.as_ref().map(|f| renderer.condition(f));
        let projection = request.projection.as_ref().map(|p| renderer.projection(p));
        let attributes = self.attributes(renderer)?;

        let output = self
            .client
            .scan()
            .table_name(&request.table_name)
            .set_filter_expression(filter)
            .set_projection_expression(projection)
            .set_expression_attribute_names(attributes.names)
            .set_expression_attribute_values(attributes.values)
            .send()
            .await
            .map_err(map_scan_error)?;

        let metadata = metadata(output.request_id());
        Ok(ItemsOutput {
            metadata,
            count: output.count.max(0) as usize,
            scanned_count: output.scanned_count.max(0) as usize,
            items: self.unmarshall_all(output.items)?,
            last_evaluated_key: self.unmarshall_some(output.last_evaluated_key)?,
        })
    }

    async fn ping(&self) -> Result<()> {
        self.client
            .list_tables()
            .limit(1)
            .send()
            .await
            .map_err(map_list_tables_error)?;
        Ok(())
    }
}
