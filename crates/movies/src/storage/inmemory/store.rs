//! In-memory document store.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use movies_core::document::{AttributeValue, DocumentTranslator, Item, WireItem};
use movies_core::expression::{
    compare_numbers, project, project_paths, Condition, Evaluator, ExpressionRenderer,
    Projection,
};
use movies_core::store::{
    CreateTableOutput, CreateTableRequest, DeleteItemOutput, DeleteItemRequest, DocumentStore,
    GetItemOutput, GetItemRequest, ItemsOutput, PutItemOutput, PutItemRequest, QueryOutput,
    QueryRequest, ResponseMetadata, Result, ReturnValues, ScanOutput, ScanRequest, StoreError,
    TableDescription, TableSchema, TableStatus, UpdateItemOutput, UpdateItemRequest,
};

/// A scalar key value with the store's ordering.
#[derive(Debug, Clone)]
enum KeyScalar {
    S(String),
    N(String),
    B(Vec<u8>),
}

impl KeyScalar {
    fn from_attribute(value: &AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::S(s) => Some(KeyScalar::S(s.clone())),
            AttributeValue::N(n) => Some(KeyScalar::N(n.clone())),
            AttributeValue::B(b) => Some(KeyScalar::B(b.clone())),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            KeyScalar::S(_) => 0,
            KeyScalar::N(_) => 1,
            KeyScalar::B(_) => 2,
        }
    }
}

impl Ord for KeyScalar {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (KeyScalar::S(a), KeyScalar::S(b)) => a.as_bytes().cmp(b.as_bytes()),
            (KeyScalar::N(a), KeyScalar::N(b)) => {
                compare_numbers(a, b).unwrap_or_else(|| a.cmp(b))
            }
            (KeyScalar::B(a), KeyScalar::B(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for KeyScalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for KeyScalar {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for KeyScalar {}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct PrimaryKey(KeyScalar, Option<KeyScalar>);

#[derive(Debug)]
struct Table {
    schema: TableSchema,
    items: BTreeMap<PrimaryKey, WireItem>,
}

impl Table {
    /// Primary key of an item or key already checked against the schema.
    fn primary_key(&self, item: &WireItem) -> Result<PrimaryKey> {
        let scalar = |name: &str| {
            item.get(name)
                .and_then(KeyScalar::from_attribute)
                .ok_or_else(|| {
                    StoreError::Validation(
                        "The provided key element does not match the schema".to_string(),
                    )
                })
        };
        let partition = scalar(&self.schema.partition_key.name)?;
        let sort = match &self.schema.sort_key {
            Some(sort) => Some(scalar(&sort.name)?),
            None => None,
        };
        Ok(PrimaryKey(partition, sort))
    }
}

/// In-memory storage backend.
///
/// Tables live in a `HashMap` behind a `tokio::sync::RwLock`. Data is lost
/// when the store is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<HashMap<String, Table>>>,
    translator: DocumentTranslator,
}

impl MemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn metadata() -> ResponseMetadata {
        ResponseMetadata::ok(Some(Uuid::new_v4().to_string()))
    }

    /// Marshall every expression value up front, as the request would be
    /// serialized before it is sent.
    fn check_values(&self, renderer: ExpressionRenderer) -> Result<()> {
        for value in renderer.finish().values.values() {
            self.translator
                .marshall_field(&value.label, value.value.as_ref())?;
        }
        Ok(())
    }

    fn check_ranges(&self, key_condition: &Condition, filter: Option<&Condition>) -> Result<()> {
        let evaluator = Evaluator::new(&self.translator);
        evaluator.check_ranges(key_condition)?;
        if let Some(filter) = filter {
            evaluator.check_ranges(filter)?;
        }
        Ok(())
    }

    fn check_condition(&self, item: &WireItem, condition: Option<&Condition>) -> Result<()> {
        let Some(condition) = condition else {
            return Ok(());
        };
        if Evaluator::new(&self.translator).condition(item, condition)? {
            Ok(())
        } else {
            Err(StoreError::conditional_check_failed())
        }
    }

    fn unmarshall(&self, item: &WireItem) -> Result<Item> {
        Ok(self.translator.unmarshall_item(item)?)
    }

    fn unmarshall_some(&self, item: Option<&WireItem>) -> Result<Option<Item>> {
        item.filter(|i| !i.is_empty())
            .map(|i| self.unmarshall(i))
            .transpose()
    }

    fn select(&self, item: &WireItem, projection: Option<&Projection>) -> Result<Item> {
        match projection {
            Some(projection) => self.unmarshall(&project(item, projection)),
            None => self.unmarshall(item),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create_table(&self, request: CreateTableRequest) -> Result<CreateTableOutput> {
        let mut tables = self.tables.write().await;
        if tables.contains_key(&request.table_name) {
            return Err(StoreError::ResourceInUse(
                "Cannot create preexisting table".to_string(),
            ));
        }

        let description = TableDescription::created(&request, TableStatus::Active, Utc::now());
        tables.insert(
            request.table_name.clone(),
            Table {
                schema: request.schema,
                items: BTreeMap::new(),
            },
        );

        Ok(CreateTableOutput {
            metadata: Self::metadata(),
            table_description: description,
        })
    }

    async fn put_item(&self, request: PutItemRequest) -> Result<PutItemOutput> {
        let item = self.translator.marshall_item(&request.item)?;
        if let Some(condition) = &request.condition {
            let mut renderer = ExpressionRenderer::new();
            renderer.condition(condition);
            self.check_values(renderer)?;
        }

        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(&request.table_name)
            .ok_or_else(StoreError::table_not_found)?;
        table.schema.validate_item(&item)?;
        let key = table.primary_key(&item)?;

        let existing = table.items.get(&key).cloned().unwrap_or_default();
        self.check_condition(&existing, request.condition.as_ref())?;

        table.items.insert(key, item);

        Ok(PutItemOutput {
            metadata: Self::metadata(),
            attributes: None,
        })
    }

    async fn get_item(&self, request: GetItemRequest) -> Result<GetItemOutput> {
        let key = self.translator.marshall_item(&request.key)?;

        let tables = self.tables.read().await;
        let table = tables
            .get(&request.table_name)
            .ok_or_else(StoreError::table_not_found)?;
        table.schema.validate_key(&key)?;
        let key = table.primary_key(&key)?;

        let item = table
            .items
            .get(&key)
            .map(|item| self.select(item, request.projection.as_ref()))
            .transpose()?;

        Ok(GetItemOutput {
            metadata: Self::metadata(),
            item,
        })
    }

    async fn update_item(&self, request: UpdateItemRequest) -> Result<UpdateItemOutput> {
        let key_item = self.translator.marshall_item(&request.key)?;
        let mut renderer = ExpressionRenderer::new();
        renderer.update(&request.update);
        if let Some(condition) = &request.condition {
            renderer.condition(condition);
        }
        self.check_values(renderer)?;

        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(&request.table_name)
            .ok_or_else(StoreError::table_not_found)?;
        table.schema.validate_key(&key_item)?;

        let updated_paths = request.update.updated_paths();
        if let Some(path) = updated_paths
            .iter()
            .find(|p| table.schema.is_key_attribute(p.root()))
        {
            return Err(StoreError::Validation(format!(
                "One or more parameter values were invalid: Cannot update attribute {}. This attribute is part of the key",
                path.root()
            )));
        }

        let key = table.primary_key(&key_item)?;
        let old = table.items.get(&key).cloned();
        self.check_condition(&old.clone().unwrap_or_default(), request.condition.as_ref())?;

        let mut new = old.unwrap_or_else(|| key_item.clone());
        Evaluator::new(&self.translator).apply_update(&mut new, &request.update)?;

        let attributes = match request.return_values {
            ReturnValues::None => None,
            ReturnValues::UpdatedNew => {
                self.unmarshall_some(Some(&project_paths(&new, &updated_paths)))?
            }
        };
        table.items.insert(key, new);

        Ok(UpdateItemOutput {
            metadata: Self::metadata(),
            attributes,
        })
    }

    async fn delete_item(&self, request: DeleteItemRequest) -> Result<DeleteItemOutput> {
        let key = self.translator.marshall_item(&request.key)?;
        if let Some(condition) = &request.condition {
            let mut renderer = ExpressionRenderer::new();
            renderer.condition(condition);
            self.check_values(renderer)?;
        }

        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(&request.table_name)
            .ok_or_else(StoreError::table_not_found)?;
        table.schema.validate_key(&key)?;
        let key = table.primary_key(&key)?;

        let existing = table.items.get(&key).cloned().unwrap_or_default();
        self.check_condition(&existing, request.condition.as_ref())?;

        table.items.remove(&key);

        Ok(DeleteItemOutput {
            metadata: Self::metadata(),
            attributes: None,
        })
    }

    async fn query(&self, request: QueryRequest) -> Result<QueryOutput> {
        let key_condition = request.key_condition.to_condition();
        let mut renderer = ExpressionRenderer::new();
        renderer.condition(&key_condition);
        if let Some(filter) = &request.filter {
            renderer.condition(filter);
        }
        self.check_values(renderer)?;
        self.check_ranges(&key_condition, request.filter.as_ref())?;

        let tables = self.tables.read().await;
        let table = tables
            .get(&request.table_name)
            .ok_or_else(StoreError::table_not_found)?;

        let key_names = [
            Some(request.key_condition.partition_key.as_str()),
            request.key_condition.sort.as_ref().map(|s| s.key.as_str()),
        ];
        if key_names[0] != Some(table.schema.partition_key.name.as_str()) {
            return Err(StoreError::Validation(format!(
                "Query condition missed key schema element: {}",
                table.schema.partition_key.name
            )));
        }
        if let Some(sort) = key_names[1] {
            if table.schema.sort_key.as_ref().map(|k| k.name.as_str()) != Some(sort) {
                return Err(StoreError::Validation(format!(
                    "Query condition missed key schema element: {sort}"
                )));
            }
        }

        let partition_value = self.translator.marshall_field(
            &request.key_condition.partition_key,
            request.key_condition.partition_value.as_ref(),
        )?;
        if let Some(value) = &partition_value {
            if !table.schema.partition_key.attribute_type.matches(value) {
                return Err(StoreError::Validation(
                    "One or more parameter values were invalid: Condition parameter type does not match schema type"
                        .to_string(),
                ));
            }
        }

        let evaluator = Evaluator::new(&self.translator);
        let mut matched = Vec::new();
        for item in table.items.values() {
            if evaluator.condition(item, &key_condition)? {
                matched.push(item);
            }
        }
        let scanned_count = matched.len();

        let mut items = Vec::new();
        for item in matched {
            let keep = match &request.filter {
                Some(filter) => evaluator.condition(item, filter)?,
                None => true,
            };
            if keep {
                items.push(self.select(item, request.projection.as_ref())?);
            }
        }

        Ok(ItemsOutput {
            metadata: Self::metadata(),
            count: items.len(),
            scanned_count,
            items,
            last_evaluated_key: None,
        })
    }

    async fn scan(&self, request: ScanRequest) -> Result<ScanOutput> {
        if let Some(filter) = &request.filter {
            let mut renderer = ExpressionRenderer::new();
            renderer.condition(filter);
            self.check_values(renderer)?;
            Evaluator::new(&self.translator).check_ranges(filter)?;
        }

        let tables = self.tables.read().await;
        let table = tables
            .get(&request.table_name)
            .ok_or_else(StoreError::table_not_found)?;

        let evaluator = Evaluator::new(&self.translator);
        let mut items = Vec::new();
        for item in table.items.values() {
            let keep = match &request.filter {
                Some(filter) => evaluator.condition(item, filter)?,
                None => true,
            };
            if keep {
                items.push(self.select(item, request.projection.as_ref())?);
            }
        }

        Ok(ItemsOutput {
            metadata: Self::metadata(),
            count: items.len(),
            scanned_count: table.items.len(),
            items,
            last_evaluated_key: None,
        })
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
