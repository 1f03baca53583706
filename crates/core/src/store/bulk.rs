use futures_util::stream::{self, StreamExt};

use super::{DocumentStore, PutItemOutput, PutItemRequest, Result};

/// Put many items with at most `concurrency` requests in flight.
///
/// Every request runs to completion; results come back in request order.
pub async fn put_items(
    store: &dyn DocumentStore,
    requests: Vec<PutItemRequest>,
    concurrency: usize,
) -> Vec<Result<PutItemOutput>> {
    stream::iter(requests)
        .map(|request| store.put_item(request))
        .buffered(concurrency.max(1))
        .collect()
        .await
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::document::InputItem;
    use crate::store::{
        CreateTableOutput, CreateTableRequest, DeleteItemOutput, DeleteItemRequest,
        GetItemOutput, GetItemRequest, QueryOutput, QueryRequest, ResponseMetadata,
        ScanOutput, ScanRequest, StoreError, UpdateItemOutput, UpdateItemRequest,
    };

    /// Records peak concurrency and fails items titled "bad".
    #[derive(Default)]
    struct CountingStore {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl DocumentStore for CountingStore {
        async fn create_table(&self, _: CreateTableRequest) -> Result<CreateTableOutput> {
            unimplemented!()
        }

        async fn put_item(&self, request: PutItemRequest) -> Result<PutItemOutput> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if request.item.get("title") == Some(&Some(json!("bad"))) {
                return Err(StoreError::Validation("bad title".to_string()));
            }
            Ok(PutItemOutput {
                metadata: ResponseMetadata::ok(None),
                attributes: None,
            })
        }

        async fn get_item(&self, _: GetItemRequest) -> Result<GetItemOutput> {
            unimplemented!()
        }

        async fn update_item(&self, _: UpdateItemRequest) -> Result<UpdateItemOutput> {
            unimplemented!()
        }

        async fn delete_item(&self, _: DeleteItemRequest) -> Result<DeleteItemOutput> {
            unimplemented!()
        }

        async fn query(&self, _: QueryRequest) -> Result<QueryOutput> {
            unimplemented!()
        }

        async fn scan(&self, _: ScanRequest) -> Result<ScanOutput> {
            unimplemented!()
        }

        async fn ping(&self) -> Result<()> {
            Ok(())
        }
    }

    fn request(title: &str) -> PutItemRequest {
        PutItemRequest {
            table_name: "Movies".to_string(),
            item: InputItem::from([("title".to_string(), Some(json!(title)))]),
            condition: None,
        }
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let store = CountingStore::default();
        let requests = (0..20).map(|i| request(&format!("movie {i}"))).collect();

        let results = put_items(&store, requests, 4).await;

        assert_eq!(results.len(), 20);
        assert!(results.iter().all(|r| r.is_ok()));
        assert!(store.peak.load(Ordering::SeqCst) <= 4);
    }

    #[tokio::test]
    async fn test_failures_do_not_abort_the_batch() {
        let store = CountingStore::default();
        let requests = vec![request("a"), request("bad"), request("c")];

        let results = put_items(&store, requests, 2).await;

        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(StoreError::Validation(_))));
        assert!(results[2].is_ok());
    }

    #[tokio::test]
    async fn test_zero_concurrency_still_runs() {
        let store = CountingStore::default();
        let results = put_items(&store, vec![request("a")], 0).await;
        assert_eq!(results.len(), 1);
    }
}
