//! Table and bulk-load operations.

use movies_core::movies::BulkLoadReport;
use movies_core::store::CreateTableOutput;

use super::MoviesClient;
use crate::error::Result;

impl MoviesClient {
    /// Create the `Movies` table.
    pub async fn create_table(&self) -> Result<CreateTableOutput> {
        let response = self.client.post(self.url("/create-table")).send().await?;
        self.handle_response(response).await
    }

    /// Load the server's sample data file.
    pub async fn load_sample_data(&self) -> Result<BulkLoadReport> {
        let response = self
            .client
            .post(self.url("/load-sample-data"))
            .send()
            .await?;
        self.handle_response(response).await
    }
}
