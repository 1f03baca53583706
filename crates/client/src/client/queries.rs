//! Query and scan operations.

use movies_core::store::ItemsOutput;

use super::MoviesClient;
use crate::error::Result;

impl MoviesClient {
    /// All movies of one year.
    pub async fn query_by_year(&self, year: i64) -> Result<ItemsOutput> {
        let response = self
            .client
            .get(self.url("/query-movies-by-year"))
            .query(&[("year", year.to_string())])
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Movies of one year with a title in `[letter1, letter2]`.
    pub async fn query_by_year_and_title(
        &self,
        year: i64,
        letter1: &str,
        letter2: &str,
    ) -> Result<ItemsOutput> {
        let response = self
            .client
            .get(self.url("/query-movies-by-year-and-title"))
            .query(&[
                ("year", year.to_string()),
                ("letter1", letter1.to_string()),
                ("letter2", letter2.to_string()),
            ])
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Movies with a year in `[start_yr, end_yr]`.
    pub async fn scan_movies(&self, start_yr: i64, end_yr: i64) -> Result<ItemsOutput> {
        let response = self
            .client
            .get(self.url("/scan-movies"))
            .query(&[
                ("start_yr", start_yr.to_string()),
                ("end_yr", end_yr.to_string()),
            ])
            .send()
            .await?;
        self.handle_response(response).await
    }
}
