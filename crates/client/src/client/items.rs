//! Single-movie operations.

use movies_core::store::{DeleteItemOutput, GetItemOutput, PutItemOutput, UpdateItemOutput};
use serde_json::{json, Value};

use super::MoviesClient;
use crate::error::Result;

impl MoviesClient {
    /// Store a movie, replacing any movie with the same key.
    pub async fn create_item(&self, year: i64, title: &str, info: Value) -> Result<PutItemOutput> {
        let response = self
            .client
            .post(self.url("/create-item"))
            .json(&json!({ "year": year, "title": title, "info": info }))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Get a movie by key.
    pub async fn get_item(&self, year: i64, title: &str) -> Result<GetItemOutput> {
        let response = self
            .client
            .get(self.url("/get-item"))
            .query(&key_query(year, title))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Replace `info.rating`, `info.plot` and `info.actors`.
    pub async fn update_item(
        &self,
        year: i64,
        title: &str,
        rating: Value,
        plot: &str,
        actors: &[String],
    ) -> Result<UpdateItemOutput> {
        let body = json!({
            "year": year,
            "title": title,
            "info": { "rating": rating, "plot": plot, "actors": actors },
        });
        let response = self
            .client
            .post(self.url("/update-item"))
            .json(&body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Add one to `info.rating`.
    pub async fn increment_rating(&self, year: i64, title: &str) -> Result<UpdateItemOutput> {
        let response = self
            .client
            .post(self.url("/increment-rating"))
            .json(&json!({ "year": year, "title": title }))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Remove the first actor when the movie lists at least three.
    pub async fn update_item_conditionally(
        &self,
        year: i64,
        title: &str,
    ) -> Result<UpdateItemOutput> {
        let response = self
            .client
            .post(self.url("/update-item-conditionally"))
            .json(&json!({ "year": year, "title": title }))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete a movie whose rating is at most 8.0.
    pub async fn delete_item(&self, year: i64, title: &str) -> Result<DeleteItemOutput> {
        let response = self
            .client
            .delete(self.url("/delete-item"))
            .query(&key_query(year, title))
            .send()
            .await?;
        self.handle_response(response).await
    }
}

fn key_query(year: i64, title: &str) -> [(&'static str, String); 2] {
    [("year", year.to_string()), ("title", title.to_string())]
}
