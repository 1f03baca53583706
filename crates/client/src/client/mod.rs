//! HTTP client for the Movies API.

pub mod health;
pub mod items;
pub mod queries;
pub mod tables;

use serde_json::Value;

use crate::error::{ClientError, Result};

/// HTTP client for the Movies API.
#[derive(Debug, Clone)]
pub struct MoviesClient {
    client: reqwest::Client,
    base_url: String,
}

impl MoviesClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create from environment (MOVIES_URL or default).
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("MOVIES_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());
        Self::new(base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a response, turning both error styles into [`ClientError`].
    ///
    /// The server reports errors either with a non-2xx status or, in its
    /// default mode, as a 200 response whose body is only `{message}`.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .as_ref()
                .and_then(error_message)
                .unwrap_or(text);
            return Err(ClientError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await?;
        if let Some(message) = error_message(&body) {
            return Err(ClientError::Store(message));
        }
        serde_json::from_value(body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

/// The text of an error body: an object whose only field is `message`.
pub fn error_message(body: &Value) -> Option<String> {
    let object = body.as_object()?;
    if object.len() != 1 {
        return None;
    }
    object
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_message_detects_message_only_bodies() {
        let body = json!({ "message": "The conditional request failed" });
        assert_eq!(
            error_message(&body).as_deref(),
            Some("The conditional request failed")
        );
    }

    #[test]
    fn test_error_message_ignores_results() {
        let report = json!({ "message": "Success", "total": 2, "succeeded": 2, "failed": [] });
        assert_eq!(error_message(&report), None);

        let get = json!({ "$metadata": { "httpStatusCode": 200, "attempts": 1, "totalRetryDelay": 0 } });
        assert_eq!(error_message(&get), None);

        assert_eq!(error_message(&json!({ "message": 5 })), None);
        assert_eq!(error_message(&json!([])), None);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = MoviesClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url("/get-item"), "http://localhost:5000/get-item");
    }
}
