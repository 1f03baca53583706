//! Health check operations.

use serde::{Deserialize, Serialize};

use super::MoviesClient;
use crate::error::Result;

/// Readiness of the server and its store.
#[derive(Debug, Serialize, Deserialize)]
pub struct Readiness {
    pub healthy: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MoviesClient {
    /// Liveness check. True when the server answers 200.
    pub async fn livez(&self) -> Result<bool> {
        let response = self.client.get(self.url("/livez")).send().await?;
        Ok(response.status().is_success())
    }

    /// Readiness check. A 503 still carries a readiness body.
    pub async fn readyz(&self) -> Result<Readiness> {
        let response = self.client.get(self.url("/readyz")).send().await?;
        Ok(response.json().await?)
    }
}
