use axum::Json;
use movies_core::store::{Operation, OperationOutput};

use super::ApiError;
use crate::state::AppState;

/// Send one descriptor to the store and return its raw result.
pub async fn forward(
    state: &AppState,
    operation: Operation,
) -> Result<Json<OperationOutput>, ApiError> {
    let name = operation.name();
    tracing::debug!(operation = name, table = operation.table_name(), "store call");

    match state.store.send(operation).await {
        Ok(output) => Ok(Json(output)),
        Err(err) => {
            tracing::warn!(operation = name, kind = err.kind(), error = %err, "store call failed");
            Err(err.into())
        }
    }
}
