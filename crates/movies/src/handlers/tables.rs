use axum::{extract::State, Json};
use movies_core::{
    movies,
    store::{Operation, OperationOutput},
};

use super::{forward, ApiError};
use crate::state::AppState;

/// POST /create-table
pub async fn create_table(
    State(state): State<AppState>,
) -> Result<Json<OperationOutput>, ApiError> {
    forward(&state, Operation::CreateTable(movies::create_table())).await
}
