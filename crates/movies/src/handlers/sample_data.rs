use axum::{extract::State, Json};
use movies_core::{
    movies::{self, BulkLoadReport, Movie},
    store::put_items,
};

use super::ApiError;
use crate::state::AppState;

/// POST /load-sample-data
///
/// Puts every record of the sample file with bounded concurrency and waits
/// for all of them. Failed records are reported, not fatal.
pub async fn load_sample_data(
    State(state): State<AppState>,
) -> Result<Json<BulkLoadReport>, ApiError> {
    let path = &state.config.sample_data_path;
    let shown = path.display().to_string();

    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ApiError::SampleDataRead {
            path: shown.clone(),
            source,
        })?;
    let records: Vec<Movie> =
        serde_json::from_str(&contents).map_err(|source| ApiError::SampleDataFormat {
            path: shown.clone(),
            source,
        })?;

    tracing::debug!(path = %shown, records = records.len(), "loading sample data");

    let requests = movies::sample_data_requests(&records);
    let results = put_items(
        state.store.as_ref(),
        requests,
        state.config.bulk_load_concurrency,
    )
    .await;

    let report = BulkLoadReport::from_results(&records, &results);
    for failed in &report.failed {
        tracing::warn!(
            year = failed.year,
            title = %failed.title,
            error = %failed.message,
            "sample record not loaded"
        );
    }
    tracing::info!(
        total = report.total,
        succeeded = report.succeeded,
        failed = report.failed.len(),
        "sample data loaded"
    );

    Ok(Json(report))
}
