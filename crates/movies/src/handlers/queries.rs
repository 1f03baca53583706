use axum::{extract::State, Json};
use movies_core::{
    movies::{self, YearQuery, YearRangeQuery, YearTitleRangeQuery},
    store::{Operation, OperationOutput},
};

use super::{forward, ApiError, Params};
use crate::state::AppState;

/// GET /query-movies-by-year
pub async fn query_movies_by_year(
    State(state): State<AppState>,
    Params(input): Params<YearQuery>,
) -> Result<Json<OperationOutput>, ApiError> {
    let year = input.year()?;
    forward(&state, Operation::Query(movies::query_by_year(year))).await
}

/// GET /query-movies-by-year-and-title
pub async fn query_movies_by_year_and_title(
    State(state): State<AppState>,
    Params(input): Params<YearTitleRangeQuery>,
) -> Result<Json<OperationOutput>, ApiError> {
    let year = input.year()?;
    let request = movies::query_by_year_and_title(year, input.letter1, input.letter2);
    forward(&state, Operation::Query(request)).await
}

/// GET /scan-movies
pub async fn scan_movies(
    State(state): State<AppState>,
    Params(input): Params<YearRangeQuery>,
) -> Result<Json<OperationOutput>, ApiError> {
    let (start, end) = input.years()?;
    forward(&state, Operation::Scan(movies::scan_years(start, end))).await
}
