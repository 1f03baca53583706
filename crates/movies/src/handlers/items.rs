//! Single-item routes.

use axum::{extract::State, Json};
use movies_core::{
    movies::{self, MovieInput, MovieKeyInput, UpdateInfoInput},
    store::{Operation, OperationOutput},
};

use super::{forward, ApiError, Params, Payload};
use crate::state::AppState;

type Output = Result<Json<OperationOutput>, ApiError>;

/// POST /create-item
pub async fn create_item(
    State(state): State<AppState>,
    Payload(input): Payload<MovieInput>,
) -> Output {
    let year = input.year()?;
    let request = movies::put_movie(year, input.title, input.info);
    forward(&state, Operation::Put(request)).await
}

/// GET /get-item
pub async fn get_item(
    State(state): State<AppState>,
    Params(input): Params<MovieKeyInput>,
) -> Output {
    let key = input.key()?;
    forward(&state, Operation::Get(movies::get_movie(&key))).await
}

/// POST /update-item
pub async fn update_item(
    State(state): State<AppState>,
    Payload(input): Payload<UpdateInfoInput>,
) -> Output {
    let key = input.key()?;
    let request = movies::update_movie_info(
        &key,
        input.info_field("rating"),
        input.info_field("plot"),
        input.info_field("actors"),
    );
    forward(&state, Operation::Update(request)).await
}

/// POST /increment-rating
pub async fn increment_rating(
    State(state): State<AppState>,
    Payload(input): Payload<MovieKeyInput>,
) -> Output {
    let key = input.key()?;
    forward(&state, Operation::Update(movies::increment_rating(&key))).await
}

/// POST /update-item-conditionally
///
/// Drops the first actor, only when the movie lists at least three.
pub async fn update_item_conditionally(
    State(state): State<AppState>,
    Payload(input): Payload<MovieKeyInput>,
) -> Output {
    let key = input.key()?;
    forward(&state, Operation::Update(movies::remove_first_actor(&key))).await
}

/// DELETE /delete-item
///
/// Deletes the movie only when its rating is at most 8.0.
pub async fn delete_item(
    State(state): State<AppState>,
    Params(input): Params<MovieKeyInput>,
) -> Output {
    let key = input.key()?;
    forward(&state, Operation::Delete(movies::delete_movie(&key))).await
}
