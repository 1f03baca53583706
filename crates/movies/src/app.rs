use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::ResponseMode,
    handlers::{
        error::{compat_status, timeout_error},
        health::{livez, readyz},
        items::{
            create_item, delete_item, get_item, increment_rating, update_item,
            update_item_conditionally,
        },
        queries::{query_movies_by_year, query_movies_by_year_and_title, scan_movies},
        sample_data::load_sample_data,
        tables::create_table,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let mut api = Router::new()
        .route("/create-table", post(create_table))
        .route("/load-sample-data", post(load_sample_data))
        .route("/create-item", post(create_item))
        .route("/get-item", get(get_item))
        .route("/update-item", post(update_item))
        .route("/increment-rating", post(increment_rating))
        .route("/update-item-conditionally", post(update_item_conditionally))
        .route("/delete-item", delete(delete_item))
        .route("/query-movies-by-year", get(query_movies_by_year))
        .route(
            "/query-movies-by-year-and-title",
            get(query_movies_by_year_and_title),
        )
        .route("/scan-movies", get(scan_movies));

    // Health routes stay outside the compat layer so `/readyz` keeps its 503.
    let mut health = Router::new()
        .route("/livez", get(livez))
        .route("/readyz", get(readyz));

    if let Some(timeout) = state.config.request_timeout {
        api = with_timeout(api, timeout);
        health = with_timeout(health, timeout);
    }

    api = api.layer(cors);
    if state.config.response_mode == ResponseMode::Compat {
        api = api.layer(middleware::map_response(compat_status));
    }

    api.merge(health)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bound request time. Timeouts answer with an [`ApiError`] body, inside
/// the compat layer when there is one.
///
/// [`ApiError`]: crate::handlers::ApiError
fn with_timeout<S>(router: Router<S>, timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(middleware::map_response(timeout_error))
}
