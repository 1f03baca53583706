use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use movies_core::{
    movies::RequestError,
    store::{store_error_to_status_code, StoreError},
};
use serde_json::json;
use thiserror::Error;

/// Errors returned by route handlers.
///
/// Every variant renders as a `{message}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Request(#[from] RequestError),

    /// The request body or query string could not be decoded.
    #[error("{0}")]
    Body(String),

    #[error("Failed to read sample data from {path}: {source}")]
    SampleDataRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse sample data from {path}: {source}")]
    SampleDataFormat {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Request timed out")]
    Timeout,
}

impl ApiError {
    /// Text of the `{message}` body.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Status used in strict response mode.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Store(err) => StatusCode::from_u16(store_error_to_status_code(err))
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::Request(_) | ApiError::Body(_) => StatusCode::BAD_REQUEST,
            ApiError::SampleDataRead { .. } | ApiError::SampleDataFormat { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
        }
    }
}

/// Marks responses produced from an [`ApiError`].
#[derive(Debug, Clone, Copy)]
pub struct ErrorResponse;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();
        tracing::warn!(status = %status, message = %message, "API error");

        let mut response = (status, Json(json!({ "message": message }))).into_response();
        response.extensions_mut().insert(ErrorResponse);
        response
    }
}

/// Turns the bare 408 of the timeout layer into an [`ApiError::Timeout`]
/// response, so it carries a `{message}` body and the error marker.
pub async fn timeout_error(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT
        && response.extensions().get::<ErrorResponse>().is_none()
    {
        return ApiError::Timeout.into_response();
    }
    response
}

/// Rewrites error statuses to 200, so clients only see the `{message}` body.
pub async fn compat_status(mut response: Response) -> Response {
    if response.extensions().get::<ErrorResponse>().is_some() {
        *response.status_mut() = StatusCode::OK;
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_use_core_mapping() {
        let err = ApiError::from(StoreError::conditional_check_failed());
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "The conditional request failed");
    }

    #[test]
    fn test_request_errors_are_bad_requests() {
        let err = ApiError::from(RequestError::MissingField("year"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_compat_status_only_touches_errors() {
        let error = ApiError::Body("bad".to_string()).into_response();
        assert_eq!(compat_status(error).await.status(), StatusCode::OK);

        let unavailable = StatusCode::SERVICE_UNAVAILABLE.into_response();
        assert_eq!(
            compat_status(unavailable).await.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[tokio::test]
    async fn test_timeout_error_becomes_a_marked_message() {
        let timed_out = timeout_error(StatusCode::REQUEST_TIMEOUT.into_response()).await;
        assert_eq!(timed_out.status(), StatusCode::REQUEST_TIMEOUT);
        assert!(timed_out.extensions().get::<ErrorResponse>().is_some());
        assert_eq!(compat_status(timed_out).await.status(), StatusCode::OK);

        let ok = timeout_error(StatusCode::OK.into_response()).await;
        assert_eq!(ok.status(), StatusCode::OK);
        assert!(ok.extensions().get::<ErrorResponse>().is_none());
    }
}
