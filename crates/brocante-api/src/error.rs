// API error taxonomy
//
// Every handler failure funnels through ApiError so the client always
// receives a JSON body of the shape {"message": ...}. Upstream failures
// (store, charge service, blob store) are logged and surfaced without
// internal detail.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing required field or malformed value
    #[error("{0}")]
    BadRequest(String),

    /// Missing or invalid credential. Never distinguishes cause.
    #[error("unauthorized")]
    Unauthorized,

    /// Unknown resource id
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Business-rule violation (duplicate email, price mismatch)
    #[error("{0}")]
    Conflict(String),

    /// Collaborator failure; detail goes to the logs only
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
            ApiError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            ApiError::Upstream(err) => {
                tracing::error!("upstream failure: {err:#}");
                (StatusCode::BAD_REQUEST, "request failed".to_string())
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(ApiError::BadRequest("missing id".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(ApiError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(ApiError::NotFound("offer")), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(ApiError::Conflict("price mismatch".into())),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_upstream_detail_is_not_leaked() {
        let err = ApiError::Upstream(anyhow::anyhow!("connection refused to 10.0.0.7"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
