use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

use redline_engine::EngineError;
use redline_store::StoreError;

/// Errors from server startup and configuration.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// An engine failure rendered as an HTTP response.
///
/// Status mapping, one per failure class: absent state is 404, caller
/// mistakes (bad name, bad range) are 400, a busy pair slot is 409, and
/// corrupt persisted state or backend I/O is 500. The body is always
/// `{"error": <message>}`.
#[derive(Debug)]
pub struct ApiError(pub EngineError);

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            EngineError::NotFound(_) => StatusCode::NOT_FOUND,
            EngineError::InvalidRange(_) | EngineError::InvalidName { .. } => {
                StatusCode::BAD_REQUEST
            }
            EngineError::Conflict(_) => StatusCode::CONFLICT,
            // The store validates raw document names on the audit surface.
            EngineError::Store(StoreError::InvalidName { .. }) => StatusCode::BAD_REQUEST,
            EngineError::Serialization { .. } | EngineError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redline_types::RangeError;

    fn status_of(err: EngineError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn status_mapping_per_failure_class() {
        assert_eq!(
            status_of(EngineError::NotFound("svc/current.md".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(EngineError::InvalidRange(RangeError::EmptyBlock)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(EngineError::InvalidName {
                name: "a/b".into(),
                reason: "separator".into()
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(EngineError::Conflict("svc".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(EngineError::Store(StoreError::InvalidName {
                name: "../x".into(),
                reason: "dot path".into()
            })),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(EngineError::Store(StoreError::Io(std::io::Error::other(
                "disk gone"
            )))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
