//! Moodcast Server
//!
//! HTTP endpoints for the mood/persona engine and the conversational funnel.

pub mod http;
pub mod metrics;
pub mod state;

pub use http::create_router;
pub use metrics::{
    init_metrics, record_funnel_message, record_hook_selection, record_mood_generated,
    record_objection,
};
pub use state::AppState;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ServerError> for StatusCode {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Unknown forced selectors are the caller's to fix; anything else is ours.
impl From<moodcast_core::Error> for ServerError {
    fn from(err: moodcast_core::Error) -> Self {
        if err.is_configuration() {
            ServerError::InvalidRequest(err.to_string())
        } else {
            ServerError::Internal(err.to_string())
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        if matches!(self, ServerError::Internal(_)) {
            tracing::error!(error = %message, "Request failed");
        }
        let status: StatusCode = self.into();
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let status: StatusCode = ServerError::NotFound("user".into()).into();
        assert_eq!(status, StatusCode::NOT_FOUND);

        let err: ServerError = moodcast_core::Error::Configuration("unknown category".into()).into();
        assert!(matches!(err, ServerError::InvalidRequest(_)));
        let status: StatusCode = err.into();
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let err: ServerError = moodcast_core::Error::Store("down".into()).into();
        let status: StatusCode = err.into();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
