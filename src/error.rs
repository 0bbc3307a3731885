use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Errors surfaced to HTTP callers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Unauthorized Access")]
    AuthMissing,

    #[error("Invalid token")]
    AuthInvalid,

    #[error("Forbidden Admin Access")]
    AuthzDenied,

    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::AuthMissing => StatusCode::UNAUTHORIZED,
            ApiError::AuthInvalid => StatusCode::BAD_REQUEST,
            ApiError::AuthzDenied => StatusCode::FORBIDDEN,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Upstream(e) => {
                error!(error = ?e, "upstream failure");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}
