use axum::{
    extract::{
        multipart::MultipartError,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use serde_json::json;
use tracing::error;

/// Domain failure rendered as `{"success": false, "message": ...}`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::ValidationError(_) | DomainError::EmailAlreadyExists(_) => {
                StatusCode::BAD_REQUEST
            }
            DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
            DomainError::ProjectNotFound(_) | DomainError::UserNotFound(_) => StatusCode::NOT_FOUND,
            DomainError::UpstreamFailure(_) => StatusCode::BAD_GATEWAY,
            DomainError::QueryFailure(_) | DomainError::WriteFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError(e)
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        ApiError(DomainError::ValidationError(format!("Malformed form data: {}", e)))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError(DomainError::ValidationError(format!(
            "Invalid request body: {}",
            e.body_text()
        )))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        ApiError(DomainError::ValidationError(format!(
            "Invalid query string: {}",
            e.body_text()
        )))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }

        let body = Json(json!({
            "success": false,
            "message": self.0.user_message(),
        }));
        (status, body).into_response()
    }
}
