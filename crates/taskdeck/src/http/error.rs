use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use taskdeck_app::ServiceError;
use tracing::error;

/// Service failure rendered as `{"error": "..."}`.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub ServiceError);

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            ServiceError::Validation(_) | ServiceError::Conflict(_) => StatusCode::BAD_REQUEST,
            ServiceError::Repository(_) | ServiceError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }
        error_body(status, &self.0.to_string())
    }
}

/// JSON error envelope shared by every non-2xx response.
pub fn error_body(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(json!({ "error": message }))
}

pub fn not_found(what: &str, id: i64) -> HttpResponse {
    error_body(StatusCode::NOT_FOUND, &format!("{what} with ID {id} not found"))
}
