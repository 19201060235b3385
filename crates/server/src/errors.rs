use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use tracing::{debug, error};

/// JSON error body: `{"statusCode": 404, "error": "Not Found", "message": "..."}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: String,
    pub message: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &str, message: Option<String>) -> Self {
        Self { status, error: error.to_string(), message }
    }

    fn reason(status: StatusCode) -> &'static str {
        status.canonical_reason().unwrap_or("Error")
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let status = match &e {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::IndexOutOfRange { .. } | ServiceError::DateNotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::StoreRead(_) | ServiceError::StoreWrite(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::UpstreamFetch(_) => StatusCode::BAD_GATEWAY,
        };
        if e.is_client_error() {
            debug!(code = e.code(), error = %e, "request rejected");
        } else {
            error!(code = e.code(), error = %e, "request failed");
        }
        JsonApiError::new(status, Self::reason(status), Some(e.to_string()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "statusCode": self.status.as_u16(),
            "error": self.error,
            "message": self.message.unwrap_or_default(),
        });
        (self.status, Json(body)).into_response()
    }
}
