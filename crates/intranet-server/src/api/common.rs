// Common DTOs for the API
//
// These types are shared across multiple API endpoints.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard error response for API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message describing what went wrong.
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// Convert to axum response tuple
    pub fn into_response(self, status: StatusCode) -> (StatusCode, Json<Self>) {
        (status, Json(self))
    }
}

/// Fallback for unknown paths (only reached once authenticated)
pub async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    ErrorResponse::new("Not found").into_response(StatusCode::NOT_FOUND)
}

/// Core error carried out of a handler
#[derive(Debug)]
pub struct ApiError(pub intranet_core::Error);

impl From<intranet_core::Error> for ApiError {
    fn from(err: intranet_core::Error) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            intranet_core::Error::NotFound(_) => StatusCode::NOT_FOUND,
            intranet_core::Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            intranet_core::Error::Conflict(_) => StatusCode::CONFLICT,
            intranet_core::Error::PasswordHash(_) | intranet_core::Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {}", self.0);
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };
        ErrorResponse::new(message)
            .into_response(status)
            .into_response()
    }
}
