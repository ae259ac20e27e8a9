use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::models::MessageResponse;

pub const TODO_NOT_FOUND: &str = "Todo Not Found";

/// Error type for the todo endpoints
///
/// Every variant renders as a `{message}` JSON body and is logged before the
/// response leaves the handler.
#[derive(Debug)]
pub enum ApiError {
    /// No todo stored under this id
    TodoNotFound(Uuid),
    /// Request payload failed validation (missing or empty title)
    Validation(String),
    /// Path id is not a UUID
    InvalidId(String),
    /// Body missing, not JSON, or of the wrong shape
    JsonError(JsonRejection),
    /// Store operation error
    DatabaseError(anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::TodoNotFound(_) => StatusCode::NOT_FOUND,
            // Validation failures keep the 500 of the public contract
            ApiError::Validation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidId(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::JsonError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::TodoNotFound(_) => TODO_NOT_FOUND.to_string(),
            ApiError::Validation(msg) => msg.clone(),
            ApiError::InvalidId(id) => format!("Invalid todo id: '{}'", id),
            ApiError::JsonError(rejection) => format!("Invalid request body: {}", rejection.body_text()),
            ApiError::DatabaseError(err) => format!("{:#}", err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        match &self {
            ApiError::TodoNotFound(id) => tracing::info!("Todo not found with id: {}", id),
            ApiError::Validation(_) | ApiError::JsonError(_) => {
                tracing::warn!("Rejected todo payload: {}", message)
            }
            ApiError::InvalidId(_) | ApiError::DatabaseError(_) => {
                tracing::error!("Request failed: {}", message)
            }
        }

        (status, Json(MessageResponse::new(message))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::JsonError(rejection)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::DatabaseError(err)
    }
}

/// Parse a path id, mapping garbage to `ApiError::InvalidId`
pub fn parse_id(id_str: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id_str).map_err(|_| ApiError::InvalidId(id_str.to_string()))
}
