use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

/// A stored todo item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Validated, writable fields of a todo
#[derive(Debug, Clone, PartialEq)]
pub struct TodoFields {
    pub title: String,
    pub description: Option<String>,
}

impl TodoFields {
    /// Reject a missing or empty title before anything reaches the store
    pub fn validate(title: Option<String>, description: Option<String>) -> Result<Self, ApiError> {
        match title {
            Some(title) if !title.is_empty() => Ok(Self { title, description }),
            _ => Err(ApiError::Validation(
                "Todo validation failed: title is required".to_string(),
            )),
        }
    }

    pub fn into_todo(self, id: Uuid) -> Todo {
        Todo {
            id,
            title: self.title,
            description: self.description,
        }
    }
}

/// Request body for POST /todos
#[derive(Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Request body for PUT /todos/{id}
///
/// Both fields replace the stored values; an absent description clears it.
#[derive(Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Plain `{message}` body used for confirmations and errors
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of GET /health; `error` is only present when the store check failed
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthResponse {
    pub fn from_check(check: anyhow::Result<()>) -> Self {
        match check {
            Ok(()) => Self {
                status: "healthy".to_string(),
                error: None,
            },
            Err(err) => Self {
                status: "unhealthy".to_string(),
                error: Some(format!("Cannot connect to database: {:#}", err)),
            },
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.error.is_none()
    }
}
