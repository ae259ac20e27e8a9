use anyhow::{anyhow, Result};
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Todo, TodoFields};

/// Persistence operations behind the todo handlers
///
/// Implementations own id assignment. Update and delete report a missing id
/// as `None` / `false` rather than as an error.
#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    /// Persist a new todo under a fresh id
    async fn create(&self, fields: TodoFields) -> Result<Todo>;

    /// Every stored todo, oldest first
    async fn list(&self) -> Result<Vec<Todo>>;

    /// Overwrite both fields of an existing todo
    async fn update(&self, id: Uuid, fields: TodoFields) -> Result<Option<Todo>>;

    /// Remove a todo, returning whether it existed
    async fn delete(&self, id: Uuid) -> Result<bool>;

    async fn health_check(&self) -> Result<()>;
}

/// Store served when the startup connection failed; every call reports that failure
pub struct DisconnectedStore {
    reason: String,
}

impl DisconnectedStore {
    pub fn new(err: &anyhow::Error) -> Self {
        Self {
            reason: format!("{:#}", err),
        }
    }

    fn error(&self) -> anyhow::Error {
        anyhow!("Database not connected: {}", self.reason)
    }
}

#[async_trait]
impl TodoStore for DisconnectedStore {
    async fn create(&self, _fields: TodoFields) -> Result<Todo> {
        Err(self.error())
    }

    async fn list(&self) -> Result<Vec<Todo>> {
        Err(self.error())
    }

    async fn update(&self, _id: Uuid, _fields: TodoFields) -> Result<Option<Todo>> {
        Err(self.error())
    }

    async fn delete(&self, _id: Uuid) -> Result<bool> {
        Err(self.error())
    }

    async fn health_check(&self) -> Result<()> {
        Err(self.error())
    }
}
