use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Todo, TodoFields};
use crate::store::TodoStore;

/// In-process todo store for local runs without Spanner
///
/// Keeps todos in insertion order so listing matches the Spanner store,
/// which orders by commit timestamp.
#[derive(Default)]
pub struct MemoryStore {
    todos: RwLock<Vec<Todo>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn create(&self, fields: TodoFields) -> Result<Todo> {
        let todo = fields.into_todo(Uuid::new_v4());
        self.todos.write().await.push(todo.clone());
        tracing::debug!("Created todo with id: {}", todo.id);
        Ok(todo)
    }

    async fn list(&self) -> Result<Vec<Todo>> {
        Ok(self.todos.read().await.clone())
    }

    async fn update(&self, id: Uuid, fields: TodoFields) -> Result<Option<Todo>> {
        let mut todos = self.todos.write().await;
        let Some(todo) = todos.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        *todo = fields.into_todo(id);
        Ok(Some(todo.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut todos = self.todos.write().await;
        let before = todos.len();
        todos.retain(|t| t.id != id);
        Ok(todos.len() != before)
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str, description: Option<&str>) -> TodoFields {
        TodoFields {
            title: title.to_string(),
            description: description.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let store = MemoryStore::new();
        let a = store.create(fields("a", None)).await.unwrap();
        let b = store.create(fields("b", Some("second"))).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(store.list().await.unwrap(), vec![a, b]);
    }

    #[tokio::test]
    async fn test_update_overwrites_both_fields() {
        let store = MemoryStore::new();
        let todo = store.create(fields("a", Some("old"))).await.unwrap();

        let updated = store.update(todo.id, fields("b", None)).await.unwrap().unwrap();
        assert_eq!(updated.id, todo.id);
        assert_eq!(updated.title, "b");
        assert_eq!(updated.description, None);

        assert!(store.update(Uuid::new_v4(), fields("c", None)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_existence() {
        let store = MemoryStore::new();
        let todo = store.create(fields("a", None)).await.unwrap();

        assert!(store.delete(todo.id).await.unwrap());
        assert!(!store.delete(todo.id).await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }
}
