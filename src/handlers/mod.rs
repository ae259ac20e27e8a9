pub mod health;
pub mod create;
pub mod list;
pub mod update;
pub mod delete;

pub use health::health_handler;
pub use create::create_handler;
pub use list::list_handler;
pub use update::update_handler;
pub use delete::delete_handler;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::app::build_router;
    use crate::memory::MemoryStore;
    use crate::models::{Todo, TodoFields};
    use crate::state::AppState;
    use crate::store::TodoStore;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use axum::{body::Body, http::Request, http::StatusCode, Router};
    use serde::de::DeserializeOwned;
    use tower::ServiceExt;
    use uuid::Uuid;

    /// Store whose every call fails, for exercising the 500 paths
    pub struct FailingStore;

    #[async_trait]
    impl TodoStore for FailingStore {
        async fn create(&self, _fields: TodoFields) -> Result<Todo> {
            Err(anyhow!("database unavailable"))
        }

        async fn list(&self) -> Result<Vec<Todo>> {
            Err(anyhow!("database unavailable"))
        }

        async fn update(&self, _id: Uuid, _fields: TodoFields) -> Result<Option<Todo>> {
            Err(anyhow!("database unavailable"))
        }

        async fn delete(&self, _id: Uuid) -> Result<bool> {
            Err(anyhow!("database unavailable"))
        }

        async fn health_check(&self) -> Result<()> {
            Err(anyhow!("database unavailable"))
        }
    }

    pub fn memory_app() -> Router {
        build_router(AppState::new(MemoryStore::new()))
    }

    pub fn failing_app() -> Router {
        build_router(AppState::new(FailingStore))
    }

    /// Send one JSON request through a clone of the router and decode the JSON body
    pub async fn send<T: DeserializeOwned>(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, T) {
        match body {
            Some(json) => {
                let raw = serde_json::to_string(&json).unwrap();
                send_raw(app, method, uri, Some("application/json"), &raw).await
            }
            None => send_raw(app, method, uri, None, "").await,
        }
    }

    /// Like `send`, with full control over the content type and body bytes
    pub async fn send_raw<T: DeserializeOwned>(
        app: &Router,
        method: &str,
        uri: &str,
        content_type: Option<&str>,
        body: &str,
    ) -> (StatusCode, T) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    pub async fn create_todo(app: &Router, title: &str, description: Option<&str>) -> Todo {
        let (status, todo) = send(
            app,
            "POST",
            "/todos",
            Some(serde_json::json!({ "title": title, "description": description })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        todo
    }

    pub async fn list_todos(app: &Router) -> Vec<Todo> {
        let (status, todos) = send(app, "GET", "/todos", None).await;
        assert_eq!(status, StatusCode::OK);
        todos
    }
}
