use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::models::{CreateTodoRequest, MessageResponse, Todo, TodoFields};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// POST /todos handler - Create a todo
#[utoipa::path(
    post,
    path = routes::TODOS,
    request_body = CreateTodoRequest,
    responses(
        (status = 201, description = "Todo created", body = Todo),
        (status = 500, description = "Missing title, malformed body or database error", body = MessageResponse)
    ),
    tag = "todos"
)]
pub async fn create_handler(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateTodoRequest>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let fields = TodoFields::validate(request.title, request.description)?;

    let todo = state.store.create(fields).await?;

    tracing::info!("Successfully created todo with id: {}", todo.id);
    Ok((StatusCode::CREATED, Json(todo)))
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::*;
    use crate::models::{MessageResponse, Todo};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_returns_stored_item() {
        let app = memory_app();

        let (status, todo): (_, Todo) = send(
            &app,
            "POST",
            "/todos",
            Some(json!({ "title": "buy milk", "description": "2 litres" })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(todo.title, "buy milk");
        assert_eq!(todo.description.as_deref(), Some("2 litres"));
        assert_eq!(list_todos(&app).await, vec![todo]);
    }

    #[tokio::test]
    async fn test_create_without_description() {
        let app = memory_app();

        let (status, body): (_, serde_json::Value) =
            send(&app, "POST", "/todos", Some(json!({ "title": "buy milk" }))).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["title"], "buy milk");
        assert!(body["id"].is_string());
        assert!(body.get("description").is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_missing_or_empty_title() {
        let app = memory_app();

        for payload in [json!({ "description": "no title" }), json!({ "title": "" })] {
            let (status, body): (_, MessageResponse) =
                send(&app, "POST", "/todos", Some(payload)).await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert!(body.message.contains("title is required"));
        }

        assert!(list_todos(&app).await.is_empty());
    }

    #[tokio::test]
    async fn test_create_accepts_whitespace_title() {
        let app = memory_app();

        let (status, todo): (_, Todo) =
            send(&app, "POST", "/todos", Some(json!({ "title": "   " }))).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(todo.title, "   ");
    }

    #[tokio::test]
    async fn test_create_without_content_type() {
        let app = memory_app();

        let (status, body): (_, MessageResponse) =
            send_raw(&app, "POST", "/todos", None, r#"{"title":"buy milk"}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.message.starts_with("Invalid request body"));
        assert!(list_todos(&app).await.is_empty());
    }

    #[tokio::test]
    async fn test_create_with_wrongly_typed_title() {
        let app = memory_app();

        let (status, body): (_, MessageResponse) =
            send(&app, "POST", "/todos", Some(json!({ "title": 123 }))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.message.starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn test_create_with_truncated_json() {
        let app = memory_app();

        let (status, body): (_, MessageResponse) = send_raw(
            &app,
            "POST",
            "/todos",
            Some("application/json"),
            r#"{"title": "#,
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.message.starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn test_create_database_error() {
        let app = failing_app();

        let (status, body): (_, MessageResponse) =
            send(&app, "POST", "/todos", Some(json!({ "title": "buy milk" }))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "database unavailable");
    }
}
