use crate::error::ApiError;
use crate::models::{MessageResponse, Todo};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, Json};

/// GET /todos handler - List every todo
///
/// No filtering or pagination; todos come back oldest first.
#[utoipa::path(
    get,
    path = routes::TODOS,
    responses(
        (status = 200, description = "All todos", body = Vec<Todo>),
        (status = 500, description = "Database error", body = MessageResponse)
    ),
    tag = "todos"
)]
pub async fn list_handler(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state.store.list().await?;

    tracing::info!("Listed {} todos", todos.len());
    Ok(Json(todos))
}
