use crate::error::{parse_id, ApiError};
use crate::extract::JsonBody;
use crate::models::{MessageResponse, Todo, TodoFields, UpdateTodoRequest};
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, Json};

/// PUT /todos/{id} handler - Replace the title and description of a todo
///
/// Both fields are overwritten; leaving out `description` clears it.
#[utoipa::path(
    put,
    path = routes::TODO_ITEM,
    params(
        ("id" = String, Path, description = "UUID of the todo")
    ),
    request_body = UpdateTodoRequest,
    responses(
        (status = 200, description = "Todo updated", body = Todo),
        (status = 404, description = "Todo not found", body = MessageResponse),
        (status = 500, description = "Malformed id, missing title, malformed body or database error", body = MessageResponse)
    ),
    tag = "todos"
)]
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonBody(request): JsonBody<UpdateTodoRequest>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id_str)?;
    let fields = TodoFields::validate(request.title, request.description)?;

    match state.store.update(id, fields).await? {
        Some(todo) => {
            tracing::info!("Successfully updated todo with id: {}", id);
            Ok(Json(todo))
        }
        None => Err(ApiError::TodoNotFound(id)),
    }
}
