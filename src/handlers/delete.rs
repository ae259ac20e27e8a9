use crate::error::{parse_id, ApiError};
use crate::models::MessageResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, Json};

pub const TODO_DELETED: &str = "Todo deleted successfully";

/// DELETE /todos/{id} handler - Remove a todo
#[utoipa::path(
    delete,
    path = routes::TODO_ITEM,
    params(
        ("id" = String, Path, description = "UUID of the todo")
    ),
    responses(
        (status = 200, description = "Todo deleted", body = MessageResponse),
        (status = 404, description = "Todo not found", body = MessageResponse),
        (status = 500, description = "Malformed id or database error", body = MessageResponse)
    ),
    tag = "todos"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id_str)?;

    if !state.store.delete(id).await? {
        return Err(ApiError::TodoNotFound(id));
    }

    tracing::info!("Successfully deleted todo with id: {}", id);
    Ok(Json(MessageResponse::new(TODO_DELETED)))
}
