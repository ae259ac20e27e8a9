use utoipa::OpenApi;

use crate::handlers;
use crate::models::{CreateTodoRequest, HealthResponse, MessageResponse, Todo, UpdateTodoRequest};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "rust-spanner-todos API",
        version = "1.0.0",
        description = "A todo list service backed by Google Cloud Spanner"
    ),
    paths(
        handlers::health::health_handler,
        handlers::create::create_handler,
        handlers::list::list_handler,
        handlers::update::update_handler,
        handlers::delete::delete_handler
    ),
    components(
        schemas(
            Todo,
            CreateTodoRequest,
            UpdateTodoRequest,
            MessageResponse,
            HealthResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "todos", description = "Todo item operations")
    )
)]
pub struct ApiDoc;
