use crate::models::HealthResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /health handler - 200 while the store answers, 503 otherwise
#[utoipa::path(
    get,
    path = routes::HEALTH,
    responses(
        (status = 200, description = "Store reachable", body = HealthResponse),
        (status = 503, description = "Store unreachable", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let report = HealthResponse::from_check(state.store.health_check().await);

    if report.is_healthy() {
        tracing::debug!("Health check passed");
        (StatusCode::OK, Json(report))
    } else {
        tracing::error!("Health check failed: {}", report.error.as_deref().unwrap_or_default());
        (StatusCode::SERVICE_UNAVAILABLE, Json(report))
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::*;
    use crate::models::HealthResponse;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_healthy_store() {
        let app = memory_app();

        let (status, body): (_, HealthResponse) = send(&app, "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "healthy");
        assert_eq!(body.error, None);
    }

    #[tokio::test]
    async fn test_unreachable_store() {
        let app = failing_app();

        let (status, body): (_, HealthResponse) = send(&app, "GET", "/health", None).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "unhealthy");
        assert!(body.error.unwrap().contains("database unavailable"));
    }
}
