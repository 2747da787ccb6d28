use axum::Json;
use axum::response::IntoResponse;

// Health handler
pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "ictus-gateway",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
