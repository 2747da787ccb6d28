use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::extract::{ConnectInfo, State};

use crate::error::ApiError;
use crate::handlers::gate;
use crate::metrics::REQUEST_TOTAL;
use crate::models::{MessageResponse, ReportRequest};
use crate::state::AppState;

// AI report generation is a stub: admission is still rate limited so the
// endpoint cannot be hammered, but no model is wired up behind it.
pub async fn generate_report(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(body): Json<ReportRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    REQUEST_TOTAL.inc();

    gate(
        &state,
        format!("report:ip:{}", addr.ip()),
        state.report_limits,
    )
    .await?;

    tracing::info!("Report stub requested for project {}", body.project_id);

    Err(ApiError::NotImplemented(
        "AI report generation is not available yet".to_string(),
    ))
}
