use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::extract::{ConnectInfo, State};

use crate::backend;
use crate::error::ApiError;
use crate::handlers::gate;
use crate::metrics::{REQUEST_LATENCY, REQUEST_TOTAL};
use crate::models::{EmailRequest, LoginRequest, MessageResponse, SessionResponse};
use crate::state::AppState;

pub async fn login(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    REQUEST_TOTAL.inc();
    let start_time = Instant::now();

    // Both the source address and the target account must be under limit
    gate(&state, format!("login:ip:{}", addr.ip()), state.auth_limits).await?;
    gate(
        &state,
        format!("login:email:{}", body.email),
        state.auth_limits,
    )
    .await?;

    let session = backend::sign_in(&state, &body).await?;

    tracing::info!("Login succeeded for {}", body.email);
    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());

    Ok(Json(session))
}

pub async fn password_reset(
    State(state): State<Arc<AppState>>,
    Json(body): Json<EmailRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    REQUEST_TOTAL.inc();

    gate(
        &state,
        format!("reset:email:{}", body.email),
        state.email_limits,
    )
    .await?;

    backend::send_password_reset(&state, &body.email).await?;

    Ok(Json(MessageResponse {
        message: "If an account exists for that address, a reset email has been sent.".to_string(),
    }))
}

pub async fn magic_link(
    State(state): State<Arc<AppState>>,
    Json(body): Json<EmailRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    REQUEST_TOTAL.inc();

    gate(
        &state,
        format!("magic-link:email:{}", body.email),
        state.email_limits,
    )
    .await?;

    backend::send_magic_link(&state, &body.email).await?;

    Ok(Json(MessageResponse {
        message: "If an account exists for that address, a sign-in link has been sent.".to_string(),
    }))
}
