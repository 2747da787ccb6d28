mod backend;
mod config;
mod error;
mod handlers;
mod metrics;
mod models;
mod rate_limit;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Args;
use crate::metrics::LIMITER_KEYS;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ictus_gateway=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse cli arguments
    let args = Args::parse();

    // Creating shared state
    let state = Arc::new(AppState::from_args(&args));

    // Periodic sweep of stale limiter entries
    let sweep_state = state.clone();
    let sweep_interval = Duration::from_secs(args.sweep_interval.max(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_interval);
        loop {
            interval.tick().await;
            let remaining = sweep_state.limiter.sweep();
            LIMITER_KEYS.set(remaining as f64);
        }
    });

    // Creating the router with routes
    let app = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/reset", post(handlers::password_reset))
        .route("/api/auth/magic-link", post(handlers::magic_link))
        .route("/api/reports/generate", post(handlers::generate_report))
        .with_state(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Gateway running on http://localhost:{}", args.port);
    tracing::info!("Forwarding auth traffic to {}", args.backend_url);
    tracing::info!(
        "Login limit: {}/{}s, email limit: {}/{}s, report limit: {}/{}s",
        args.auth_limit,
        args.auth_window,
        args.email_limit,
        args.email_window,
        args.report_limit,
        args.report_window
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
