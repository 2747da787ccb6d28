mod auth;
mod health;
mod metrics;
mod reports;

pub use auth::{login, magic_link, password_reset};
pub use health::health_handler;
pub use metrics::metrics_handler;
pub use reports::generate_report;

use crate::error::ApiError;
use crate::metrics::RATE_LIMITED_TOTAL;
use crate::state::{AppState, LimitSettings};

// Runs one limiter check and turns a denial into a 429
pub(crate) async fn gate(
    state: &AppState,
    key: String,
    limits: LimitSettings,
) -> Result<(), ApiError> {
    let decision = state.limiter.check(&key, limits.limit, limits.window).await;

    if !decision.allowed {
        RATE_LIMITED_TOTAL.inc();
        tracing::warn!("Rate limit hit for {}", key);
        return Err(ApiError::RateLimited {
            reset_in: decision.reset_in.unwrap_or_default(),
        });
    }

    Ok(())
}
