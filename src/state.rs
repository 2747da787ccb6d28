use std::time::Duration;

use crate::config::Args;
use crate::rate_limit::RateLimiter;

// Admission settings for one class of endpoint
#[derive(Clone, Copy)]
pub struct LimitSettings {
    pub limit: u32,
    pub window: Duration,
}

// App's shared state
pub struct AppState {
    pub client: reqwest::Client,
    pub backend_url: String,
    pub service_key: String,
    pub limiter: RateLimiter,
    pub auth_limits: LimitSettings,
    pub email_limits: LimitSettings,
    pub report_limits: LimitSettings,
}

impl AppState {
    pub fn from_args(args: &Args) -> Self {
        Self {
            client: reqwest::Client::new(),
            backend_url: args.backend_url.trim_end_matches('/').to_string(),
            service_key: args.service_key.clone(),
            limiter: RateLimiter::new(),
            auth_limits: LimitSettings {
                limit: args.auth_limit,
                window: Duration::from_secs(args.auth_window),
            },
            email_limits: LimitSettings {
                limit: args.email_limit,
                window: Duration::from_secs(args.email_window),
            },
            report_limits: LimitSettings {
                limit: args.report_limit,
                window: Duration::from_secs(args.report_window),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn backend_url_trailing_slash_is_trimmed() {
        let args = Args::parse_from(["ictus-gateway", "--backend-url", "http://backend:54321/"]);
        let state = AppState::from_args(&args);
        assert_eq!(state.backend_url, "http://backend:54321");
    }
}
