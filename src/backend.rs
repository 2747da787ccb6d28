use crate::error::ApiError;
use crate::models::{LoginRequest, SessionResponse};
use crate::state::AppState;

// Thin client for the hosted identity service. The gateway only gates
// admission; authentication itself happens over there.

pub async fn sign_in(state: &AppState, body: &LoginRequest) -> Result<SessionResponse, ApiError> {
    let result = state
        .client
        .post(format!(
            "{}/auth/v1/token?grant_type=password",
            state.backend_url
        ))
        .header("apikey", &state.service_key)
        .json(body)
        .send()
        .await;

    match result {
        Ok(res) if res.status().is_success() => res
            .json::<SessionResponse>()
            .await
            .map_err(|e| ApiError::Upstream(format!("Parse error: {}", e))),
        // The identity service answers 400/401 for bad credentials; collapse
        // both so the response never reveals whether the account exists
        Ok(res) if res.status().as_u16() == 400 || res.status().as_u16() == 401 => {
            Err(ApiError::Auth("Invalid credentials".to_string()))
        }
        Ok(res) => Err(ApiError::Upstream(format!(
            "Identity service returned {}",
            res.status()
        ))),
        Err(e) => Err(ApiError::Upstream(format!("Request failed: {}", e))),
    }
}

pub async fn send_password_reset(state: &AppState, email: &str) -> Result<(), ApiError> {
    dispatch_email(state, "/auth/v1/recover", email).await
}

pub async fn send_magic_link(state: &AppState, email: &str) -> Result<(), ApiError> {
    dispatch_email(state, "/auth/v1/magiclink", email).await
}

async fn dispatch_email(state: &AppState, path: &str, email: &str) -> Result<(), ApiError> {
    let result = state
        .client
        .post(format!("{}{}", state.backend_url, path))
        .header("apikey", &state.service_key)
        .json(&serde_json::json!({ "email": email }))
        .send()
        .await;

    match result {
        Ok(res) if res.status().is_success() => Ok(()),
        Ok(res) => Err(ApiError::Upstream(format!(
            "Identity service returned {}",
            res.status()
        ))),
        Err(e) => Err(ApiError::Upstream(format!("Request failed: {}", e))),
    }
}
