use serde::{Deserialize, Serialize};

// Login request body
#[derive(Deserialize, Serialize, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// Body for password reset and magic link requests
#[derive(Deserialize, Serialize, Clone)]
pub struct EmailRequest {
    pub email: String,
}

// AI report stub request
#[derive(Deserialize, Serialize, Clone)]
pub struct ReportRequest {
    pub project_id: String,
    #[serde(default)]
    pub prompt: String,
}

// Session issued by the identity service on successful login
#[derive(Deserialize, Serialize, Clone)]
pub struct SessionResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub user: serde_json::Value,
}

// Generic body for flows that must not reveal whether an account exists
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}
