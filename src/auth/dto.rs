use serde::{Deserialize, Serialize};
use time::Date;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub login: String,
    pub password: String,
    pub name: String,
    pub height: f64,
    pub weight: f64,
    pub birth_date: Date,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub is_onboarded: bool,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}
