use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, RegisterRequest, TokenResponse},
        jwt::JwtKeys,
        password::{hash_password, verify_password},
    },
    error::ApiError,
    state::AppState,
    users::{
        dto::PublicUser,
        repo::{NewUser, User},
    },
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub(crate) fn is_valid_login(login: &str) -> bool {
    lazy_static! {
        static ref LOGIN_RE: Regex = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]{2,63}$").unwrap();
    }
    LOGIN_RE.is_match(login)
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    payload.login = payload.login.trim().to_string();

    if !is_valid_login(&payload.login) {
        warn!(login = %payload.login, "invalid login");
        return Err(ApiError::Validation("Invalid login"));
    }
    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::Validation("Password too short"));
    }

    if User::find_by_login(&state.db, &payload.login).await?.is_some() {
        warn!(login = %payload.login, "login already registered");
        return Err(ApiError::Conflict);
    }

    let hash = hash_password(&payload.password)?;
    // A concurrent register with the same login loses on the unique key and
    // surfaces as the same Conflict as the pre-check.
    let user = User::create(
        &state.db,
        NewUser {
            login: &payload.login,
            password_hash: &hash,
            name: &payload.name,
            height: payload.height,
            weight: payload.weight,
            birth_date: payload.birth_date,
            score: payload.score,
            is_onboarded: payload.is_onboarded,
        },
    )
    .await?;

    info!(user_id = %user.id, login = %user.login, "user registered");
    Ok((StatusCode::CREATED, Json(PublicUser::from(user))))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    // Unknown login and wrong password are indistinguishable to the caller.
    let user = match User::find_by_login(&state.db, &payload.login).await? {
        Some(u) => u,
        None => {
            warn!(login = %payload.login, "login unknown");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !verify_password(&payload.password, &user.password_hash) {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign(&user.login, user.id)?;

    info!(user_id = %user.id, login = %user.login, "user logged in");
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_syntax() {
        assert!(is_valid_login("alice"));
        assert!(is_valid_login("alice.b-42_c"));
        assert!(!is_valid_login("al"));
        assert!(!is_valid_login(""));
        assert!(!is_valid_login("-leading-dash"));
        assert!(!is_valid_login("has space"));
        assert!(!is_valid_login(&"x".repeat(65)));
    }
}
