use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;
use uuid::Uuid;

use super::jwt::JwtKeys;
use crate::{error::ApiError, state::AppState, users::repo::User};

/// Resolves the bearer token on a request into the stored identity behind it.
///
/// Rejects with 401 when the header is missing, the scheme is wrong, the
/// token fails verification, or the claimed login no longer exists (the
/// account may have been deleted after the token was issued).
#[derive(Debug)]
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(ApiError::Unauthenticated)?;

        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or(ApiError::Unauthenticated)?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token)?;

        let user = User::find_by_login(&state.db, &claims.sub)
            .await?
            .ok_or_else(|| {
                warn!(login = %claims.sub, "token subject no longer exists");
                ApiError::Unauthenticated
            })?;

        Ok(CurrentUser(user))
    }
}

/// Ownership check: the caller must be the owner of the resource.
pub fn ensure_owner(owner_id: Uuid, caller: &User, detail: &'static str) -> Result<(), ApiError> {
    if owner_id == caller.id {
        Ok(())
    } else {
        Err(ApiError::Forbidden(detail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, Request};
    use time::macros::date;
    use time::OffsetDateTime;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/drugs");
        if let Some(v) = value {
            builder = builder.header(header::AUTHORIZATION, v);
        }
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        parts
    }

    fn test_user(id: Uuid) -> User {
        User {
            id,
            login: "alice".into(),
            password_hash: "hash".into(),
            name: "Alice".into(),
            height: 170.0,
            weight: 60.0,
            birth_date: date!(1990 - 01 - 15),
            score: 0.0,
            is_onboarded: false,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[tokio::test]
    async fn missing_header_is_unauthenticated() {
        let state = AppState::fake();
        let mut parts = parts_with_auth(None);
        let err = CurrentUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn wrong_scheme_is_unauthenticated() {
        let state = AppState::fake();
        let mut parts = parts_with_auth(Some("Basic YWxpY2U6cHc="));
        let err = CurrentUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn garbage_token_is_unauthenticated() {
        let state = AppState::fake();
        let mut parts = parts_with_auth(Some("Bearer garbage"));
        let err = CurrentUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[test]
    fn owner_match_is_authorized() {
        let id = Uuid::new_v4();
        let caller = test_user(id);
        assert!(ensure_owner(id, &caller, "Not your drug").is_ok());
    }

    #[test]
    fn owner_mismatch_is_forbidden() {
        let caller = test_user(Uuid::new_v4());
        let err = ensure_owner(Uuid::new_v4(), &caller, "Not your drug").unwrap_err();
        assert!(matches!(err, ApiError::Forbidden("Not your drug")));
    }
}
