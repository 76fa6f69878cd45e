use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::extractors::{ensure_owner, CurrentUser},
    error::ApiError,
    state::AppState,
};

use super::dto::{PublicUser, UpdateUserRequest};
use super::repo::User;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route(
            "/users/:id",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route("/users/bylogin/:login", get(get_user_by_login))
}

#[instrument(skip(state, _current))]
pub async fn list_users(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
) -> Result<Json<Vec<PublicUser>>, ApiError> {
    let users = User::list(&state.db).await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

#[instrument(skip(state, _current))]
pub async fn get_user(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<PublicUser>, ApiError> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, _current))]
pub async fn get_user_by_login(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
    Path(login): Path<String>,
) -> Result<Json<PublicUser>, ApiError> {
    let user = User::find_by_login(&state.db, &login)
        .await?
        .ok_or(ApiError::NotFound("User"))?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, current, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    ensure_owner(id, &current, "Cannot modify another user")?;

    let user = User::update_partial(&state.db, id, payload.score, payload.is_onboarded)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    info!(user_id = %user.id, "user updated");
    Ok(Json(user.into()))
}

#[instrument(skip(state, current))]
pub async fn delete_user(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ensure_owner(id, &current, "Cannot delete another user")?;

    if !User::delete(&state.db, id).await? {
        return Err(ApiError::NotFound("User"));
    }

    info!(user_id = %id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}
