use axum::{
    extract::{Path, Query, State},
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

use super::dto::{CreateDrugRequest, DrugResponse, ListDrugsQuery, UpdateDrugRequest};
use super::repo::{Drug, NewDrug};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/drugs", get(list_drugs).post(create_drug))
        .route(
            "/drugs/:id",
            get(get_drug).patch(update_drug).delete(delete_drug),
        )
}

#[instrument(skip(state, current, payload))]
pub async fn create_drug(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Json(payload): Json<CreateDrugRequest>,
) -> Result<(StatusCode, Json<DrugResponse>), ApiError> {
    ensure_owner(
        payload.user_uuid,
        &current,
        "Cannot create drug for another user",
    )?;

    let drug = Drug::create(
        &state.db,
        NewDrug {
            user_id: payload.user_uuid,
            name: &payload.name,
            dosage: &payload.dosage,
            date_from: payload.date_from,
            date_to: payload.date_to,
            additional_info: payload.additional_info.as_deref(),
            times: &payload.times,
            is_notification_enabled: payload.is_notification_enabled,
        },
    )
    .await?;

    info!(drug_id = %drug.id, user_id = %drug.user_id, "drug created");
    Ok((StatusCode::CREATED, Json(drug.into())))
}

#[instrument(skip(state, current))]
pub async fn list_drugs(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Query(query): Query<ListDrugsQuery>,
) -> Result<Json<Vec<DrugResponse>>, ApiError> {
    ensure_owner(query.user_uuid, &current, "Cannot list drugs for another user")?;

    let drugs = Drug::list_by_user(&state.db, query.user_uuid).await?;
    Ok(Json(drugs.into_iter().map(DrugResponse::from).collect()))
}

#[instrument(skip(state, current))]
pub async fn get_drug(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DrugResponse>, ApiError> {
    let drug = Drug::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Drug"))?;
    ensure_owner(drug.user_id, &current, "Not your drug")?;

    Ok(Json(drug.into()))
}

#[instrument(skip(state, current, payload))]
pub async fn update_drug(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDrugRequest>,
) -> Result<Json<DrugResponse>, ApiError> {
    let drug = Drug::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Drug"))?;
    ensure_owner(drug.user_id, &current, "Not your drug")?;

    let updated = Drug::update_partial(&state.db, id, &payload)
        .await?
        .ok_or(ApiError::NotFound("Drug"))?;

    info!(drug_id = %id, "drug updated");
    Ok(Json(updated.into()))
}

#[instrument(skip(state, current))]
pub async fn delete_drug(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let drug = Drug::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Drug"))?;
    ensure_owner(drug.user_id, &current, "Not your drug")?;

    if !Drug::delete(&state.db, id).await? {
        return Err(ApiError::NotFound("Drug"));
    }

    info!(drug_id = %id, "drug deleted");
    Ok(StatusCode::NO_CONTENT)
}
