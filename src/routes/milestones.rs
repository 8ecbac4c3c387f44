use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    catalog::age_in_months,
    models::auth::AuthenticatedUser,
    services::{babies::BabyService, milestones::MilestoneService},
    AppState,
};

/// Milestone checklist grouped by age bucket for one baby.
pub async fn overview(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(baby_id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let baby = BabyService::get_owned(&state.db, baby_id, user.user_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        })?
        .ok_or((StatusCode::NOT_FOUND, Json(json!({ "error": "Baby not found" }))))?;

    let age = age_in_months(baby.birth_date, Utc::now().date_naive());
    MilestoneService::overview(&state.db, baby_id, age)
        .await
        .map(|o| Json(serde_json::to_value(o).unwrap()))
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        })
}

/// Toggle an achievement on/off. Toggling twice restores the original state.
pub async fn toggle(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path((baby_id, milestone_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    BabyService::get_owned(&state.db, baby_id, user.user_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        })?
        .ok_or((StatusCode::NOT_FOUND, Json(json!({ "error": "Baby not found" }))))?;

    match MilestoneService::toggle(&state.db, baby_id, milestone_id).await {
        Ok(Some(result)) => Ok(Json(serde_json::to_value(result).unwrap())),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Milestone not found" })),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}
