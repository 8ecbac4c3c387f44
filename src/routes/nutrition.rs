use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    catalog::{age_in_months, nutrition},
    models::auth::AuthenticatedUser,
    services::babies::BabyService,
    AppState,
};

/// All feeding stages plus which one the baby is currently in.
pub async fn stages(
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
    Ok(Json(json!({
        "baby_age_months": age,
        "current_stage_id": nutrition::current_stage_id(age),
        "stages": nutrition::STAGES,
    })))
}
