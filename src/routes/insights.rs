use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    models::auth::AuthenticatedUser,
    services::{babies::BabyService, insights::InsightsService},
    AppState,
};

/// Aggregate stats and age-keyed guidance for one baby. Read-only.
pub async fn for_baby(
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

    InsightsService::for_baby(&state.db, &baby)
        .await
        .map(|report| Json(serde_json::to_value(report).unwrap()))
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        })
}
