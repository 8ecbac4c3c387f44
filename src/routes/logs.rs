use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    models::{
        auth::AuthenticatedUser,
        baby::Baby,
        logs::{
            CreateActivityLogRequest, CreateDiaperLogRequest, CreateFeedingLogRequest,
            CreateGrowthLogRequest, CreateSleepLogRequest,
        },
    },
    services::{babies::BabyService, logs::LogService},
    AppState,
};

type ApiError = (StatusCode, Json<Value>);

fn internal(e: anyhow::Error) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}

fn not_found() -> ApiError {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Baby not found" })))
}

/// Every log route is scoped to a baby the caller owns.
async fn owned_baby(state: &AppState, baby_id: Uuid, user: &AuthenticatedUser) -> Result<Baby, ApiError> {
    BabyService::get_owned(&state.db, baby_id, user.user_id)
        .await
        .map_err(internal)?
        .ok_or_else(not_found)
}

// ── Sleep ───────────────────────────────────────────────────────────────

pub async fn list_sleep(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(baby_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    owned_baby(&state, baby_id, &user).await?;
    LogService::list_sleep(&state.db, baby_id)
        .await
        .map(|logs| Json(serde_json::to_value(logs).unwrap()))
        .map_err(internal)
}

pub async fn log_sleep(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(baby_id): Path<Uuid>,
    Json(body): Json<CreateSleepLogRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    owned_baby(&state, baby_id, &user).await?;
    LogService::add_sleep(&state.db, baby_id, &body)
        .await
        .map(|log| (StatusCode::CREATED, Json(serde_json::to_value(log).unwrap())))
        .map_err(internal)
}

pub async fn delete_sleep(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path((baby_id, log_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    owned_baby(&state, baby_id, &user).await?;
    match LogService::delete_sleep(&state.db, baby_id, log_id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err((StatusCode::NOT_FOUND, Json(json!({ "error": "Log not found" })))),
        Err(e) => Err(internal(e)),
    }
}

// ── Feeding ─────────────────────────────────────────────────────────────

pub async fn list_feeding(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(baby_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    owned_baby(&state, baby_id, &user).await?;
    LogService::list_feeding(&state.db, baby_id)
        .await
        .map(|logs| Json(serde_json::to_value(logs).unwrap()))
        .map_err(internal)
}

pub async fn log_feeding(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(baby_id): Path<Uuid>,
    Json(body): Json<CreateFeedingLogRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    owned_baby(&state, baby_id, &user).await?;
    LogService::add_feeding(&state.db, baby_id, &body)
        .await
        .map(|log| (StatusCode::CREATED, Json(serde_json::to_value(log).unwrap())))
        .map_err(internal)
}

pub async fn delete_feeding(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path((baby_id, log_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    owned_baby(&state, baby_id, &user).await?;
    match LogService::delete_feeding(&state.db, baby_id, log_id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err((StatusCode::NOT_FOUND, Json(json!({ "error": "Log not found" })))),
        Err(e) => Err(internal(e)),
    }
}

// ── Diapers ─────────────────────────────────────────────────────────────

pub async fn list_diapers(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(baby_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    owned_baby(&state, baby_id, &user).await?;
    LogService::list_diapers(&state.db, baby_id)
        .await
        .map(|logs| Json(serde_json::to_value(logs).unwrap()))
        .map_err(internal)
}

pub async fn log_diaper(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(baby_id): Path<Uuid>,
    Json(body): Json<CreateDiaperLogRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    owned_baby(&state, baby_id, &user).await?;
    LogService::add_diaper(&state.db, baby_id, &body)
        .await
        .map(|log| (StatusCode::CREATED, Json(serde_json::to_value(log).unwrap())))
        .map_err(internal)
}

pub async fn delete_diaper(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path((baby_id, log_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    owned_baby(&state, baby_id, &user).await?;
    match LogService::delete_diaper(&state.db, baby_id, log_id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err((StatusCode::NOT_FOUND, Json(json!({ "error": "Log not found" })))),
        Err(e) => Err(internal(e)),
    }
}

// ── Activities ──────────────────────────────────────────────────────────

pub async fn list_activity_logs(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(baby_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    owned_baby(&state, baby_id, &user).await?;
    LogService::list_activities(&state.db, baby_id)
        .await
        .map(|logs| Json(serde_json::to_value(logs).unwrap()))
        .map_err(internal)
}

pub async fn log_activity(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(baby_id): Path<Uuid>,
    Json(body): Json<CreateActivityLogRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    owned_baby(&state, baby_id, &user).await?;
    LogService::add_activity(&state.db, baby_id, &body)
        .await
        .map(|log| (StatusCode::CREATED, Json(serde_json::to_value(log).unwrap())))
        .map_err(internal)
}

pub async fn delete_activity_log(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path((baby_id, log_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    owned_baby(&state, baby_id, &user).await?;
    match LogService::delete_activity(&state.db, baby_id, log_id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err((StatusCode::NOT_FOUND, Json(json!({ "error": "Log not found" })))),
        Err(e) => Err(internal(e)),
    }
}

// ── Growth ──────────────────────────────────────────────────────────────

pub async fn list_growth(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(baby_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    owned_baby(&state, baby_id, &user).await?;
    LogService::list_growth(&state.db, baby_id)
        .await
        .map(|logs| Json(serde_json::to_value(logs).unwrap()))
        .map_err(internal)
}

pub async fn log_growth(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(baby_id): Path<Uuid>,
    Json(body): Json<CreateGrowthLogRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    owned_baby(&state, baby_id, &user).await?;
    LogService::add_growth(&state.db, baby_id, &body)
        .await
        .map(|log| (StatusCode::CREATED, Json(serde_json::to_value(log).unwrap())))
        .map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
        })
}

pub async fn delete_growth(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path((baby_id, log_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    owned_baby(&state, baby_id, &user).await?;
    match LogService::delete_growth(&state.db, baby_id, log_id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err((StatusCode::NOT_FOUND, Json(json!({ "error": "Log not found" })))),
        Err(e) => Err(internal(e)),
    }
}

/// Deltas and WHO percentile estimates for the growth stats cards.
pub async fn growth_summary(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(baby_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let baby = owned_baby(&state, baby_id, &user).await?;
    let logs = LogService::list_growth(&state.db, baby_id)
        .await
        .map_err(internal)?;
    let summary = LogService::growth_summary(&logs, baby.birth_date, baby.gender.as_deref());
    Ok(Json(serde_json::to_value(summary).unwrap()))
}
