use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    catalog::age_in_months,
    models::{auth::AuthenticatedUser, baby::Baby},
    services::{
        activities::{ActivityService, CompleteActivityRequest},
        babies::BabyService,
    },
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct LibraryQuery {
    pub category: Option<String>,
}

async fn owned_baby(
    state: &AppState,
    baby_id: Uuid,
    user: &AuthenticatedUser,
) -> Result<Baby, (StatusCode, Json<Value>)> {
    BabyService::get_owned(&state.db, baby_id, user.user_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        })?
        .ok_or((StatusCode::NOT_FOUND, Json(json!({ "error": "Baby not found" }))))
}

/// Age-appropriate slice of the activity library, optionally narrowed to
/// one category.
pub async fn library(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(baby_id): Path<Uuid>,
    Query(query): Query<LibraryQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let baby = owned_baby(&state, baby_id, &user).await?;
    let age = age_in_months(baby.birth_date, Utc::now().date_naive());

    ActivityService::library(&state.db, baby_id, age, query.category.as_deref())
        .await
        .map(|lib| Json(serde_json::to_value(lib).unwrap()))
        .map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
        })
}

/// Random pick from the filtered set; `activity` is null when nothing fits.
pub async fn surprise(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(baby_id): Path<Uuid>,
    Query(query): Query<LibraryQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let baby = owned_baby(&state, baby_id, &user).await?;
    let age = age_in_months(baby.birth_date, Utc::now().date_naive());

    let picked = ActivityService::surprise(age, query.category.as_deref());
    Ok(Json(json!({ "activity": picked })))
}

/// Log a finished library activity into the baby's activity history.
pub async fn complete(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(baby_id): Path<Uuid>,
    Json(body): Json<CompleteActivityRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    owned_baby(&state, baby_id, &user).await?;

    match ActivityService::complete(&state.db, baby_id, &body).await {
        Ok(Some(log)) => Ok((StatusCode::CREATED, Json(serde_json::to_value(log).unwrap()))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Activity not found" })),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}
