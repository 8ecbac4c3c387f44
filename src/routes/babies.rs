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
        baby::{CreateBabyRequest, UpdateBabyRequest},
    },
    services::babies::BabyService,
    AppState,
};

pub async fn list_babies(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    BabyService::list(&state.db, user.user_id)
        .await
        .map(|babies| Json(serde_json::to_value(babies).unwrap()))
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        })
}

pub async fn create_baby(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateBabyRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    if body.name.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Name is required" })),
        ));
    }

    BabyService::create(&state.db, user.user_id, &body)
        .await
        .map(|baby| (StatusCode::CREATED, Json(serde_json::to_value(baby).unwrap())))
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        })
}

pub async fn get_baby(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match BabyService::get(&state.db, id, user.user_id).await {
        Ok(Some(baby)) => Ok(Json(serde_json::to_value(baby).unwrap())),
        Ok(None) => Err((StatusCode::NOT_FOUND, Json(json!({ "error": "Baby not found" })))),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

pub async fn update_baby(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateBabyRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match BabyService::update(&state.db, id, user.user_id, &body).await {
        Ok(Some(baby)) => Ok(Json(serde_json::to_value(baby).unwrap())),
        Ok(None) => Err((StatusCode::NOT_FOUND, Json(json!({ "error": "Baby not found" })))),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

pub async fn delete_baby(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match BabyService::delete(&state.db, id, user.user_id).await {
        Ok(true) => Ok(Json(json!({ "message": "Baby deleted" }))),
        Ok(false) => Err((StatusCode::NOT_FOUND, Json(json!({ "error": "Baby not found" })))),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}
