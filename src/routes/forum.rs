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
        forum::{CreatePostRequest, CreateThreadRequest},
    },
    services::forum::ForumService,
    AppState,
};

pub async fn list_categories(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ForumService::list_categories(&state.db)
        .await
        .map(|c| Json(serde_json::to_value(c).unwrap()))
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        })
}

pub async fn list_threads(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(category_id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ForumService::list_threads(&state.db, category_id)
        .await
        .map(|t| Json(serde_json::to_value(t).unwrap()))
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        })
}

pub async fn create_thread(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateThreadRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    ForumService::create_thread(&state.db, user.user_id, &body)
        .await
        .map(|t| (StatusCode::CREATED, Json(serde_json::to_value(t).unwrap())))
        .map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
        })
}

/// Thread with its posts. Viewing someone else's thread bumps its view count.
pub async fn thread_detail(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(thread_id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match ForumService::thread_detail(&state.db, thread_id, user.user_id).await {
        Ok(Some(detail)) => Ok(Json(serde_json::to_value(detail).unwrap())),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Thread not found" })),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

pub async fn add_post(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(thread_id): Path<Uuid>,
    Json(body): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    match ForumService::add_post(&state.db, thread_id, user.user_id, &body).await {
        Ok(Some(post)) => Ok((StatusCode::CREATED, Json(serde_json::to_value(post).unwrap()))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Thread not found" })),
        )),
        Err(e) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

pub async fn trending(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ForumService::trending(&state.db)
        .await
        .map(|t| Json(serde_json::to_value(t).unwrap()))
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        })
}
