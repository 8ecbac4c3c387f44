use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    models::{
        auth::AuthenticatedUser,
        marketplace::{
            CreateListingRequest, ListingQuery, SendListingMessageRequest, UpdateListingRequest,
        },
    },
    services::marketplace::MarketplaceService,
    AppState,
};

pub async fn browse(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<ListingQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    MarketplaceService::browse(&state.db, &query)
        .await
        .map(|l| Json(serde_json::to_value(l).unwrap()))
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        })
}

pub async fn create_listing(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateListingRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    MarketplaceService::create(&state.db, user.user_id, &body)
        .await
        .map(|l| (StatusCode::CREATED, Json(serde_json::to_value(l).unwrap())))
        .map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
        })
}

/// Listing detail. Viewing someone else's listing bumps its view count.
pub async fn listing_detail(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(listing_id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match MarketplaceService::detail(&state.db, listing_id, user.user_id).await {
        Ok(Some(listing)) => Ok(Json(serde_json::to_value(listing).unwrap())),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Listing not found" })),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

pub async fn my_listings(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    MarketplaceService::my_listings(&state.db, user.user_id)
        .await
        .map(|l| Json(serde_json::to_value(l).unwrap()))
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        })
}

pub async fn update_listing(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(listing_id): Path<Uuid>,
    Json(body): Json<UpdateListingRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match MarketplaceService::update(&state.db, listing_id, user.user_id, &body).await {
        Ok(Some(listing)) => Ok(Json(serde_json::to_value(listing).unwrap())),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Listing not found" })),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

pub async fn delete_listing(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(listing_id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    match MarketplaceService::delete(&state.db, listing_id, user.user_id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Listing not found" })),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

pub async fn toggle_favorite(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(listing_id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match MarketplaceService::toggle_favorite(&state.db, listing_id, user.user_id).await {
        Ok(Some(favorited)) => Ok(Json(json!({ "favorited": favorited }))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Listing not found" })),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

pub async fn list_favorites(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    MarketplaceService::favorites(&state.db, user.user_id)
        .await
        .map(|l| Json(serde_json::to_value(l).unwrap()))
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        })
}

pub async fn message_seller(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(listing_id): Path<Uuid>,
    Json(body): Json<SendListingMessageRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    match MarketplaceService::message_seller(&state.db, listing_id, user.user_id, &body).await {
        Ok(Some(message)) => Ok((
            StatusCode::CREATED,
            Json(serde_json::to_value(message).unwrap()),
        )),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Listing not found" })),
        )),
        Err(e) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}
