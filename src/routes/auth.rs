use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::{
    middleware::rate_limit::check_rate_limit,
    models::{
        auth::AuthenticatedUser,
        user::{
            ChangePasswordRequest, DeleteAccountRequest, LoginRequest, RefreshTokenRequest,
            SignupRequest, UpdateEmailRequest, UserProfile,
        },
    },
    services::{auth::AuthService, metrics::LOGINS_COUNTER},
    AppState,
};

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    // Rate limit: 5 attempts per 15 min per email
    let rate_key = format!("rate:signup:{}", body.email.to_lowercase());
    let mut redis = state.redis.clone();
    check_rate_limit(&mut redis, &rate_key, 5, 900).await?;

    AuthService::signup(
        &state.db,
        &body.email,
        &body.full_name,
        &body.password,
        &body.confirm_password,
        &state.config.jwt_secret,
        &state.config.jwt_refresh_secret,
        state.config.jwt_expiry_seconds,
        state.config.jwt_refresh_expiry_days,
    )
    .await
    .map(|res| (StatusCode::CREATED, Json(serde_json::to_value(res).unwrap())))
    .map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )
    })
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    // Rate limit: 5 attempts per 15 min per email
    let rate_key = format!("rate:login:{}", body.email.to_lowercase());
    let mut redis = state.redis.clone();
    check_rate_limit(&mut redis, &rate_key, 5, 900).await?;

    match AuthService::login(
        &state.db,
        &body.email,
        &body.password,
        &state.config.jwt_secret,
        &state.config.jwt_refresh_secret,
        state.config.jwt_expiry_seconds,
        state.config.jwt_refresh_expiry_days,
    )
    .await
    {
        Ok(res) => {
            LOGINS_COUNTER.with_label_values(&["success"]).inc();
            Ok(Json(serde_json::to_value(res).unwrap()))
        }
        Err(e) => {
            LOGINS_COUNTER.with_label_values(&["failure"]).inc();
            Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": e.to_string() })),
            ))
        }
    }
}

pub async fn refresh_token(
    State(state): State<AppState>,
    Json(body): Json<RefreshTokenRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    AuthService::refresh(
        &state.db,
        &body.refresh_token,
        &state.config.jwt_secret,
        &state.config.jwt_refresh_secret,
        state.config.jwt_expiry_seconds,
        state.config.jwt_refresh_expiry_days,
    )
    .await
    .map(|res| Json(serde_json::to_value(res).unwrap()))
    .map_err(|e| {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": e.to_string() })),
        )
    })
}

pub async fn logout(
    State(state): State<AppState>,
    Json(body): Json<RefreshTokenRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    AuthService::logout(&state.db, &body.refresh_token, &state.config.jwt_refresh_secret)
        .await
        .map(|_| Json(json!({ "message": "Logged out" })))
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        })
}

pub async fn me(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    AuthService::me(&state.db, user.user_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        })?
        .map(|u| Json(serde_json::to_value(UserProfile::from(u)).unwrap()))
        .ok_or((StatusCode::NOT_FOUND, Json(json!({ "error": "User not found" }))))
}

pub async fn change_password(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    AuthService::change_password(
        &state.db,
        user.user_id,
        &body.current_password,
        &body.new_password,
    )
    .await
    .map(|_| Json(json!({ "message": "Password changed" })))
    .map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )
    })
}

pub async fn update_email(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<UpdateEmailRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    AuthService::update_email(&state.db, user.user_id, &body.new_email, &body.password)
        .await
        .map(|_| Json(json!({ "message": "Email updated" })))
        .map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
        })
}

pub async fn delete_account(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<DeleteAccountRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    AuthService::delete_account(&state.db, user.user_id, &body.password)
        .await
        .map(|_| Json(json!({ "message": "Account deleted" })))
        .map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
        })
}
