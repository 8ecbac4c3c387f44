use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    catalog::age_in_months,
    models::auth::AuthenticatedUser,
    services::{
        assistant::{BabyContext, ChatMessage},
        babies::BabyService,
        metrics::CHAT_REQUESTS_COUNTER,
    },
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub baby_id: Option<Uuid>,
}

/// One chat-completion round trip against the configured model. The baby
/// context (name, age, gender) is attached when baby_id resolves to a baby
/// the caller owns.
pub async fn chat(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<ChatRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let baby_context = match body.baby_id {
        Some(baby_id) => BabyService::get_owned(&state.db, baby_id, user.user_id)
            .await
            .map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": e.to_string() })),
                )
            })?
            .map(|baby| BabyContext {
                name: baby.name,
                age_months: age_in_months(baby.birth_date, Utc::now().date_naive()),
                gender: baby.gender,
            }),
        None => None,
    };

    match state.assistant.chat(&body.messages, baby_context.as_ref()).await {
        Ok(message) => {
            CHAT_REQUESTS_COUNTER.with_label_values(&["success"]).inc();
            Ok(Json(json!({ "message": message })))
        }
        Err(e) => {
            CHAT_REQUESTS_COUNTER.with_label_values(&["failure"]).inc();
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            ))
        }
    }
}
