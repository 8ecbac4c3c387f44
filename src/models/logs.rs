use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SleepLog {
    pub id: Uuid,
    pub baby_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub quality: Option<String>, // poor | fair | good | excellent
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSleepLogRequest {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub quality: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FeedingLog {
    pub id: Uuid,
    pub baby_id: Uuid,
    pub feeding_type: String, // breast | bottle | formula | solid
    pub start_time: DateTime<Utc>,
    pub amount_ml: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateFeedingLogRequest {
    pub feeding_type: String,
    pub start_time: DateTime<Utc>,
    pub amount_ml: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DiaperLog {
    pub id: Uuid,
    pub baby_id: Uuid,
    pub diaper_type: String, // wet | dirty | both | dry
    pub logged_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateDiaperLogRequest {
    pub diaper_type: String,
    pub logged_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActivityLog {
    pub id: Uuid,
    pub baby_id: Uuid,
    pub activity_type: String,
    pub notes: Option<String>,
    pub duration_minutes: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateActivityLogRequest {
    pub activity_type: String,
    pub notes: Option<String>,
    pub duration_minutes: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GrowthLog {
    pub id: Uuid,
    pub baby_id: Uuid,
    pub measurement_date: NaiveDate,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub head_circumference_cm: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateGrowthLogRequest {
    pub measurement_date: NaiveDate,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub head_circumference_cm: Option<f64>,
    pub notes: Option<String>,
}

/// Latest/previous measurement deltas plus WHO percentile estimates.
#[derive(Debug, Serialize)]
pub struct GrowthSummary {
    pub latest: Option<GrowthLog>,
    pub weight_change_kg: Option<f64>,
    pub height_change_cm: Option<f64>,
    pub weight_percentile: Option<i32>,
    pub height_percentile: Option<i32>,
}
