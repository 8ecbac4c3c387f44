use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Baby {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub birth_date: NaiveDate,
    pub gender: Option<String>, // "male" | "female"
    pub birth_weight_kg: Option<f64>,
    pub birth_height_cm: Option<f64>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBabyRequest {
    pub name: String,
    pub birth_date: NaiveDate,
    pub gender: Option<String>,
    pub birth_weight_kg: Option<f64>,
    pub birth_height_cm: Option<f64>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBabyRequest {
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub birth_weight_kg: Option<f64>,
    pub birth_height_cm: Option<f64>,
    pub photo_url: Option<String>,
}

/// Baby row plus derived ages, as returned by list/detail endpoints.
#[derive(Debug, Serialize)]
pub struct BabyWithAge {
    #[serde(flatten)]
    pub baby: Baby,
    pub age_months: i64,
    pub age_weeks: i64,
}
