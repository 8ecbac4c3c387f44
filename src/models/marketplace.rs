use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Listing {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub title: String,
    pub description: String,
    pub price: Option<f64>,
    pub listing_type: String, // sell | swap | free
    pub category: String,
    pub condition: String, // new | like_new | good | fair
    pub images: Vec<String>,
    pub location: Option<String>,
    pub view_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing row joined with the seller's display name.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ListingWithSeller {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub seller_name: String,
    pub title: String,
    pub description: String,
    pub price: Option<f64>,
    pub listing_type: String,
    pub category: String,
    pub condition: String,
    pub images: Vec<String>,
    pub location: Option<String>,
    pub view_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateListingRequest {
    pub title: String,
    pub description: String,
    pub price: Option<f64>,
    pub listing_type: String,
    pub category: String,
    pub condition: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateListingRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub is_active: Option<bool>,
}

/// Browse filters — all optional, combined with AND.
#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    pub category: Option<String>,
    pub listing_type: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ListingMessage {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct SendListingMessageRequest {
    pub content: String,
}
