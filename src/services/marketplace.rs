use sqlx::PgPool;
use uuid::Uuid;

use crate::models::marketplace::{
    CreateListingRequest, Listing, ListingMessage, ListingQuery, ListingWithSeller,
    SendListingMessageRequest, UpdateListingRequest,
};

const LISTING_COLS: &str = "l.id, l.seller_id, u.full_name AS seller_name, l.title, l.description,
     l.price, l.listing_type, l.category, l.condition, l.images, l.location,
     l.view_count, l.is_active, l.created_at";

const LISTING_TYPES: &[&str] = &["sell", "swap", "free"];
const CONDITIONS: &[&str] = &["new", "like_new", "good", "fair"];

pub struct MarketplaceService;

impl MarketplaceService {
    /// Active listings, newest first, optionally narrowed by category, type
    /// and a text search over title/description.
    pub async fn browse(
        pool: &PgPool,
        query: &ListingQuery,
    ) -> anyhow::Result<Vec<ListingWithSeller>> {
        let listings = sqlx::query_as::<_, ListingWithSeller>(&format!(
            "SELECT {LISTING_COLS}
             FROM marketplace_listings l
             JOIN users u ON u.id = l.seller_id
             WHERE l.is_active = TRUE
               AND ($1::TEXT IS NULL OR l.category = $1)
               AND ($2::TEXT IS NULL OR l.listing_type = $2)
               AND ($3::TEXT IS NULL OR l.title ILIKE '%' || $3 || '%' OR l.description ILIKE '%' || $3 || '%')
             ORDER BY l.created_at DESC"
        ))
        .bind(&query.category)
        .bind(&query.listing_type)
        .bind(&query.search)
        .fetch_all(pool)
        .await?;
        Ok(listings)
    }

    pub async fn create(
        pool: &PgPool,
        seller_id: Uuid,
        req: &CreateListingRequest,
    ) -> anyhow::Result<Listing> {
        if req.title.trim().is_empty() || req.description.trim().is_empty() {
            anyhow::bail!("Title and description are required");
        }
        if !LISTING_TYPES.contains(&req.listing_type.as_str()) {
            anyhow::bail!("Unknown listing type: {}", req.listing_type);
        }
        if !CONDITIONS.contains(&req.condition.as_str()) {
            anyhow::bail!("Unknown condition: {}", req.condition);
        }
        // Only "sell" listings carry a price.
        let price = if req.listing_type == "sell" { req.price } else { None };

        let listing = sqlx::query_as::<_, Listing>(
            "INSERT INTO marketplace_listings
                 (seller_id, title, description, price, listing_type, category, condition, images, location)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *",
        )
        .bind(seller_id)
        .bind(req.title.trim())
        .bind(req.description.trim())
        .bind(price)
        .bind(&req.listing_type)
        .bind(&req.category)
        .bind(&req.condition)
        .bind(&req.images)
        .bind(&req.location)
        .fetch_one(pool)
        .await?;
        Ok(listing)
    }

    /// Listing detail. A fetch by anyone but the seller counts one view.
    pub async fn detail(
        pool: &PgPool,
        listing_id: Uuid,
        viewer_id: Uuid,
    ) -> anyhow::Result<Option<ListingWithSeller>> {
        sqlx::query(
            "UPDATE marketplace_listings SET view_count = view_count + 1
             WHERE id = $1 AND seller_id != $2",
        )
        .bind(listing_id)
        .bind(viewer_id)
        .execute(pool)
        .await?;

        let listing = sqlx::query_as::<_, ListingWithSeller>(&format!(
            "SELECT {LISTING_COLS}
             FROM marketplace_listings l
             JOIN users u ON u.id = l.seller_id
             WHERE l.id = $1"
        ))
        .bind(listing_id)
        .fetch_optional(pool)
        .await?;
        Ok(listing)
    }

    pub async fn my_listings(pool: &PgPool, seller_id: Uuid) -> anyhow::Result<Vec<Listing>> {
        let listings = sqlx::query_as::<_, Listing>(
            "SELECT * FROM marketplace_listings WHERE seller_id = $1 ORDER BY created_at DESC",
        )
        .bind(seller_id)
        .fetch_all(pool)
        .await?;
        Ok(listings)
    }

    pub async fn update(
        pool: &PgPool,
        listing_id: Uuid,
        seller_id: Uuid,
        req: &UpdateListingRequest,
    ) -> anyhow::Result<Option<Listing>> {
        let listing = sqlx::query_as::<_, Listing>(
            "UPDATE marketplace_listings
             SET title       = COALESCE($1, title),
                 description = COALESCE($2, description),
                 price       = COALESCE($3, price),
                 is_active   = COALESCE($4, is_active),
                 updated_at  = NOW()
             WHERE id = $5 AND seller_id = $6
             RETURNING *",
        )
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.price)
        .bind(req.is_active)
        .bind(listing_id)
        .bind(seller_id)
        .fetch_optional(pool)
        .await?;
        Ok(listing)
    }

    pub async fn delete(pool: &PgPool, listing_id: Uuid, seller_id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "DELETE FROM marketplace_listings WHERE id = $1 AND seller_id = $2",
        )
        .bind(listing_id)
        .bind(seller_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Toggle the favorite join row. Returns the new state; toggling twice
    /// lands back where it started.
    pub async fn toggle_favorite(
        pool: &PgPool,
        listing_id: Uuid,
        user_id: Uuid,
    ) -> anyhow::Result<Option<bool>> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM marketplace_listings WHERE id = $1)",
        )
        .bind(listing_id)
        .fetch_one(pool)
        .await?;
        if !exists {
            return Ok(None);
        }

        let removed = sqlx::query(
            "DELETE FROM marketplace_favorites WHERE listing_id = $1 AND user_id = $2",
        )
        .bind(listing_id)
        .bind(user_id)
        .execute(pool)
        .await?;

        if removed.rows_affected() > 0 {
            return Ok(Some(false));
        }

        sqlx::query(
            "INSERT INTO marketplace_favorites (listing_id, user_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(listing_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(Some(true))
    }

    pub async fn favorites(pool: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<ListingWithSeller>> {
        let listings = sqlx::query_as::<_, ListingWithSeller>(&format!(
            "SELECT {LISTING_COLS}
             FROM marketplace_favorites f
             JOIN marketplace_listings l ON l.id = f.listing_id
             JOIN users u ON u.id = l.seller_id
             WHERE f.user_id = $1
             ORDER BY f.created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(listings)
    }

    /// One-way message to the seller. There is no reply thread.
    pub async fn message_seller(
        pool: &PgPool,
        listing_id: Uuid,
        sender_id: Uuid,
        req: &SendListingMessageRequest,
    ) -> anyhow::Result<Option<ListingMessage>> {
        if req.content.trim().is_empty() {
            anyhow::bail!("Message is required");
        }

        let seller_id: Option<Uuid> = sqlx::query_scalar(
            "SELECT seller_id FROM marketplace_listings WHERE id = $1",
        )
        .bind(listing_id)
        .fetch_optional(pool)
        .await?;
        let Some(seller_id) = seller_id else {
            return Ok(None);
        };
        if seller_id == sender_id {
            anyhow::bail!("You can't message your own listing");
        }

        let message = sqlx::query_as::<_, ListingMessage>(
            "INSERT INTO marketplace_messages (listing_id, sender_id, content)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(listing_id)
        .bind(sender_id)
        .bind(req.content.trim())
        .fetch_one(pool)
        .await?;

        crate::services::metrics::LISTING_MESSAGES_COUNTER.inc();
        Ok(Some(message))
    }
}
