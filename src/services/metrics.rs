use lazy_static::lazy_static;
use prometheus::{register_counter, register_counter_vec, register_gauge, Counter, CounterVec, Gauge};
use sqlx::PgPool;
use tracing::{info, warn};

lazy_static! {
    // ── Event counters (increment on each event) ────────────────────────────
    pub static ref SIGNUPS_COUNTER: Counter = register_counter!(
        "api_signups_total",
        "Accounts created"
    ).unwrap();

    pub static ref LOGINS_COUNTER: CounterVec = register_counter_vec!(
        "api_logins_total",
        "Login attempts by status",
        &["status"]
    ).unwrap();

    pub static ref CHAT_REQUESTS_COUNTER: CounterVec = register_counter_vec!(
        "api_chat_requests_total",
        "Assistant chat completions by status",
        &["status"]
    ).unwrap();

    pub static ref MEDIA_UPLOADS_COUNTER: Counter = register_counter!(
        "api_media_uploads_total",
        "Photos uploaded"
    ).unwrap();

    pub static ref FORUM_POSTS_COUNTER: Counter = register_counter!(
        "api_forum_posts_total",
        "Forum replies created"
    ).unwrap();

    pub static ref LISTING_MESSAGES_COUNTER: Counter = register_counter!(
        "api_listing_messages_total",
        "Marketplace messages sent"
    ).unwrap();

    // ── Business metrics (refreshed from the database) ──────────────────────
    pub static ref USERS_GAUGE: Gauge = register_gauge!(
        "app_users_active_total",
        "Active accounts"
    ).unwrap();

    pub static ref BABIES_GAUGE: Gauge = register_gauge!(
        "app_babies_total",
        "Baby profiles"
    ).unwrap();

    pub static ref THREADS_GAUGE: Gauge = register_gauge!(
        "app_forum_threads_total",
        "Forum threads"
    ).unwrap();

    pub static ref LISTINGS_GAUGE: Gauge = register_gauge!(
        "app_listings_active_total",
        "Active marketplace listings"
    ).unwrap();
}

/// Spawn the background metrics collector (refreshes every 5 minutes).
pub fn start(pool: PgPool) {
    tokio::spawn(async move {
        // Initial collection on startup
        if let Err(e) = collect(&pool).await {
            warn!("Metrics: initial collection failed: {}", e);
        }
        loop {
            tokio::time::sleep(tokio::time::Duration::from_secs(300)).await;
            if let Err(e) = collect(&pool).await {
                warn!("Metrics: collection failed: {}", e);
            }
        }
    });
}

async fn collect(pool: &PgPool) -> anyhow::Result<()> {
    let users: i64 =
        sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM users WHERE is_active = TRUE")
            .fetch_one(pool)
            .await?;
    USERS_GAUGE.set(users as f64);

    let babies: i64 = sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM babies")
        .fetch_one(pool)
        .await?;
    BABIES_GAUGE.set(babies as f64);

    let threads: i64 = sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM forum_threads")
        .fetch_one(pool)
        .await?;
    THREADS_GAUGE.set(threads as f64);

    let listings: i64 = sqlx::query_scalar(
        "SELECT COUNT(*)::BIGINT FROM marketplace_listings WHERE is_active = TRUE",
    )
    .fetch_one(pool)
    .await?;
    LISTINGS_GAUGE.set(listings as f64);

    info!("Metrics: collected ({users} users, {babies} babies)");
    Ok(())
}
