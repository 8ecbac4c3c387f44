//! Demo account seed script
//!
//! Seeds a demo parent account with realistic data:
//! - Account: demo@bobo.app
//! - 1 baby (Emma, ~6 months old) with sleep/feeding/diaper/growth history
//! - A forum thread with a reply
//! - 3 marketplace listings
//!
//! Usage:
//!   DATABASE_URL=... DEMO_PASSWORD=Demo2024! ./seed-demo
//!
//! Environment variables:
//!   DATABASE_URL   — PostgreSQL connection string (required)
//!   DEMO_PASSWORD  — Password for the demo account (default: Demo2024!)

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use sqlx::postgres::PgPoolOptions;
use std::env;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let database_url = env::var("DATABASE_URL").context("DATABASE_URL required")?;
    let demo_password = env::var("DEMO_PASSWORD").unwrap_or_else(|_| "Demo2024!".to_string());

    println!("=== Seed Demo Account ===");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    bobo_api::db::run_migrations(&pool).await?;
    bobo_api::db::seed_reference_data(&pool).await?;

    // 1. Clean existing demo account (FK cascades remove everything it owns)
    println!("Cleaning existing demo account...");
    sqlx::query("DELETE FROM users WHERE email = 'demo@bobo.app'")
        .execute(&pool)
        .await
        .context("Failed to delete demo user")?;

    // 2. Demo account
    println!("Creating demo account...");
    let password_hash = bcrypt::hash(&demo_password, 12)?;
    let user_id: Uuid = sqlx::query_scalar(
        "INSERT INTO users (email, password_hash, full_name)
         VALUES ('demo@bobo.app', $1, 'Demo Parent')
         RETURNING id",
    )
    .bind(&password_hash)
    .fetch_one(&pool)
    .await?;

    // 3. Baby — born ~6 months ago
    println!("Creating baby profile...");
    let birth_date = (Utc::now() - Duration::days(183)).date_naive();
    let baby_id: Uuid = sqlx::query_scalar(
        "INSERT INTO babies (user_id, name, birth_date, gender, birth_weight_kg, birth_height_cm)
         VALUES ($1, 'Emma', $2, 'female', 3.2, 49.5)
         RETURNING id",
    )
    .bind(user_id)
    .bind(birth_date)
    .fetch_one(&pool)
    .await?;

    // 4. A week of sleep, feeding and diaper logs
    println!("Logging a week of events...");
    for day in 0..7i64 {
        let night = Utc::now() - Duration::days(day + 1) + Duration::hours(20);
        sqlx::query(
            "INSERT INTO sleep_logs (baby_id, start_time, end_time, quality)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(baby_id)
        .bind(night)
        .bind(night + Duration::hours(9) + Duration::minutes(day * 7))
        .bind(if day % 3 == 0 { "good" } else { "excellent" })
        .execute(&pool)
        .await?;

        for feeding in 0..5i64 {
            let time = Utc::now() - Duration::days(day) + Duration::hours(7 + feeding * 3);
            sqlx::query(
                "INSERT INTO feeding_logs (baby_id, feeding_type, start_time, amount_ml)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(baby_id)
            .bind(if feeding % 2 == 0 { "bottle" } else { "breast" })
            .bind(time)
            .bind(if feeding % 2 == 0 { Some(150) } else { None })
            .execute(&pool)
            .await?;
        }

        for diaper in 0..4i64 {
            let time = Utc::now() - Duration::days(day) + Duration::hours(8 + diaper * 4);
            sqlx::query(
                "INSERT INTO diaper_logs (baby_id, diaper_type, logged_at)
                 VALUES ($1, $2, $3)",
            )
            .bind(baby_id)
            .bind(match diaper % 3 {
                0 => "wet",
                1 => "dirty",
                _ => "both",
            })
            .bind(time)
            .execute(&pool)
            .await?;
        }
    }

    // 5. Monthly growth measurements
    println!("Logging growth history...");
    let weights = [3.2, 4.1, 5.0, 5.7, 6.3, 6.8, 7.2];
    let heights = [49.5, 53.5, 56.8, 59.5, 61.8, 63.7, 65.4];
    for (month, (weight, height)) in weights.iter().zip(heights.iter()).enumerate() {
        sqlx::query(
            "INSERT INTO growth_logs (baby_id, measurement_date, weight_kg, height_cm, notes)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(baby_id)
        .bind(birth_date + Duration::days((month as i64) * 30))
        .bind(weight)
        .bind(height)
        .bind(if month == 0 { Some("Birth measurements") } else { None })
        .execute(&pool)
        .await?;
    }

    // 6. Forum thread with a reply
    println!("Creating forum thread...");
    let sleep_category: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM forum_categories WHERE name = 'Sleep & Naps'")
            .fetch_optional(&pool)
            .await?;
    if let Some(category_id) = sleep_category {
        let thread_id: Uuid = sqlx::query_scalar(
            "INSERT INTO forum_threads (category_id, author_id, title, content, view_count)
             VALUES ($1, $2, $3, $4, 42)
             RETURNING id",
        )
        .bind(category_id)
        .bind(user_id)
        .bind("4 month sleep regression — how long did it last for you?")
        .bind("Emma was sleeping 6-hour stretches and now wakes every 90 minutes. Any tips that worked for you?")
        .fetch_one(&pool)
        .await?;

        sqlx::query(
            "INSERT INTO forum_posts (thread_id, author_id, content)
             VALUES ($1, $2, $3)",
        )
        .bind(thread_id)
        .bind(user_id)
        .bind("Update: a consistent bedtime routine helped a lot after two weeks.")
        .execute(&pool)
        .await?;
    }

    // 7. Marketplace listings
    println!("Creating marketplace listings...");
    let listings: [(&str, &str, Option<f64>, &str, &str, &str); 3] = [
        (
            "Graco Stroller - Excellent Condition",
            "Used for 6 months, still like new. Includes rain cover.",
            Some(120.0),
            "sell",
            "strollers",
            "like_new",
        ),
        (
            "Baby Clothes Bundle (0-3 months)",
            "20+ items including onesies, sleepers, and bibs. All gently used.",
            Some(35.0),
            "sell",
            "clothing",
            "good",
        ),
        (
            "Fisher Price Swing",
            "Works perfectly! We used it for only 4 months. Pick up only.",
            None,
            "free",
            "gear",
            "good",
        ),
    ];
    for (title, description, price, listing_type, category, condition) in listings {
        sqlx::query(
            "INSERT INTO marketplace_listings
                 (seller_id, title, description, price, listing_type, category, condition, location)
             VALUES ($1, $2, $3, $4, $5, $6, $7, 'Brooklyn, NY')",
        )
        .bind(user_id)
        .bind(title)
        .bind(description)
        .bind(price)
        .bind(listing_type)
        .bind(category)
        .bind(condition)
        .execute(&pool)
        .await?;
    }

    println!();
    println!("Done. Log in with demo@bobo.app / {demo_password}");
    Ok(())
}
