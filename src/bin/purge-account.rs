/// Hard-delete one account and everything it owns (right to be forgotten).
///
/// Usage: purge-account --email user@example.com [--dry-run]

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "purge-account", about = "Hard-delete an account and all its data")]
struct Args {
    /// Email of the account to purge
    #[arg(long)]
    email: String,

    /// Report what would be deleted without deleting anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();

    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL environment variable not set");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    let email = args.email.trim().to_lowercase();
    let user_id: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&pool)
        .await?;

    let Some(user_id) = user_id else {
        tracing::error!("No account found for {}", email);
        std::process::exit(1);
    };

    let babies: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM babies WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(&pool)
        .await?;
    let threads: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM forum_threads WHERE author_id = $1")
            .bind(user_id)
            .fetch_one(&pool)
            .await?;
    let listings: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM marketplace_listings WHERE seller_id = $1")
            .bind(user_id)
            .fetch_one(&pool)
            .await?;

    tracing::info!(
        "Account {} owns {} babies, {} threads, {} listings",
        email,
        babies,
        threads,
        listings
    );

    if args.dry_run {
        tracing::info!("Dry run — nothing deleted");
        return Ok(());
    }

    // Babies, logs, milestone achievements, posts, favorites and messages
    // all hang off the deleted rows via ON DELETE CASCADE.
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM babies WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM forum_threads WHERE author_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM forum_posts WHERE author_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM marketplace_listings WHERE seller_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    tracing::info!("Account {} purged", email);
    Ok(())
}
