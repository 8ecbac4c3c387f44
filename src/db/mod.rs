use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Run the migrations embedded in ./migrations/
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Forum categories shipped with the app.
const FORUM_CATEGORIES: &[(&str, &str, &str, &str)] = &[
    ("Sleep & Naps", "Discuss sleep training, nap schedules, and bedtime routines", "🌙", "blue"),
    ("Feeding & Nutrition", "Breastfeeding, formula, solids, and picky eaters", "🍼", "green"),
    ("Development & Milestones", "Motor skills, speech, cognitive development", "🎯", "purple"),
    ("Health & Wellness", "Illness, vaccines, pediatrician tips", "💊", "red"),
    ("New Parents", "First-time parent advice and support", "👶", "pink"),
    ("Work-Life Balance", "Returning to work, childcare, parenting burnout", "⚖️", "amber"),
    ("Products & Gear", "Reviews, recommendations, what worked for you", "🛒", "indigo"),
    ("Success Stories", "Share your wins and celebrate milestones", "🎉", "emerald"),
];

/// Developmental milestone checklist (category, name, start month, end month, icon).
const MILESTONES: &[(&str, &str, i32, i32, &str)] = &[
    // 0-3 months
    ("Motor", "Lifts head during tummy time", 0, 3, "💪"),
    ("Motor", "Opens and closes hands", 0, 3, "✋"),
    ("Social", "Smiles at people", 1, 3, "😊"),
    ("Communication", "Coos and makes sounds", 1, 3, "🗣️"),
    // 3-6 months
    ("Motor", "Rolls over (front to back)", 3, 6, "🔄"),
    ("Motor", "Brings objects to mouth", 3, 6, "👄"),
    ("Social", "Laughs out loud", 3, 6, "😂"),
    ("Cognitive", "Recognizes familiar faces", 3, 6, "👀"),
    // 6-9 months
    ("Motor", "Sits without support", 6, 9, "🧘"),
    ("Motor", "Starts crawling", 6, 10, "🐛"),
    ("Communication", "Responds to own name", 6, 9, "👂"),
    ("Social", "Plays peek-a-boo", 6, 9, "🙈"),
    // 9-12 months
    ("Motor", "Pulls to stand", 9, 12, "🧍"),
    ("Motor", "First steps", 9, 15, "🚶"),
    ("Communication", "Says 'mama' or 'dada'", 9, 12, "💬"),
    ("Cognitive", "Waves bye-bye", 9, 12, "👋"),
    // 12-18 months
    ("Motor", "Walks independently", 12, 18, "🚶‍♂️"),
    ("Motor", "Scribbles with crayon", 12, 18, "✏️"),
    ("Communication", "Says several words", 12, 18, "🗨️"),
    ("Cognitive", "Points to wanted items", 12, 18, "👆"),
];

/// Seed reference rows (forum categories, milestone checklist) on first
/// boot. Idempotent — rows are only inserted into empty tables.
pub async fn seed_reference_data(pool: &PgPool) -> anyhow::Result<()> {
    let category_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM forum_categories")
        .fetch_one(pool)
        .await?;
    if category_count == 0 {
        for (position, (name, description, icon, color)) in FORUM_CATEGORIES.iter().enumerate() {
            sqlx::query(
                "INSERT INTO forum_categories (name, description, icon, color, position)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(name)
            .bind(description)
            .bind(icon)
            .bind(color)
            .bind(position as i32)
            .execute(pool)
            .await?;
        }
        tracing::info!("Seeded {} forum categories", FORUM_CATEGORIES.len());
    }

    let milestone_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM milestones")
        .fetch_one(pool)
        .await?;
    if milestone_count == 0 {
        for (category, name, start, end, icon) in MILESTONES {
            sqlx::query(
                "INSERT INTO milestones (category, name, age_range_start_months, age_range_end_months, icon)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(category)
            .bind(name)
            .bind(start)
            .bind(end)
            .bind(icon)
            .execute(pool)
            .await?;
        }
        tracing::info!("Seeded {} milestones", MILESTONES.len());
    }

    Ok(())
}
