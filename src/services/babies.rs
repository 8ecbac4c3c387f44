use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    catalog::{age_in_months, age_in_weeks},
    models::baby::{Baby, BabyWithAge, CreateBabyRequest, UpdateBabyRequest},
};

fn with_age(baby: Baby) -> BabyWithAge {
    let today = Utc::now().date_naive();
    let age_months = age_in_months(baby.birth_date, today);
    let age_weeks = age_in_weeks(baby.birth_date, today);
    BabyWithAge { baby, age_months, age_weeks }
}

pub struct BabyService;

impl BabyService {
    pub async fn list(pool: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<BabyWithAge>> {
        let babies = sqlx::query_as::<_, Baby>(
            "SELECT * FROM babies WHERE user_id = $1 ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(babies.into_iter().map(with_age).collect())
    }

    /// Fetch a baby only if it belongs to the given account.
    pub async fn get_owned(
        pool: &PgPool,
        baby_id: Uuid,
        user_id: Uuid,
    ) -> anyhow::Result<Option<Baby>> {
        let baby = sqlx::query_as::<_, Baby>(
            "SELECT * FROM babies WHERE id = $1 AND user_id = $2",
        )
        .bind(baby_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(baby)
    }

    pub async fn get(
        pool: &PgPool,
        baby_id: Uuid,
        user_id: Uuid,
    ) -> anyhow::Result<Option<BabyWithAge>> {
        Ok(Self::get_owned(pool, baby_id, user_id).await?.map(with_age))
    }

    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        req: &CreateBabyRequest,
    ) -> anyhow::Result<BabyWithAge> {
        let baby = sqlx::query_as::<_, Baby>(
            "INSERT INTO babies (user_id, name, birth_date, gender, birth_weight_kg, birth_height_cm, photo_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(user_id)
        .bind(&req.name)
        .bind(req.birth_date)
        .bind(&req.gender)
        .bind(req.birth_weight_kg)
        .bind(req.birth_height_cm)
        .bind(&req.photo_url)
        .fetch_one(pool)
        .await?;
        Ok(with_age(baby))
    }

    pub async fn update(
        pool: &PgPool,
        baby_id: Uuid,
        user_id: Uuid,
        req: &UpdateBabyRequest,
    ) -> anyhow::Result<Option<BabyWithAge>> {
        let baby = sqlx::query_as::<_, Baby>(
            "UPDATE babies
             SET name            = COALESCE($1, name),
                 birth_date      = COALESCE($2, birth_date),
                 gender          = COALESCE($3, gender),
                 birth_weight_kg = COALESCE($4, birth_weight_kg),
                 birth_height_cm = COALESCE($5, birth_height_cm),
                 photo_url       = COALESCE($6, photo_url),
                 updated_at      = NOW()
             WHERE id = $7 AND user_id = $8
             RETURNING *",
        )
        .bind(&req.name)
        .bind(req.birth_date)
        .bind(&req.gender)
        .bind(req.birth_weight_kg)
        .bind(req.birth_height_cm)
        .bind(&req.photo_url)
        .bind(baby_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(baby.map(with_age))
    }

    /// Delete a baby and every log attached to it in a single transaction,
    /// so a failure partway can never leave orphaned rows.
    pub async fn delete(pool: &PgPool, baby_id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
        let mut tx = pool.begin().await?;

        for table in [
            "sleep_logs",
            "feeding_logs",
            "diaper_logs",
            "activity_logs",
            "growth_logs",
            "baby_milestones",
        ] {
            sqlx::query(&format!("DELETE FROM {table} WHERE baby_id = $1"))
                .bind(baby_id)
                .execute(&mut *tx)
                .await?;
        }

        let result = sqlx::query("DELETE FROM babies WHERE id = $1 AND user_id = $2")
            .bind(baby_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }
}
