use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    catalog::{age_in_months, growth},
    models::logs::{
        ActivityLog, CreateActivityLogRequest, CreateDiaperLogRequest, CreateFeedingLogRequest,
        CreateGrowthLogRequest, CreateSleepLogRequest, DiaperLog, FeedingLog, GrowthLog,
        GrowthSummary, SleepLog,
    },
};

/// Most recent entries returned by the list endpoints.
const LIST_LIMIT: i64 = 100;

pub struct LogService;

impl LogService {
    // ── Sleep ───────────────────────────────────────────────────────────

    pub async fn add_sleep(
        pool: &PgPool,
        baby_id: Uuid,
        req: &CreateSleepLogRequest,
    ) -> anyhow::Result<SleepLog> {
        let log = sqlx::query_as::<_, SleepLog>(
            "INSERT INTO sleep_logs (baby_id, start_time, end_time, quality)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(baby_id)
        .bind(req.start_time)
        .bind(req.end_time)
        .bind(&req.quality)
        .fetch_one(pool)
        .await?;
        Ok(log)
    }

    pub async fn list_sleep(pool: &PgPool, baby_id: Uuid) -> anyhow::Result<Vec<SleepLog>> {
        let logs = sqlx::query_as::<_, SleepLog>(
            "SELECT * FROM sleep_logs WHERE baby_id = $1 ORDER BY start_time DESC LIMIT $2",
        )
        .bind(baby_id)
        .bind(LIST_LIMIT)
        .fetch_all(pool)
        .await?;
        Ok(logs)
    }

    pub async fn delete_sleep(pool: &PgPool, baby_id: Uuid, log_id: Uuid) -> anyhow::Result<bool> {
        Self::delete_from(pool, "sleep_logs", baby_id, log_id).await
    }

    // ── Feeding ─────────────────────────────────────────────────────────

    pub async fn add_feeding(
        pool: &PgPool,
        baby_id: Uuid,
        req: &CreateFeedingLogRequest,
    ) -> anyhow::Result<FeedingLog> {
        let log = sqlx::query_as::<_, FeedingLog>(
            "INSERT INTO feeding_logs (baby_id, feeding_type, start_time, amount_ml)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(baby_id)
        .bind(&req.feeding_type)
        .bind(req.start_time)
        .bind(req.amount_ml)
        .fetch_one(pool)
        .await?;
        Ok(log)
    }

    pub async fn list_feeding(pool: &PgPool, baby_id: Uuid) -> anyhow::Result<Vec<FeedingLog>> {
        let logs = sqlx::query_as::<_, FeedingLog>(
            "SELECT * FROM feeding_logs WHERE baby_id = $1 ORDER BY start_time DESC LIMIT $2",
        )
        .bind(baby_id)
        .bind(LIST_LIMIT)
        .fetch_all(pool)
        .await?;
        Ok(logs)
    }

    pub async fn delete_feeding(pool: &PgPool, baby_id: Uuid, log_id: Uuid) -> anyhow::Result<bool> {
        Self::delete_from(pool, "feeding_logs", baby_id, log_id).await
    }

    // ── Diapers ─────────────────────────────────────────────────────────

    pub async fn add_diaper(
        pool: &PgPool,
        baby_id: Uuid,
        req: &CreateDiaperLogRequest,
    ) -> anyhow::Result<DiaperLog> {
        let log = sqlx::query_as::<_, DiaperLog>(
            "INSERT INTO diaper_logs (baby_id, diaper_type, logged_at)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(baby_id)
        .bind(&req.diaper_type)
        .bind(req.logged_at.unwrap_or_else(Utc::now))
        .fetch_one(pool)
        .await?;
        Ok(log)
    }

    pub async fn list_diapers(pool: &PgPool, baby_id: Uuid) -> anyhow::Result<Vec<DiaperLog>> {
        let logs = sqlx::query_as::<_, DiaperLog>(
            "SELECT * FROM diaper_logs WHERE baby_id = $1 ORDER BY logged_at DESC LIMIT $2",
        )
        .bind(baby_id)
        .bind(LIST_LIMIT)
        .fetch_all(pool)
        .await?;
        Ok(logs)
    }

    pub async fn delete_diaper(pool: &PgPool, baby_id: Uuid, log_id: Uuid) -> anyhow::Result<bool> {
        Self::delete_from(pool, "diaper_logs", baby_id, log_id).await
    }

    // ── Activities ──────────────────────────────────────────────────────

    pub async fn add_activity(
        pool: &PgPool,
        baby_id: Uuid,
        req: &CreateActivityLogRequest,
    ) -> anyhow::Result<ActivityLog> {
        let log = sqlx::query_as::<_, ActivityLog>(
            "INSERT INTO activity_logs (baby_id, activity_type, notes, duration_minutes)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(baby_id)
        .bind(&req.activity_type)
        .bind(&req.notes)
        .bind(req.duration_minutes)
        .fetch_one(pool)
        .await?;
        Ok(log)
    }

    pub async fn list_activities(pool: &PgPool, baby_id: Uuid) -> anyhow::Result<Vec<ActivityLog>> {
        let logs = sqlx::query_as::<_, ActivityLog>(
            "SELECT * FROM activity_logs WHERE baby_id = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(baby_id)
        .bind(LIST_LIMIT)
        .fetch_all(pool)
        .await?;
        Ok(logs)
    }

    pub async fn delete_activity(pool: &PgPool, baby_id: Uuid, log_id: Uuid) -> anyhow::Result<bool> {
        Self::delete_from(pool, "activity_logs", baby_id, log_id).await
    }

    // ── Growth ──────────────────────────────────────────────────────────

    pub async fn add_growth(
        pool: &PgPool,
        baby_id: Uuid,
        req: &CreateGrowthLogRequest,
    ) -> anyhow::Result<GrowthLog> {
        if req.weight_kg.is_none() && req.height_cm.is_none() && req.head_circumference_cm.is_none()
        {
            anyhow::bail!("At least one measurement is required");
        }
        let log = sqlx::query_as::<_, GrowthLog>(
            "INSERT INTO growth_logs (baby_id, measurement_date, weight_kg, height_cm, head_circumference_cm, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(baby_id)
        .bind(req.measurement_date)
        .bind(req.weight_kg)
        .bind(req.height_cm)
        .bind(req.head_circumference_cm)
        .bind(&req.notes)
        .fetch_one(pool)
        .await?;
        Ok(log)
    }

    /// Growth history in measurement order (oldest first, chart-friendly).
    pub async fn list_growth(pool: &PgPool, baby_id: Uuid) -> anyhow::Result<Vec<GrowthLog>> {
        let logs = sqlx::query_as::<_, GrowthLog>(
            "SELECT * FROM growth_logs WHERE baby_id = $1 ORDER BY measurement_date, created_at",
        )
        .bind(baby_id)
        .fetch_all(pool)
        .await?;
        Ok(logs)
    }

    pub async fn delete_growth(pool: &PgPool, baby_id: Uuid, log_id: Uuid) -> anyhow::Result<bool> {
        Self::delete_from(pool, "growth_logs", baby_id, log_id).await
    }

    /// Latest/previous deltas and WHO percentile estimates for the stats cards.
    pub fn growth_summary(
        logs: &[GrowthLog],
        birth_date: chrono::NaiveDate,
        gender: Option<&str>,
    ) -> GrowthSummary {
        let latest = logs.last().cloned();
        let previous = logs.len().checked_sub(2).and_then(|i| logs.get(i));

        let weight_change_kg = match (&latest, previous) {
            (Some(l), Some(p)) => match (l.weight_kg, p.weight_kg) {
                (Some(a), Some(b)) => Some(a - b),
                _ => None,
            },
            _ => None,
        };
        let height_change_cm = match (&latest, previous) {
            (Some(l), Some(p)) => match (l.height_cm, p.height_cm) {
                (Some(a), Some(b)) => Some(a - b),
                _ => None,
            },
            _ => None,
        };

        let (weight_percentile, height_percentile) = match &latest {
            Some(l) => {
                let age = age_in_months(birth_date, l.measurement_date);
                (
                    l.weight_kg
                        .map(|w| growth::percentile(w, age, growth::Measure::Weight, gender)),
                    l.height_cm
                        .map(|h| growth::percentile(h, age, growth::Measure::Height, gender)),
                )
            }
            None => (None, None),
        };

        GrowthSummary {
            latest,
            weight_change_kg,
            height_change_cm,
            weight_percentile,
            height_percentile,
        }
    }

    async fn delete_from(
        pool: &PgPool,
        table: &str,
        baby_id: Uuid,
        log_id: Uuid,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(&format!(
            "DELETE FROM {table} WHERE id = $1 AND baby_id = $2"
        ))
        .bind(log_id)
        .bind(baby_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn growth_log(date: (i32, u32, u32), weight: Option<f64>, height: Option<f64>) -> GrowthLog {
        GrowthLog {
            id: Uuid::new_v4(),
            baby_id: Uuid::new_v4(),
            measurement_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            weight_kg: weight,
            height_cm: height,
            head_circumference_cm: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_growth_summary_deltas() {
        let birth = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let logs = vec![
            growth_log((2025, 3, 1), Some(5.0), Some(58.0)),
            growth_log((2025, 4, 1), Some(5.6), Some(60.5)),
        ];
        let summary = LogService::growth_summary(&logs, birth, Some("male"));
        assert!((summary.weight_change_kg.unwrap() - 0.6).abs() < 1e-9);
        assert!((summary.height_change_cm.unwrap() - 2.5).abs() < 1e-9);
        assert!(summary.weight_percentile.is_some());
    }

    #[test]
    fn test_growth_summary_single_log_has_no_deltas() {
        let birth = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let logs = vec![growth_log((2025, 3, 1), Some(5.0), None)];
        let summary = LogService::growth_summary(&logs, birth, None);
        assert!(summary.weight_change_kg.is_none());
        assert!(summary.height_change_cm.is_none());
        assert!(summary.weight_percentile.is_some());
        assert!(summary.height_percentile.is_none());
    }

    #[test]
    fn test_growth_summary_empty() {
        let birth = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let summary = LogService::growth_summary(&[], birth, None);
        assert!(summary.latest.is_none());
        assert!(summary.weight_percentile.is_none());
    }
}
