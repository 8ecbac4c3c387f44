use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    catalog::activities::{self, Activity, ActivityCategory},
    models::logs::ActivityLog,
};

#[derive(Debug, Serialize)]
pub struct ActivityLibrary {
    pub baby_age_months: i64,
    pub activities: Vec<&'static Activity>,
    pub completed_this_week: i64,
}

#[derive(Debug, Deserialize)]
pub struct CompleteActivityRequest {
    pub activity_id: String,
    pub notes: Option<String>,
    pub duration_minutes: Option<i32>,
}

pub struct ActivityService;

impl ActivityService {
    /// Age-filtered slice of the activity library plus this week's
    /// completion count for the stats bar.
    pub async fn library(
        pool: &PgPool,
        baby_id: Uuid,
        baby_age_months: i64,
        category: Option<&str>,
    ) -> anyhow::Result<ActivityLibrary> {
        let category = match category {
            Some(c) => Some(
                ActivityCategory::parse(c)
                    .ok_or_else(|| anyhow::anyhow!("Unknown category: {c}"))?,
            ),
            None => None,
        };

        let completed_this_week: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM activity_logs
             WHERE baby_id = $1 AND created_at > NOW() - INTERVAL '7 days'",
        )
        .bind(baby_id)
        .fetch_one(pool)
        .await?;

        Ok(ActivityLibrary {
            baby_age_months,
            activities: activities::filtered(baby_age_months, category),
            completed_this_week,
        })
    }

    /// Uniform random pick from the filtered set; None when nothing fits.
    pub fn surprise(baby_age_months: i64, category: Option<&str>) -> Option<&'static Activity> {
        let category = category.and_then(ActivityCategory::parse);
        activities::surprise(baby_age_months, category)
    }

    /// Record a finished library activity as a play log. The note carries
    /// the activity title, with any free-text note appended.
    pub async fn complete(
        pool: &PgPool,
        baby_id: Uuid,
        req: &CompleteActivityRequest,
    ) -> anyhow::Result<Option<ActivityLog>> {
        let Some(activity) = activities::CATALOG.iter().find(|a| a.id == req.activity_id) else {
            return Ok(None);
        };

        let notes = match req.notes.as_deref().filter(|n| !n.trim().is_empty()) {
            Some(n) => format!("{}: {}", activity.title, n.trim()),
            None => activity.title.to_string(),
        };

        let log = sqlx::query_as::<_, ActivityLog>(
            "INSERT INTO activity_logs (baby_id, activity_type, notes, duration_minutes)
             VALUES ($1, 'play', $2, $3)
             RETURNING *",
        )
        .bind(baby_id)
        .bind(notes)
        .bind(req.duration_minutes.unwrap_or(activity.duration_minutes))
        .fetch_one(pool)
        .await?;

        Ok(Some(log))
    }
}
