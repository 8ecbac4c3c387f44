use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::milestone::{
    BabyMilestone, Milestone, MilestoneGroup, MilestoneOverview, MilestoneStatus, ToggleResult,
};

/// Age buckets of the checklist. A group holds the milestones whose range
/// STARTS inside it; the baby's current bucket is the one containing their
/// age (half-open, so a 6-month-old sits in "6-9 months").
const AGE_GROUPS: &[(&str, i32, i32)] = &[
    ("0-3 months", 0, 3),
    ("3-6 months", 3, 6),
    ("6-9 months", 6, 9),
    ("9-12 months", 9, 12),
    ("12-18 months", 12, 18),
    ("18-24 months", 18, 24),
];

pub struct MilestoneService;

impl MilestoneService {
    /// The full checklist grouped by age bucket, with this baby's
    /// achievement state folded in.
    pub async fn overview(
        pool: &PgPool,
        baby_id: Uuid,
        baby_age_months: i64,
    ) -> anyhow::Result<MilestoneOverview> {
        let milestones = sqlx::query_as::<_, Milestone>(
            "SELECT * FROM milestones ORDER BY age_range_start_months, category, name",
        )
        .fetch_all(pool)
        .await?;

        let achieved = sqlx::query_as::<_, BabyMilestone>(
            "SELECT * FROM baby_milestones WHERE baby_id = $1",
        )
        .bind(baby_id)
        .fetch_all(pool)
        .await?;

        let achieved_count = achieved.len();
        let total_count = milestones.len();

        let groups = AGE_GROUPS
            .iter()
            .map(|&(label, min, max)| {
                let group_milestones: Vec<MilestoneStatus> = milestones
                    .iter()
                    .filter(|m| m.age_range_start_months >= min && m.age_range_start_months < max)
                    .map(|m| {
                        let achievement = achieved.iter().find(|a| a.milestone_id == m.id);
                        MilestoneStatus {
                            milestone: m.clone(),
                            achieved: achievement.is_some(),
                            achieved_date: achievement.map(|a| a.achieved_date),
                        }
                    })
                    .collect();
                MilestoneGroup {
                    label: label.to_string(),
                    age_min: min,
                    age_max: max,
                    is_current: baby_age_months >= min as i64 && baby_age_months < max as i64,
                    milestones: group_milestones,
                }
            })
            .collect();

        Ok(MilestoneOverview {
            baby_age_months,
            achieved_count,
            total_count,
            groups,
        })
    }

    /// Toggle the achievement join row. Toggling twice restores the
    /// original state.
    pub async fn toggle(
        pool: &PgPool,
        baby_id: Uuid,
        milestone_id: Uuid,
    ) -> anyhow::Result<Option<ToggleResult>> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM milestones WHERE id = $1)")
                .bind(milestone_id)
                .fetch_one(pool)
                .await?;
        if !exists {
            return Ok(None);
        }

        let removed = sqlx::query(
            "DELETE FROM baby_milestones WHERE baby_id = $1 AND milestone_id = $2",
        )
        .bind(baby_id)
        .bind(milestone_id)
        .execute(pool)
        .await?;

        if removed.rows_affected() > 0 {
            return Ok(Some(ToggleResult { achieved: false, achieved_date: None }));
        }

        let achieved_date = Utc::now().date_naive();
        sqlx::query(
            "INSERT INTO baby_milestones (baby_id, milestone_id, achieved_date)
             VALUES ($1, $2, $3)
             ON CONFLICT (baby_id, milestone_id) DO NOTHING",
        )
        .bind(baby_id)
        .bind(milestone_id)
        .bind(achieved_date)
        .execute(pool)
        .await?;

        Ok(Some(ToggleResult { achieved: true, achieved_date: Some(achieved_date) }))
    }
}
