use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Milestone {
    pub id: Uuid,
    pub category: String, // Motor | Social | Communication | Cognitive
    pub name: String,
    pub description: String,
    pub age_range_start_months: i32,
    pub age_range_end_months: i32,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BabyMilestone {
    pub id: Uuid,
    pub baby_id: Uuid,
    pub milestone_id: Uuid,
    pub achieved_date: NaiveDate,
}

/// Milestone plus the achievement state for one baby.
#[derive(Debug, Serialize)]
pub struct MilestoneStatus {
    #[serde(flatten)]
    pub milestone: Milestone,
    pub achieved: bool,
    pub achieved_date: Option<NaiveDate>,
}

/// One age bucket of the milestone checklist.
#[derive(Debug, Serialize)]
pub struct MilestoneGroup {
    pub label: String,
    pub age_min: i32,
    pub age_max: i32,
    pub is_current: bool,
    pub milestones: Vec<MilestoneStatus>,
}

#[derive(Debug, Serialize)]
pub struct MilestoneOverview {
    pub baby_age_months: i64,
    pub achieved_count: usize,
    pub total_count: usize,
    pub groups: Vec<MilestoneGroup>,
}

#[derive(Debug, Serialize)]
pub struct ToggleResult {
    pub achieved: bool,
    pub achieved_date: Option<NaiveDate>,
}
