use serde::Serialize;
use sqlx::PgPool;

use crate::models::{baby::Baby, logs::SleepLog};

#[derive(Debug, Serialize)]
pub struct Insight {
    pub icon: &'static str,
    pub title: String,
    pub description: String,
    pub tip: &'static str,
}

#[derive(Debug, Serialize)]
pub struct InsightsReport {
    pub baby_age_months: i64,
    pub sleep_log_count: usize,
    pub feeding_log_count: i64,
    pub growth_log_count: i64,
    pub avg_sleep_minutes: Option<i64>,
    pub feedings_last_24h: i64,
    pub latest_weight_kg: Option<f64>,
    pub insights: Vec<Insight>,
}

/// Mean length of finished sleep sessions; open-ended sessions are skipped.
pub fn average_session_minutes(logs: &[SleepLog]) -> Option<i64> {
    let durations: Vec<i64> = logs
        .iter()
        .filter_map(|l| l.end_time.map(|end| (end - l.start_time).num_minutes()))
        .filter(|m| *m > 0)
        .collect();
    if durations.is_empty() {
        return None;
    }
    Some(durations.iter().sum::<i64>() / durations.len() as i64)
}

/// What to watch for at a given age, shown on the milestone card.
pub fn milestone_watch_text(months: i64) -> &'static str {
    if months <= 2 {
        "Watch for: social smiles, tracking objects with eyes, lifting head during tummy time."
    } else if months <= 4 {
        "Watch for: laughing, reaching for toys, rolling from tummy to back."
    } else if months <= 6 {
        "Watch for: sitting with support, babbling, responding to name."
    } else if months <= 9 {
        "Watch for: sitting independently, crawling, saying 'mama' or 'dada'."
    } else if months <= 12 {
        "Watch for: pulling to stand, first words, pointing at objects."
    } else {
        "Watch for: walking, expanding vocabulary, following simple instructions."
    }
}

/// Age-keyed guidance cards, mirroring the data we could compute.
fn age_based_insights(
    months: i64,
    avg_sleep: Option<i64>,
    feedings_last_24h: i64,
    latest_weight_kg: Option<f64>,
    has_growth_logs: bool,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    let sleep_status = match avg_sleep {
        Some(m) => format!("Current average: {m} min per session."),
        None => "Log sleep to track patterns.".to_string(),
    };

    if months <= 3 {
        insights.push(Insight {
            icon: "🌙",
            title: "Sleep Pattern".to_string(),
            description: format!(
                "At {months} months, babies typically sleep 14-17 hours total. {sleep_status}"
            ),
            tip: "Try keeping the room dark during night feeds to help establish day/night rhythm.",
        });
        let feeding_status = if feedings_last_24h > 0 {
            format!("You logged {feedings_last_24h} feedings in the last 24 hours.")
        } else {
            "Track feedings to see patterns.".to_string()
        };
        insights.push(Insight {
            icon: "🍼",
            title: "Feeding Schedule".to_string(),
            description: format!("Newborns feed 8-12 times per day. {feeding_status}"),
            tip: "Watch for hunger cues like rooting, hand-to-mouth, or fussiness.",
        });
    } else if months <= 6 {
        insights.push(Insight {
            icon: "🌙",
            title: "Sleep Consolidation".to_string(),
            description: format!(
                "At {months} months, babies start sleeping longer stretches. {sleep_status}"
            ),
            tip: "Consider establishing a consistent bedtime routine around this age.",
        });
        insights.push(Insight {
            icon: "🥄",
            title: "Solid Foods".to_string(),
            description: "Around 6 months is typically when babies are ready to start solids. Look for signs of readiness.".to_string(),
            tip: "Signs include sitting with support, showing interest in food, and loss of tongue-thrust reflex.",
        });
    } else {
        insights.push(Insight {
            icon: "🌙",
            title: "Sleep Quality".to_string(),
            description: format!(
                "At {months} months, most babies sleep through the night. {sleep_status}"
            ),
            tip: "If sleep regression occurs, it's often temporary. Maintain consistent routines.",
        });
        insights.push(Insight {
            icon: "🍎",
            title: "Nutrition".to_string(),
            description: "Variety is key at this age. Offer different textures and flavors."
                .to_string(),
            tip: "Include iron-rich foods like pureed meats, beans, and fortified cereals.",
        });
    }

    if has_growth_logs {
        let description = match latest_weight_kg {
            Some(w) => format!(
                "Latest weight: {w} kg. Consistent growth is more important than hitting exact percentiles."
            ),
            None => "Add growth measurements for personalized insights.".to_string(),
        };
        insights.push(Insight {
            icon: "📊",
            title: "Growth Tracking".to_string(),
            description,
            tip: "Track growth monthly for the best picture of your baby's development.",
        });
    }

    insights.push(Insight {
        icon: "🎯",
        title: format!("{months} Month Milestones"),
        description: milestone_watch_text(months).to_string(),
        tip: "Every baby develops at their own pace. These are general guidelines.",
    });

    insights
}

pub struct InsightsService;

impl InsightsService {
    /// Read-only composition over the baby's logs. No writes.
    pub async fn for_baby(pool: &PgPool, baby: &Baby) -> anyhow::Result<InsightsReport> {
        let months = crate::catalog::age_in_months(baby.birth_date, chrono::Utc::now().date_naive());

        let sleep_logs = sqlx::query_as::<_, SleepLog>(
            "SELECT * FROM sleep_logs WHERE baby_id = $1 ORDER BY start_time DESC LIMIT 100",
        )
        .bind(baby.id)
        .fetch_all(pool)
        .await?;

        let feeding_log_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM feeding_logs WHERE baby_id = $1")
                .bind(baby.id)
                .fetch_one(pool)
                .await?;

        let feedings_last_24h: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM feeding_logs
             WHERE baby_id = $1 AND created_at > NOW() - INTERVAL '24 hours'",
        )
        .bind(baby.id)
        .fetch_one(pool)
        .await?;

        let growth_log_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM growth_logs WHERE baby_id = $1")
                .bind(baby.id)
                .fetch_one(pool)
                .await?;

        let latest_weight_kg: Option<f64> = sqlx::query_scalar(
            "SELECT weight_kg FROM growth_logs
             WHERE baby_id = $1 AND weight_kg IS NOT NULL
             ORDER BY measurement_date DESC, created_at DESC
             LIMIT 1",
        )
        .bind(baby.id)
        .fetch_optional(pool)
        .await?
        .flatten();

        let avg_sleep_minutes = average_session_minutes(&sleep_logs);
        let insights = age_based_insights(
            months,
            avg_sleep_minutes,
            feedings_last_24h,
            latest_weight_kg,
            growth_log_count > 0,
        );

        Ok(InsightsReport {
            baby_age_months: months,
            sleep_log_count: sleep_logs.len(),
            feeding_log_count,
            growth_log_count,
            avg_sleep_minutes,
            feedings_last_24h,
            latest_weight_kg,
            insights,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn sleep(minutes: Option<i64>) -> SleepLog {
        let start = Utc::now() - Duration::hours(12);
        SleepLog {
            id: Uuid::new_v4(),
            baby_id: Uuid::new_v4(),
            start_time: start,
            end_time: minutes.map(|m| start + Duration::minutes(m)),
            quality: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_average_session_skips_open_sessions() {
        let logs = vec![sleep(Some(60)), sleep(Some(120)), sleep(None)];
        assert_eq!(average_session_minutes(&logs), Some(90));
    }

    #[test]
    fn test_average_session_empty() {
        assert_eq!(average_session_minutes(&[]), None);
        assert_eq!(average_session_minutes(&[sleep(None)]), None);
    }

    #[test]
    fn test_milestone_watch_text_buckets() {
        assert!(milestone_watch_text(0).contains("social smiles"));
        assert!(milestone_watch_text(5).contains("sitting with support"));
        assert!(milestone_watch_text(9).contains("crawling"));
        assert!(milestone_watch_text(20).contains("walking"));
    }

    #[test]
    fn test_insight_cards_by_age() {
        let newborn = age_based_insights(2, None, 0, None, false);
        assert!(newborn.iter().any(|i| i.title == "Feeding Schedule"));

        let half_year = age_based_insights(5, Some(80), 4, None, false);
        assert!(half_year.iter().any(|i| i.title == "Solid Foods"));

        let older = age_based_insights(10, Some(80), 4, Some(9.1), true);
        assert!(older.iter().any(|i| i.title == "Growth Tracking"));
        assert!(older.iter().any(|i| i.title == "10 Month Milestones"));
    }
}
