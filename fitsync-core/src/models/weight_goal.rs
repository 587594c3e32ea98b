use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::synced_entity;

/// A target weight with a deadline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightGoal {
    pub id: Uuid,
    pub owner_id: String,
    pub start_kg: f64,
    pub target_kg: f64,
    pub target_date: NaiveDate,
    pub date_modified: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl WeightGoal {
    pub fn new(
        owner_id: impl Into<String>,
        start_kg: f64,
        target_kg: f64,
        target_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            start_kg,
            target_kg,
            target_date,
            date_modified: Utc::now(),
            deleted_at: None,
        }
    }

    /// Fraction of the way from start to target, clamped to `0.0..=1.0`.
    pub fn progress(&self, current_kg: f64) -> f64 {
        let total = self.start_kg - self.target_kg;
        if total.abs() < f64::EPSILON {
            return 1.0;
        }
        ((self.start_kg - current_kg) / total).clamp(0.0, 1.0)
    }
}

synced_entity!(WeightGoal, "weight_goals");

#[cfg(test)]
mod tests {
    use super::*;

    fn goal() -> WeightGoal {
        WeightGoal::new(
            "user1",
            90.0,
            80.0,
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        )
    }

    #[test]
    fn test_progress_midway() {
        assert!((goal().progress(85.0) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_progress_clamped() {
        assert_eq!(goal().progress(95.0), 0.0);
        assert_eq!(goal().progress(75.0), 1.0);
    }
}
