use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::synced_entity;

/// Step count for one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Steps {
    pub id: Uuid,
    pub owner_id: String,
    pub date: NaiveDate,
    pub count: i64,
    pub date_modified: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Steps {
    pub fn new(owner_id: impl Into<String>, date: NaiveDate, count: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            date,
            count,
            date_modified: Utc::now(),
            deleted_at: None,
        }
    }
}

impl fmt::Display for Steps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {} steps", self.date, self.count)
    }
}

synced_entity!(Steps, "steps");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_display() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let steps = Steps::new("user1", date, 10423);
        assert_eq!(steps.to_string(), "2025-06-01  10423 steps");
    }
}
