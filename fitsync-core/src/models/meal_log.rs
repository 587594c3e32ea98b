use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::meal_type::MealType;
use super::synced_entity;

/// A meal that was actually eaten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealLog {
    pub id: Uuid,
    pub owner_id: String,
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub calories: Option<i32>,
    pub notes: Option<String>,
    pub date_modified: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl MealLog {
    pub fn new(owner_id: impl Into<String>, date: NaiveDate, meal_type: MealType) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            date,
            meal_type,
            calories: None,
            notes: None,
            date_modified: Utc::now(),
            deleted_at: None,
        }
    }

    pub fn with_calories(mut self, calories: i32) -> Self {
        self.calories = Some(calories);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

impl fmt::Display for MealLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.date, self.meal_type)?;
        if let Some(calories) = self.calories {
            write!(f, "  {} kcal", calories)?;
        }
        if let Some(notes) = &self.notes {
            write!(f, "  ({})", notes)?;
        }
        Ok(())
    }
}

synced_entity!(MealLog, "meal_logs");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_log_new() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let log = MealLog::new("user1", date, MealType::Dinner);

        assert_eq!(log.date, date);
        assert_eq!(log.meal_type, MealType::Dinner);
        assert!(log.calories.is_none());
        assert!(log.notes.is_none());
    }

    #[test]
    fn test_meal_log_builders() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let log = MealLog::new("user1", date, MealType::Lunch)
            .with_calories(640)
            .with_notes("ate out");

        assert_eq!(log.calories, Some(640));
        assert_eq!(log.notes, Some("ate out".to_string()));
    }

    #[test]
    fn test_meal_log_display() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let log = MealLog::new("user1", date, MealType::Dinner).with_calories(820);

        let text = log.to_string();
        assert!(text.contains("2025-01-15"));
        assert!(text.contains("dinner"));
        assert!(text.contains("820 kcal"));
    }
}
