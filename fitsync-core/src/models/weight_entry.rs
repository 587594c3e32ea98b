use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::synced_entity;

/// A single body-weight measurement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightEntry {
    pub id: Uuid,
    pub owner_id: String,
    pub weight_kg: f64,
    pub recorded_on: NaiveDate,
    pub note: Option<String>,
    pub date_modified: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl WeightEntry {
    pub fn new(owner_id: impl Into<String>, weight_kg: f64, recorded_on: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            weight_kg,
            recorded_on,
            note: None,
            date_modified: Utc::now(),
            deleted_at: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

impl fmt::Display for WeightEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {:.1} kg", self.recorded_on, self.weight_kg)?;
        if let Some(note) = &self.note {
            write!(f, "  ({})", note)?;
        }
        Ok(())
    }
}

synced_entity!(WeightEntry, "weight_entries");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::SyncedEntity;

    #[test]
    fn test_weight_entry_new() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap();
        let entry = WeightEntry::new("user1", 81.4, date);

        assert_eq!(entry.owner_id, "user1");
        assert_eq!(entry.weight_kg, 81.4);
        assert_eq!(entry.recorded_on, date);
        assert!(entry.note.is_none());
        assert!(entry.deleted_at.is_none());
    }

    #[test]
    fn test_mark_deleted_bumps_date_modified() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap();
        let mut entry = WeightEntry::new("user1", 81.4, date);
        let before = entry.date_modified;

        let at = before + chrono::Duration::seconds(5);
        entry.mark_deleted(at);

        assert!(entry.is_deleted());
        assert_eq!(entry.deleted_at, Some(at));
        assert_eq!(entry.date_modified, at);
    }

    #[test]
    fn test_json_roundtrip() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap();
        let entry = WeightEntry::new("user1", 81.4, date).with_note("after run");

        let json = serde_json::to_string(&entry).unwrap();
        let parsed: WeightEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.id, entry.id);
        assert_eq!(parsed.weight_kg, entry.weight_kg);
        assert_eq!(parsed.note, entry.note);
    }
}
