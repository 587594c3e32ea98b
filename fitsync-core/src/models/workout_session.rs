use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::synced_entity;

/// A completed training session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub id: Uuid,
    pub owner_id: String,
    pub title: String,
    pub started_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub gym_profile_id: Option<Uuid>,
    pub notes: Option<String>,
    pub date_modified: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl WorkoutSession {
    pub fn new(
        owner_id: impl Into<String>,
        title: impl Into<String>,
        started_at: DateTime<Utc>,
        duration_minutes: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            title: title.into(),
            started_at,
            duration_minutes,
            gym_profile_id: None,
            notes: None,
            date_modified: Utc::now(),
            deleted_at: None,
        }
    }

    pub fn with_gym_profile_id(mut self, gym_profile_id: Uuid) -> Self {
        self.gym_profile_id = Some(gym_profile_id);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

impl fmt::Display for WorkoutSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {} ({} min)",
            self.started_at.format("%Y-%m-%d %H:%M"),
            self.title,
            self.duration_minutes
        )
    }
}

synced_entity!(WorkoutSession, "workout_sessions");
