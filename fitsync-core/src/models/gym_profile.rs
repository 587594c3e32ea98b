use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::synced_entity;

/// A gym the user trains at, with the equipment available there.
///
/// `photo_url` is only ever set after the photo bytes have been uploaded;
/// see [`GymProfileManager`](crate::manager::GymProfileManager).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GymProfile {
    pub id: Uuid,
    pub owner_id: String,
    pub name: String,
    pub equipment: Vec<String>,
    pub photo_url: Option<String>,
    pub date_modified: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl GymProfile {
    pub fn new(owner_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            name: name.into(),
            equipment: Vec::new(),
            photo_url: None,
            date_modified: Utc::now(),
            deleted_at: None,
        }
    }

    pub fn with_equipment(mut self, equipment: Vec<String>) -> Self {
        self.equipment = equipment;
        self
    }
}

impl fmt::Display for GymProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.equipment.is_empty() {
            write!(f, " [{}]", self.equipment.join(", "))?;
        }
        Ok(())
    }
}

synced_entity!(GymProfile, "gym_profiles");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gym_profile_new() {
        let profile = GymProfile::new("user1", "Iron Temple");
        assert_eq!(profile.name, "Iron Temple");
        assert!(profile.equipment.is_empty());
        assert!(profile.photo_url.is_none());
    }

    #[test]
    fn test_gym_profile_display_lists_equipment() {
        let profile = GymProfile::new("user1", "Iron Temple")
            .with_equipment(vec!["barbell".into(), "rack".into()]);
        let text = profile.to_string();
        assert!(text.contains("Iron Temple"));
        assert!(text.contains("barbell"));
    }
}
