use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::synced_entity;

/// Body site a tape measurement was taken at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSite {
    Neck,
    Chest,
    Waist,
    Hips,
    Thigh,
    Arm,
}

impl fmt::Display for MeasurementSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MeasurementSite::Neck => "neck",
            MeasurementSite::Chest => "chest",
            MeasurementSite::Waist => "waist",
            MeasurementSite::Hips => "hips",
            MeasurementSite::Thigh => "thigh",
            MeasurementSite::Arm => "arm",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for MeasurementSite {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "neck" => Ok(MeasurementSite::Neck),
            "chest" => Ok(MeasurementSite::Chest),
            "waist" => Ok(MeasurementSite::Waist),
            "hips" => Ok(MeasurementSite::Hips),
            "thigh" => Ok(MeasurementSite::Thigh),
            "arm" => Ok(MeasurementSite::Arm),
            other => Err(format!(
                "unknown measurement site '{}' (expected neck, chest, waist, hips, thigh, or arm)",
                other
            )),
        }
    }
}

/// A tape measurement at one body site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyMeasurementEntry {
    pub id: Uuid,
    pub owner_id: String,
    pub site: MeasurementSite,
    pub centimeters: f64,
    pub recorded_on: NaiveDate,
    pub date_modified: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl BodyMeasurementEntry {
    pub fn new(
        owner_id: impl Into<String>,
        site: MeasurementSite,
        centimeters: f64,
        recorded_on: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            site,
            centimeters,
            recorded_on,
            date_modified: Utc::now(),
            deleted_at: None,
        }
    }
}

impl fmt::Display for BodyMeasurementEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {}: {:.1} cm",
            self.recorded_on, self.site, self.centimeters
        )
    }
}

synced_entity!(BodyMeasurementEntry, "body_measurements");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_roundtrip() {
        for site in [
            MeasurementSite::Neck,
            MeasurementSite::Chest,
            MeasurementSite::Waist,
            MeasurementSite::Hips,
            MeasurementSite::Thigh,
            MeasurementSite::Arm,
        ] {
            assert_eq!(MeasurementSite::from_str(&site.to_string()).unwrap(), site);
        }
    }

    #[test]
    fn test_display() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 2).unwrap();
        let entry = BodyMeasurementEntry::new("user1", MeasurementSite::Waist, 84.5, date);
        assert_eq!(entry.to_string(), "2025-04-02  waist: 84.5 cm");
    }
}
