//! Entity families tracked by the app.
//!
//! Every model carries the same sync metadata (`id`, `owner_id`,
//! `date_modified`, `deleted_at`) alongside its domain payload, and
//! implements [`SyncedEntity`](crate::entity::SyncedEntity) through the
//! `synced_entity!` impl below.

mod body_measurement;
mod gym_profile;
mod meal_log;
mod meal_type;
mod steps;
mod weight_entry;
mod weight_goal;
mod workout_session;

pub use body_measurement::{BodyMeasurementEntry, MeasurementSite};
pub use gym_profile::GymProfile;
pub use meal_log::MealLog;
pub use meal_type::MealType;
pub use steps::Steps;
pub use weight_entry::WeightEntry;
pub use weight_goal::WeightGoal;
pub use workout_session::WorkoutSession;

/// Implements `SyncedEntity` for a model with the standard metadata fields.
macro_rules! synced_entity {
    ($model:ty, $collection:literal) => {
        impl $crate::entity::SyncedEntity for $model {
            const COLLECTION: &'static str = $collection;

            fn id(&self) -> uuid::Uuid {
                self.id
            }

            fn owner_id(&self) -> &str {
                &self.owner_id
            }

            fn date_modified(&self) -> chrono::DateTime<chrono::Utc> {
                self.date_modified
            }

            fn set_date_modified(&mut self, at: chrono::DateTime<chrono::Utc>) {
                self.date_modified = at;
            }

            fn deleted_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
                self.deleted_at
            }

            fn set_deleted_at(&mut self, at: Option<chrono::DateTime<chrono::Utc>>) {
                self.deleted_at = at;
            }
        }
    };
}

pub(crate) use synced_entity;
