//! Fitsync Core Library
//!
//! Shared types and reconciliation logic for Fitsync applications.
//!
//! Every tracked collection (gym profiles, weight entries, goals, meal logs,
//! workout sessions, steps) lives in two places at once: a local store that
//! the device reads and writes immediately, and a remote store that persists
//! across devices. This crate provides the entity contract shared by all of
//! them, the store interfaces, the timestamp-wins [`Reconciler`] that keeps
//! the two stores in agreement, and the [`EntityManager`] that callers use.

pub mod entity;
pub mod error;
pub mod manager;
pub mod models;
pub mod reconcile;
pub mod store;

pub use entity::SyncedEntity;
pub use error::StoreError;
pub use manager::{AssetUploader, EntityManager, GymProfileManager};
pub use models::{
    BodyMeasurementEntry, GymProfile, MealLog, MealType, MeasurementSite, Steps, WeightEntry,
    WeightGoal, WorkoutSession,
};
pub use reconcile::{ReconcileFailure, ReconcileOutcome, Reconciler};
pub use store::{LocalStore, MemoryStore, RemoteStore};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
