//! Entity contract shared by every synced collection.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

/// Contract every synced entity family implements.
///
/// The reconciler only ever looks at the fields exposed here; the rest of the
/// entity is an opaque payload that travels with them. `id` and `owner_id`
/// are immutable after creation.
///
/// `date_modified` is the sole conflict signal. It is wall-clock time set by
/// whichever device performed the mutation, so two edits within the same
/// clock tick (or across skewed clocks) resolve arbitrarily and one of them
/// is silently lost. This is a documented limitation of the timestamp-wins
/// policy, not something callers can detect or recover from.
pub trait SyncedEntity:
    Clone + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Collection name: the local table and the remote path segment.
    const COLLECTION: &'static str;

    fn id(&self) -> Uuid;
    fn owner_id(&self) -> &str;

    fn date_modified(&self) -> DateTime<Utc>;
    fn set_date_modified(&mut self, at: DateTime<Utc>);

    fn deleted_at(&self) -> Option<DateTime<Utc>>;
    fn set_deleted_at(&mut self, at: Option<DateTime<Utc>>);

    /// A tombstoned entity is excluded from normal reads but still
    /// participates in reconciliation until both stores carry the tombstone.
    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }

    /// Marks a mutation by bumping `date_modified` to now.
    fn touch(&mut self) {
        self.set_date_modified(Utc::now());
    }

    /// Turns the entity into a tombstone. Deletion is a special-case update,
    /// never a hard remove, so the tombstone can propagate between stores.
    fn mark_deleted(&mut self, at: DateTime<Utc>) {
        self.set_deleted_at(Some(at));
        self.set_date_modified(at);
    }
}
