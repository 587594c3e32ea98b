//! SQLite-backed local entity store.
//!
//! One table per entity family (named by `E::COLLECTION`), each row holding
//! the sync metadata columns used for filtering plus the full entity
//! serialized as JSON. Timestamps are stored as RFC 3339 TEXT.

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use fitsync_core::{LocalStore, StoreError, SyncedEntity};

pub struct SqliteEntityStore<E> {
    pool: SqlitePool,
    _entity: PhantomData<fn() -> E>,
}

#[derive(sqlx::FromRow)]
struct PayloadRow {
    payload: String,
}

impl<E: SyncedEntity> SqliteEntityStore<E> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    fn decode(row: PayloadRow) -> Result<E, StoreError> {
        serde_json::from_str(&row.payload)
            .map_err(|e| StoreError::Storage(format!("corrupt {} row: {}", E::COLLECTION, e)))
    }

    fn encode(entity: &E) -> Result<String, StoreError> {
        serde_json::to_string(entity).map_err(|e| StoreError::Storage(e.to_string()))
    }

    async fn exists(&self, owner_id: &str, id: Uuid) -> Result<bool, StoreError> {
        let sql = format!(
            "SELECT id FROM {} WHERE owner_id = ? AND id = ?",
            E::COLLECTION
        );
        let row: Option<(String,)> = sqlx::query_as(&sql)
            .bind(owner_id)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(row.is_some())
    }
}

fn db_error(e: sqlx::Error) -> StoreError {
    StoreError::Storage(e.to_string())
}

#[async_trait]
impl<E: SyncedEntity> LocalStore<E> for SqliteEntityStore<E> {
    async fn create(&self, entity: &E) -> Result<(), StoreError> {
        if self.exists(entity.owner_id(), entity.id()).await? {
            return Err(StoreError::AlreadyExists(entity.id().to_string()));
        }

        let sql = format!(
            "INSERT INTO {} (id, owner_id, date_modified, deleted_at, payload) VALUES (?, ?, ?, ?, ?)",
            E::COLLECTION
        );
        sqlx::query(&sql)
            .bind(entity.id().to_string())
            .bind(entity.owner_id())
            .bind(entity.date_modified().to_rfc3339())
            .bind(entity.deleted_at().map(|t| t.to_rfc3339()))
            .bind(Self::encode(entity)?)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }

    async fn get(&self, owner_id: &str, id: Uuid) -> Result<E, StoreError> {
        let sql = format!(
            "SELECT payload FROM {} WHERE owner_id = ? AND id = ?",
            E::COLLECTION
        );
        let row: Option<PayloadRow> = sqlx::query_as(&sql)
            .bind(owner_id)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        match row {
            Some(row) => Self::decode(row),
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    async fn list(&self, owner_id: &str, include_deleted: bool) -> Result<Vec<E>, StoreError> {
        let sql = if include_deleted {
            format!(
                "SELECT payload FROM {} WHERE owner_id = ? ORDER BY date_modified, id",
                E::COLLECTION
            )
        } else {
            format!(
                "SELECT payload FROM {} WHERE owner_id = ? AND deleted_at IS NULL ORDER BY date_modified, id",
                E::COLLECTION
            )
        };
        let rows: Vec<PayloadRow> = sqlx::query_as(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        rows.into_iter().map(Self::decode).collect()
    }

    async fn update(&self, entity: &E) -> Result<(), StoreError> {
        let sql = format!(
            "UPDATE {} SET date_modified = ?, deleted_at = ?, payload = ? WHERE owner_id = ? AND id = ?",
            E::COLLECTION
        );
        let result = sqlx::query(&sql)
            .bind(entity.date_modified().to_rfc3339())
            .bind(entity.deleted_at().map(|t| t.to_rfc3339()))
            .bind(Self::encode(entity)?)
            .bind(entity.owner_id())
            .bind(entity.id().to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(entity.id().to_string()));
        }
        Ok(())
    }

    async fn delete(&self, entity: &E) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {} WHERE owner_id = ? AND id = ?", E::COLLECTION);
        sqlx::query(&sql)
            .bind(entity.owner_id())
            .bind(entity.id().to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use chrono::NaiveDate;
    use fitsync_core::{MealLog, MealType, WeightEntry};
    use tempfile::TempDir;

    async fn setup() -> (SqliteEntityStore<WeightEntry>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_db(temp_dir.path().join("test.db")).await.unwrap();
        (SqliteEntityStore::new(pool), temp_dir)
    }

    fn entry(kg: f64) -> WeightEntry {
        WeightEntry::new("user1", kg, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
    }

    #[tokio::test]
    async fn test_create_and_get_roundtrip() {
        let (store, _temp) = setup().await;
        let e = entry(82.4).with_note("morning");

        store.create(&e).await.unwrap();
        let fetched = store.get("user1", e.id).await.unwrap();

        assert_eq!(fetched.id, e.id);
        assert_eq!(fetched.weight_kg, 82.4);
        assert_eq!(fetched.note.as_deref(), Some("morning"));
        assert_eq!(fetched.date_modified, e.date_modified);
    }

    #[tokio::test]
    async fn test_create_duplicate_id_fails() {
        let (store, _temp) = setup().await;
        let e = entry(82.4);
        store.create(&e).await.unwrap();

        let err = store.create(&e).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let (store, _temp) = setup().await;
        let err = store.get("user1", Uuid::new_v4()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_replaces_payload() {
        let (store, _temp) = setup().await;
        let mut e = entry(82.4);
        store.create(&e).await.unwrap();

        e.weight_kg = 81.9;
        e.touch();
        store.update(&e).await.unwrap();

        let fetched = store.get("user1", e.id).await.unwrap();
        assert_eq!(fetched.weight_kg, 81.9);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (store, _temp) = setup().await;
        let err = store.update(&entry(82.4)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_filters_tombstones_unless_asked() {
        let (store, _temp) = setup().await;
        let live = entry(82.4);
        let mut dead = entry(90.0);
        dead.mark_deleted(chrono::Utc::now());

        store.create(&live).await.unwrap();
        store.create(&dead).await.unwrap();

        let visible = store.list("user1", false).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, live.id);

        let all = store.list("user1", true).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_list_scoped_to_owner() {
        let (store, _temp) = setup().await;
        store.create(&entry(82.4)).await.unwrap();
        store
            .create(&WeightEntry::new(
                "user2",
                70.0,
                NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            ))
            .await
            .unwrap();

        assert_eq!(store.list("user1", true).await.unwrap().len(), 1);
        assert_eq!(store.list("user2", true).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_purges_row() {
        let (store, _temp) = setup().await;
        let e = entry(82.4);
        store.create(&e).await.unwrap();

        store.delete(&e).await.unwrap();
        assert!(store.get("user1", e.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_families_use_disjoint_tables() {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_db(temp_dir.path().join("test.db")).await.unwrap();
        let weights: SqliteEntityStore<WeightEntry> = SqliteEntityStore::new(pool.clone());
        let meals: SqliteEntityStore<MealLog> = SqliteEntityStore::new(pool);

        weights.create(&entry(82.4)).await.unwrap();
        let log = MealLog::new(
            "user1",
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            MealType::Lunch,
        );
        meals.create(&log).await.unwrap();

        assert_eq!(weights.list("user1", true).await.unwrap().len(), 1);
        assert_eq!(meals.list("user1", true).await.unwrap().len(), 1);
    }
}
