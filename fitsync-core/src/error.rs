//! Store error taxonomy.

use thiserror::Error;

/// Errors raised by local and remote entity stores.
///
/// There is deliberately no conflict variant: all conflicts are resolved
/// automatically by timestamp comparison and never surface to callers.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Requested id absent in the store.
    #[error("not found: {0}")]
    NotFound(String),

    /// Create called for an id already present.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Network failure, timeout, or service unavailable. Recoverable on the
    /// next reconciliation pass; must never be read as "entity absent".
    #[error("transient store failure: {0}")]
    Transient(String),

    /// Backend fault (corrupt row, I/O error, bad response body).
    #[error("storage failure: {0}")]
    Storage(String),
}

impl StoreError {
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Transient(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
