use crate::error::StorageError;
use crate::record::{Shortcut, ShortcutRecord, Visit};
use async_trait::async_trait;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A read-only view of a shortcut repository.
///
/// This trait provides only the read operations from [`Repository`],
/// allowing resolution paths to have read-only access.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the full record for a given shortcut.
    /// Returns `None` if the shortcut does not exist.
    async fn get(&self, shortcut: &Shortcut) -> Result<Option<ShortcutRecord>>;

    /// Checks whether a shortcut already exists in the repository.
    async fn exists(&self, shortcut: &Shortcut) -> Result<bool>;
}

/// A keyed document store for shortcut records.
///
/// Implementations must make each operation atomic against concurrent
/// calls for the same shortcut: the conditional writes below are the
/// linearization points for the registry's check-then-act sequences, so
/// none of them may be implemented as a separate read followed by a
/// write.
#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new record. Returns `Err(Conflict)` if the shortcut is
    /// already taken; two concurrent inserts of the same shortcut never
    /// both succeed.
    async fn insert(&self, record: ShortcutRecord) -> Result<()>;

    /// Replaces `target_url` iff a record with this shortcut and this
    /// exact owner exists, leaving every other field untouched.
    /// Returns whether the write applied.
    async fn update_target(
        &self,
        shortcut: &Shortcut,
        owner: &str,
        target_url: &str,
    ) -> Result<bool>;

    /// Deletes the record and its visit history iff the stored owner
    /// matches exactly. Returns whether the delete applied.
    async fn delete(&self, shortcut: &Shortcut, owner: &str) -> Result<bool>;

    /// Appends one visit to the record's log, preserving all prior
    /// entries and their order. Returns `false` without side effects
    /// when the shortcut does not exist; never creates a record.
    async fn push_visit(&self, shortcut: &Shortcut, visit: Visit) -> Result<bool>;
}
