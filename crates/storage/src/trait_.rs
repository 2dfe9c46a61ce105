//! Storage trait abstractions.

use async_trait::async_trait;
use habitual_core::{Habit, HabitId};
use crate::snapshot::Snapshot;

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Snapshot content is structurally valid JSON but unusable
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Keyed store of habits.
///
/// Repositories hand out owned copies; callers mutate a copy and `save` it
/// back.
pub trait HabitRepository: Send + Sync {
    /// Save a habit (create or replace).
    fn save(&mut self, habit: &Habit) -> Result<()>;

    /// Load a habit by ID.
    fn get_by_id(&self, id: &HabitId) -> Result<Option<Habit>>;

    /// All habits in insertion order, archived ones only when asked.
    fn get_all(&self, include_archived: bool) -> Result<Vec<Habit>>;

    /// Delete a habit. Returns whether it existed.
    fn delete(&mut self, id: &HabitId) -> Result<bool>;
}

/// Backend holding a complete [`Snapshot`].
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    /// Load the stored snapshot, `None` when nothing was stored yet.
    async fn load_snapshot(&self) -> Result<Option<Snapshot>>;

    /// Replace the stored snapshot.
    async fn save_snapshot(&self, snapshot: &Snapshot) -> Result<()>;
}
