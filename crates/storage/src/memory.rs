//! In-memory storage implementations.

use std::sync::Arc;
use habitual_core::{Habit, HabitId};
use tokio::sync::Mutex;
use tracing::debug;
use super::{HabitRepository, Result, Snapshot, SnapshotProvider};

/// Habit repository backed by a vector, keeping first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHabitRepository {
    habits: Vec<Habit>,
}

impl InMemoryHabitRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: &HabitId) -> Option<usize> {
        self.habits.iter().position(|h| &h.id == id)
    }
}

impl HabitRepository for InMemoryHabitRepository {
    fn save(&mut self, habit: &Habit) -> Result<()> {
        match self.position(&habit.id) {
            Some(idx) => self.habits[idx] = habit.clone(),
            None => self.habits.push(habit.clone()),
        }
        debug!(habit = %habit.id, "saved habit");
        Ok(())
    }

    fn get_by_id(&self, id: &HabitId) -> Result<Option<Habit>> {
        Ok(self.position(id).map(|idx| self.habits[idx].clone()))
    }

    fn get_all(&self, include_archived: bool) -> Result<Vec<Habit>> {
        Ok(self
            .habits
            .iter()
            .filter(|h| include_archived || !h.archived)
            .cloned()
            .collect())
    }

    fn delete(&mut self, id: &HabitId) -> Result<bool> {
        match self.position(id) {
            Some(idx) => {
                self.habits.remove(idx);
                debug!(habit = %id, "deleted habit");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Snapshot provider that keeps a private copy in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotProvider {
    snapshot: Arc<Mutex<Option<Snapshot>>>,
}

impl InMemorySnapshotProvider {
    /// Create a provider, optionally pre-seeded.
    pub fn new(initial: Option<Snapshot>) -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(initial)),
        }
    }
}

#[async_trait::async_trait]
impl SnapshotProvider for InMemorySnapshotProvider {
    async fn load_snapshot(&self) -> Result<Option<Snapshot>> {
        Ok(self.snapshot.lock().await.clone())
    }

    async fn save_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        *self.snapshot.lock().await = Some(snapshot.clone());
        Ok(())
    }
}
