//! Storage abstraction and implementations for habitual.
//!
//! This crate provides the habit repository contract, the snapshot DTOs and
//! the providers that persist a snapshot (in memory or as a JSON file).

#![warn(missing_docs)]

pub mod trait_;
#[allow(missing_docs)]
pub mod snapshot;
pub mod memory;
pub mod json_storage;

pub use trait_::{HabitRepository, SnapshotProvider, StorageError, Result};
pub use snapshot::{Snapshot, CategoryDto, HabitDto, GoalDto};
pub use memory::{InMemoryHabitRepository, InMemorySnapshotProvider};
pub use json_storage::JsonFileStorage;
