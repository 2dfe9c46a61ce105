//! Habit tracking service layer.
//!
//! [`HabitManager`] owns categories and goals, stores habits through a
//! [`habitual_storage::HabitRepository`] and computes progress across them.
//! [`SnapshotStore`] persists the whole state through a snapshot provider.

#![warn(missing_docs)]

pub mod manager;
pub mod notifier;
pub mod persistence;

pub use manager::{
    GoalProgressSummary, HabitManager, NewHabit, DEFAULT_CATEGORY_ID, DEFAULT_CATEGORY_NAME,
};
pub use notifier::{ConsoleNotifier, Notifier, TracingNotifier};
pub use persistence::{RestoreReport, SnapshotStore};
