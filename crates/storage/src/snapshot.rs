//! Snapshot DTOs - the serialized form of the complete state.
//!
//! Optional fields are omitted rather than written as `null`. Dates stay
//! plain strings here; turning them into calendar dates (and skipping
//! malformed ones) is the loader's job.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use habitual_core::{Frequency, Priority};

/// Complete state: categories, habits and goals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// All categories
    #[serde(default)]
    pub categories: Vec<CategoryDto>,

    /// All habits, archived included
    #[serde(default)]
    pub habits: Vec<HabitDto>,

    /// All goals
    #[serde(default)]
    pub goals: Vec<GoalDto>,
}

impl Snapshot {
    /// Whether the snapshot holds nothing at all.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.habits.is_empty() && self.goals.is_empty()
    }
}

/// Serialized category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Serialized habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitDto {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub frequency: Frequency,
    pub category_id: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub completed_dates: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_notes: Option<BTreeMap<String, String>>,
    /// Read wide; values outside the schedule range are mapped on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<i64>,
}

/// Serialized goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDto {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub habit_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}
