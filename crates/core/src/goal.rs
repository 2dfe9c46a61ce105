//! Goal model - a named objective aggregating habits.

use chrono::NaiveDate;
use crate::habit::Habit;
use crate::id::{GoalId, HabitId};
use crate::priority::Priority;

/// A goal groups habits under an optional due date.
///
/// Goals reference habits by id only. The habits themselves live in the
/// repository and may belong to several goals at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    /// Unique identifier
    pub id: GoalId,

    /// Goal name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Importance
    pub priority: Priority,

    /// Deadline used when progress is asked for without an end date
    pub due_date: Option<NaiveDate>,

    habit_ids: Vec<HabitId>,
}

impl Goal {
    /// Create an empty goal with `Medium` priority.
    pub fn new(id: impl Into<GoalId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            priority: Priority::default(),
            due_date: None,
            habit_ids: Vec::new(),
        }
    }

    /// Set priority (builder).
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set description (builder).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set due date (builder).
    pub fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Reference habits (builder).
    pub fn with_habits(mut self, ids: impl IntoIterator<Item = HabitId>) -> Self {
        for id in ids {
            self.add_habit(id);
        }
        self
    }

    /// Rename the goal.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Change the priority.
    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    /// Replace or clear the due date.
    pub fn set_due_date(&mut self, due: Option<NaiveDate>) {
        self.due_date = due;
    }

    /// Replace or clear the description.
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Reference a habit. Already referenced ids are ignored.
    pub fn add_habit(&mut self, id: HabitId) {
        if !self.habit_ids.contains(&id) {
            self.habit_ids.push(id);
        }
    }

    /// Drop a habit reference. Unknown ids are ignored.
    pub fn remove_habit(&mut self, id: &HabitId) {
        self.habit_ids.retain(|h| h != id);
    }

    /// Referenced habit ids in insertion order.
    pub fn habit_ids(&self) -> &[HabitId] {
        &self.habit_ids
    }

    /// Whether the goal references `id`.
    pub fn contains_habit(&self, id: &HabitId) -> bool {
        self.habit_ids.contains(id)
    }

    /// Mean progress of `members` from `start` to the effective end date.
    ///
    /// `members` are this goal's habits as resolved by the caller. An explicit
    /// `end` wins over the due date. Zero without an end date or without
    /// members. Every habit weighs the same regardless of priority.
    pub fn progress(&self, members: &[Habit], start: NaiveDate, end: Option<NaiveDate>) -> f64 {
        let Some(end) = end.or(self.due_date) else {
            return 0.0;
        };
        if members.is_empty() {
            return 0.0;
        }

        let total: f64 = members.iter().map(|h| h.progress(start, end)).sum();
        total / members.len() as f64
    }
}
