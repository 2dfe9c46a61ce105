//! Habit model - a recurring activity with a schedule and completion history.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use crate::calendar::{days_inclusive, weekday_number};
use crate::category::Category;
use crate::clock::Clock;
use crate::frequency::Frequency;
use crate::id::HabitId;
use crate::priority::Priority;

/// Weekday used by weekly habits without explicit days (Monday).
pub const DEFAULT_WEEKDAY: u8 = 1;

/// Day of month used by monthly habits without an explicit day.
pub const DEFAULT_DAY_OF_MONTH: u32 = 1;

/// A recurring activity.
///
/// Completion and due-ness are independent: a habit may be completed on a
/// day it was not due, and that completion still counts toward progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Habit {
    /// Unique identifier
    pub id: HabitId,

    /// Display name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Recurrence rule
    pub frequency: Frequency,

    /// Shared category label
    pub category: Arc<Category>,

    /// Importance
    pub priority: Priority,

    /// Soft-delete flag
    pub archived: bool,

    completed: BTreeSet<NaiveDate>,
    notes: BTreeMap<NaiveDate, String>,
    days_of_week: Option<Vec<u8>>,
    day_of_month: Option<u32>,
}

impl Habit {
    /// Create a new habit with `Medium` priority and no completions.
    pub fn new(
        id: impl Into<HabitId>,
        name: impl Into<String>,
        frequency: Frequency,
        category: Arc<Category>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            frequency,
            category,
            priority: Priority::default(),
            archived: false,
            completed: BTreeSet::new(),
            notes: BTreeMap::new(),
            days_of_week: None,
            day_of_month: None,
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

    // === Attributes ===

    /// Rename the habit.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Replace or clear the description.
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Change the recurrence rule. Schedule overrides are kept.
    pub fn set_frequency(&mut self, frequency: Frequency) {
        self.frequency = frequency;
    }

    /// Change the priority.
    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    /// Soft-delete.
    pub fn archive(&mut self) {
        self.archived = true;
    }

    /// Undo [`Habit::archive`].
    pub fn unarchive(&mut self) {
        self.archived = false;
    }

    // === Schedule ===

    /// Weekdays (0 = Sunday .. 6 = Saturday) a weekly habit is due on.
    ///
    /// Values are deduplicated and sorted. Values above 6 are kept but match
    /// no date, so a selection made only of them is never due. An empty
    /// selection clears the override.
    pub fn set_days_of_week(&mut self, days: impl IntoIterator<Item = u8>) {
        let days: BTreeSet<u8> = days.into_iter().collect();
        self.days_of_week = if days.is_empty() {
            None
        } else {
            Some(days.into_iter().collect())
        };
    }

    /// Remove the weekday override.
    pub fn clear_days_of_week(&mut self) {
        self.days_of_week = None;
    }

    /// Weekday override, if any.
    pub fn days_of_week(&self) -> Option<&[u8]> {
        self.days_of_week.as_deref()
    }

    /// Day of month a monthly habit is due on.
    ///
    /// Stored as given. A value outside 1..=31 matches no date.
    pub fn set_day_of_month(&mut self, day: u32) {
        self.day_of_month = Some(day);
    }

    /// Remove the day-of-month override.
    pub fn clear_day_of_month(&mut self) {
        self.day_of_month = None;
    }

    /// Day-of-month override, if any.
    pub fn day_of_month(&self) -> Option<u32> {
        self.day_of_month
    }

    /// Whether the schedule expects a completion on `date`.
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        match &self.frequency {
            Frequency::Daily => true,
            Frequency::Weekly => match self.days_of_week.as_deref() {
                Some(days) if !days.is_empty() => days.contains(&weekday_number(date)),
                _ => weekday_number(date) == DEFAULT_WEEKDAY,
            },
            Frequency::Monthly => {
                date.day() == self.day_of_month.unwrap_or(DEFAULT_DAY_OF_MONTH)
            }
            Frequency::Unknown(_) => false,
        }
    }

    // === Completion ===

    /// Record a completion. Idempotent.
    pub fn mark_completed(&mut self, date: NaiveDate) {
        self.completed.insert(date);
    }

    /// Remove a completion. Any note for the date is kept.
    pub fn unmark_completed(&mut self, date: NaiveDate) {
        self.completed.remove(&date);
    }

    /// Flip the completion state of `date`.
    pub fn toggle_completed(&mut self, date: NaiveDate) {
        if !self.completed.remove(&date) {
            self.completed.insert(date);
        }
    }

    /// Record a completion with a note, replacing any earlier note.
    pub fn complete_with_note(&mut self, date: NaiveDate, note: impl Into<String>) {
        self.mark_completed(date);
        self.notes.insert(date, note.into());
    }

    /// Note stored for `date`, even if the date was unmarked since.
    pub fn completion_note(&self, date: NaiveDate) -> Option<&str> {
        self.notes.get(&date).map(String::as_str)
    }

    /// All stored notes in date order.
    pub fn completion_notes(&self) -> impl Iterator<Item = (NaiveDate, &str)> {
        self.notes.iter().map(|(d, n)| (*d, n.as_str()))
    }

    /// Whether `date` is recorded as completed.
    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completed.contains(&date)
    }

    /// Completed dates in chronological order.
    pub fn completion_history(&self) -> Vec<NaiveDate> {
        self.completed.iter().copied().collect()
    }

    /// Number of completed dates.
    pub fn completion_count(&self) -> usize {
        self.completed.len()
    }

    /// Most recent completion.
    pub fn last_completed(&self) -> Option<NaiveDate> {
        self.completed.iter().next_back().copied()
    }

    // === Streaks ===

    /// Consecutive completed days ending today, according to `clock`.
    pub fn current_streak(&self, clock: &dyn Clock) -> usize {
        self.current_streak_on(clock.today())
    }

    /// Consecutive completed days ending on `today`.
    ///
    /// Zero when `today` itself is not completed, even if yesterday closed a
    /// run.
    pub fn current_streak_on(&self, today: NaiveDate) -> usize {
        let mut count = 0;
        let mut cursor = Some(today);
        while let Some(day) = cursor {
            if !self.completed.contains(&day) {
                break;
            }
            count += 1;
            cursor = day.pred_opt();
        }
        count
    }

    /// Longest run of consecutive completed days anywhere in the history.
    pub fn longest_streak(&self) -> usize {
        let mut longest = 0;
        let mut run = 0;
        let mut previous: Option<NaiveDate> = None;

        for day in &self.completed {
            run = match previous.and_then(|p| p.succ_opt()) {
                Some(next) if next == *day => run + 1,
                _ => 1,
            };
            longest = longest.max(run);
            previous = Some(*day);
        }
        longest
    }

    // === Progress ===

    /// Completed share of expected occurrences between `start` and `end`
    /// (inclusive).
    ///
    /// Every completion inside the range counts, due or not. Zero when the
    /// range holds no due day. Capped at 1.0.
    pub fn progress(&self, start: NaiveDate, end: NaiveDate) -> f64 {
        if start > end {
            return 0.0;
        }

        let expected = days_inclusive(start, end)
            .filter(|day| self.is_due_on(*day))
            .count();
        if expected == 0 {
            return 0.0;
        }

        let completed = self.completed.range(start..=end).count();
        (completed as f64 / expected as f64).min(1.0)
    }
}
