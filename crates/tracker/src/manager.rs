//! Habit manager - orchestration over the repository, categories and goals.

use std::sync::Arc;

use chrono::NaiveDate;
use habitual_core::{
    Category, CategoryId, Clock, Frequency, Goal, GoalId, Habit, HabitId, Priority, SystemClock,
};
use habitual_storage::{HabitRepository, Result};
use tracing::debug;

use crate::notifier::{Notifier, TracingNotifier};

/// Id of the category used when a habit is created without one.
pub const DEFAULT_CATEGORY_ID: &str = "default";

/// Name of the default category.
pub const DEFAULT_CATEGORY_NAME: &str = "General";

/// Specification for creating a habit.
#[derive(Debug, Clone)]
pub struct NewHabit {
    /// Explicit id, generated when absent
    pub id: Option<HabitId>,
    /// Display name
    pub name: String,
    /// Recurrence rule
    pub frequency: Frequency,
    /// Category, the default category when absent
    pub category: Option<Arc<Category>>,
    /// Importance
    pub priority: Priority,
    /// Optional description
    pub description: Option<String>,
}

impl NewHabit {
    /// A daily, medium-priority habit named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            frequency: Frequency::Daily,
            category: None,
            priority: Priority::default(),
            description: None,
        }
    }

    /// Use an explicit id.
    pub fn with_id(mut self, id: impl Into<HabitId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the recurrence rule.
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Attach a category.
    pub fn in_category(mut self, category: Arc<Category>) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Progress of the goal selected by [`HabitManager::nearest_due_date_progress`].
#[derive(Debug, Clone, PartialEq)]
pub struct GoalProgressSummary {
    /// Goal id
    pub goal_id: GoalId,
    /// Goal name
    pub goal_name: String,
    /// The goal's due date
    pub due_date: NaiveDate,
    /// Progress up to the due date
    pub progress: f64,
}

/// Coordinates the habit repository, categories, goals and reminders.
///
/// Mutators on a missing habit or goal return `None` instead of failing;
/// errors are reserved for the repository.
pub struct HabitManager<R: HabitRepository> {
    repository: R,
    categories: Vec<Arc<Category>>,
    goals: Vec<Goal>,
    notifier: Box<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

impl<R: HabitRepository> HabitManager<R> {
    /// Create a manager using the wall clock and tracing reminders.
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            categories: Vec::new(),
            goals: Vec::new(),
            notifier: Box::new(TracingNotifier),
            clock: Arc::new(SystemClock),
        }
    }

    /// Set the reminder channel.
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Set the clock used for "today".
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Today's date according to the clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // === Categories ===

    /// Register a category, replacing one with the same id in place.
    pub fn add_category(&mut self, category: Category) -> Arc<Category> {
        let category = Arc::new(category);
        self.register_category(category.clone());
        category
    }

    pub(crate) fn register_category(&mut self, category: Arc<Category>) {
        match self.categories.iter().position(|c| c.id == category.id) {
            Some(idx) => self.categories[idx] = category,
            None => self.categories.push(category),
        }
    }

    /// Registered categories in insertion order.
    pub fn categories(&self) -> &[Arc<Category>] {
        &self.categories
    }

    /// Look up a category.
    pub fn category(&self, id: &CategoryId) -> Option<Arc<Category>> {
        self.categories.iter().find(|c| &c.id == id).cloned()
    }

    fn ensure_default_category(&mut self) -> Arc<Category> {
        let id = CategoryId::from(DEFAULT_CATEGORY_ID);
        if let Some(existing) = self.category(&id) {
            return existing;
        }
        self.add_category(Category::new(id, DEFAULT_CATEGORY_NAME))
    }

    // === Habits ===

    /// Create and store a habit.
    ///
    /// A category not registered yet is registered so it is persisted with
    /// the habit.
    pub fn create_habit(&mut self, spec: NewHabit) -> Result<Habit> {
        let category = match spec.category {
            Some(category) => {
                if self.category(&category.id).is_none() {
                    self.register_category(category.clone());
                }
                category
            }
            None => self.ensure_default_category(),
        };

        let mut habit = Habit::new(
            spec.id.unwrap_or_else(HabitId::generate),
            spec.name,
            spec.frequency,
            category,
        )
        .with_priority(spec.priority);
        habit.set_description(spec.description);

        self.repository.save(&habit)?;
        debug!(habit = %habit.id, "created habit");
        Ok(habit)
    }

    /// Store an already built habit.
    pub fn add_habit(&mut self, habit: &Habit) -> Result<()> {
        self.repository.save(habit)
    }

    /// Look up a habit.
    pub fn habit(&self, id: &HabitId) -> Result<Option<Habit>> {
        self.repository.get_by_id(id)
    }

    /// All habits, archived ones only when asked.
    pub fn habits(&self, include_archived: bool) -> Result<Vec<Habit>> {
        self.repository.get_all(include_archived)
    }

    /// Active habits in a category.
    pub fn habits_by_category(&self, category_id: &CategoryId) -> Result<Vec<Habit>> {
        Ok(self
            .repository
            .get_all(false)?
            .into_iter()
            .filter(|h| &h.category.id == category_id)
            .collect())
    }

    /// Delete a habit and drop it from every goal.
    pub fn delete_habit(&mut self, id: &HabitId) -> Result<bool> {
        let existed = self.repository.delete(id)?;
        for goal in &mut self.goals {
            goal.remove_habit(id);
        }
        if existed {
            debug!(habit = %id, "deleted habit");
        }
        Ok(existed)
    }

    /// Active habits due on `date` and not completed yet.
    pub fn due_on(&self, date: NaiveDate) -> Result<Vec<Habit>> {
        Ok(self
            .repository
            .get_all(false)?
            .into_iter()
            .filter(|h| h.is_due_on(date) && !h.is_completed_on(date))
            .collect())
    }

    /// [`HabitManager::due_on`] for today.
    pub fn due_today(&self) -> Result<Vec<Habit>> {
        self.due_on(self.today())
    }

    fn update_habit(&mut self, id: &HabitId, f: impl FnOnce(&mut Habit)) -> Result<Option<Habit>> {
        let Some(mut habit) = self.repository.get_by_id(id)? else {
            debug!(habit = %id, "habit not found");
            return Ok(None);
        };
        f(&mut habit);
        self.repository.save(&habit)?;
        Ok(Some(habit))
    }

    /// Rename a habit.
    pub fn rename_habit(&mut self, id: &HabitId, name: impl Into<String>) -> Result<Option<Habit>> {
        let name = name.into();
        self.update_habit(id, |h| h.rename(name))
    }

    /// Replace or clear a habit's description.
    pub fn set_habit_description(&mut self, id: &HabitId, description: Option<String>) -> Result<Option<Habit>> {
        self.update_habit(id, |h| h.set_description(description))
    }

    /// Change a habit's frequency.
    pub fn set_habit_frequency(&mut self, id: &HabitId, frequency: Frequency) -> Result<Option<Habit>> {
        self.update_habit(id, |h| h.set_frequency(frequency))
    }

    /// Change a habit's priority.
    pub fn set_habit_priority(&mut self, id: &HabitId, priority: Priority) -> Result<Option<Habit>> {
        self.update_habit(id, |h| h.set_priority(priority))
    }

    /// Archive a habit.
    pub fn archive_habit(&mut self, id: &HabitId) -> Result<Option<Habit>> {
        self.update_habit(id, Habit::archive)
    }

    /// Unarchive a habit.
    pub fn unarchive_habit(&mut self, id: &HabitId) -> Result<Option<Habit>> {
        self.update_habit(id, Habit::unarchive)
    }

    /// Flip completion on `date`.
    pub fn toggle_habit(&mut self, id: &HabitId, date: NaiveDate) -> Result<Option<Habit>> {
        self.update_habit(id, |h| h.toggle_completed(date))
    }

    /// Mark or unmark completion on `date`.
    pub fn set_done(&mut self, id: &HabitId, done: bool, date: NaiveDate) -> Result<Option<Habit>> {
        self.update_habit(id, |h| {
            if done {
                h.mark_completed(date);
            } else {
                h.unmark_completed(date);
            }
        })
    }

    /// Mark completion on `date` with a note.
    pub fn complete_with_note(
        &mut self,
        id: &HabitId,
        date: NaiveDate,
        note: impl Into<String>,
    ) -> Result<Option<Habit>> {
        let note = note.into();
        self.update_habit(id, |h| h.complete_with_note(date, note))
    }

    /// Set the weekdays of a weekly habit.
    pub fn set_weekly_days(&mut self, id: &HabitId, days: &[u8]) -> Result<Option<Habit>> {
        self.update_habit(id, |h| h.set_days_of_week(days.iter().copied()))
    }

    /// Set the day of month of a monthly habit.
    pub fn set_monthly_day(&mut self, id: &HabitId, day: u32) -> Result<Option<Habit>> {
        self.update_habit(id, |h| h.set_day_of_month(day))
    }

    /// Current streak of a habit as of today.
    pub fn current_streak(&self, id: &HabitId) -> Result<Option<usize>> {
        Ok(self.habit(id)?.map(|h| h.current_streak(self.clock.as_ref())))
    }

    /// Longest streak of a habit.
    pub fn longest_streak(&self, id: &HabitId) -> Result<Option<usize>> {
        Ok(self.habit(id)?.map(|h| h.longest_streak()))
    }

    // === Goals ===

    /// Register a goal, replacing one with the same id in place.
    pub fn add_goal(&mut self, goal: Goal) {
        match self.goals.iter().position(|g| g.id == goal.id) {
            Some(idx) => self.goals[idx] = goal,
            None => self.goals.push(goal),
        }
    }

    /// Goals in insertion order.
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Look up a goal.
    pub fn goal(&self, id: &GoalId) -> Option<&Goal> {
        self.goals.iter().find(|g| &g.id == id)
    }

    /// Remove a goal. Its habits are left untouched.
    pub fn remove_goal(&mut self, id: &GoalId) -> Option<Goal> {
        let idx = self.goals.iter().position(|g| &g.id == id)?;
        Some(self.goals.remove(idx))
    }

    fn update_goal(&mut self, id: &GoalId, f: impl FnOnce(&mut Goal)) -> Option<&Goal> {
        let goal = self.goals.iter_mut().find(|g| &g.id == id)?;
        f(goal);
        Some(&*goal)
    }

    /// Attach an existing habit to a goal.
    ///
    /// `None` when either the goal or the habit is unknown.
    pub fn add_habit_to_goal(&mut self, goal_id: &GoalId, habit_id: &HabitId) -> Result<Option<&Goal>> {
        if self.repository.get_by_id(habit_id)?.is_none() {
            return Ok(None);
        }
        let habit_id = habit_id.clone();
        Ok(self.update_goal(goal_id, |g| g.add_habit(habit_id)))
    }

    /// Detach a habit from a goal.
    pub fn remove_habit_from_goal(&mut self, goal_id: &GoalId, habit_id: &HabitId) -> Option<&Goal> {
        self.update_goal(goal_id, |g| g.remove_habit(habit_id))
    }

    /// Replace or clear a goal's due date.
    pub fn set_goal_due_date(&mut self, goal_id: &GoalId, due: Option<NaiveDate>) -> Option<&Goal> {
        self.update_goal(goal_id, |g| g.set_due_date(due))
    }

    /// Replace or clear a goal's description.
    pub fn set_goal_description(&mut self, goal_id: &GoalId, description: Option<String>) -> Option<&Goal> {
        self.update_goal(goal_id, |g| g.set_description(description))
    }

    /// Resolve a goal's habits, skipping ids that no longer exist.
    pub fn goal_habits(&self, goal: &Goal) -> Result<Vec<Habit>> {
        let mut members = Vec::with_capacity(goal.habit_ids().len());
        for id in goal.habit_ids() {
            match self.repository.get_by_id(id)? {
                Some(habit) => members.push(habit),
                None => debug!(goal = %goal.id, habit = %id, "goal references unknown habit"),
            }
        }
        Ok(members)
    }

    /// Progress of one goal, `None` when the goal is unknown.
    pub fn goal_progress(
        &self,
        id: &GoalId,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<Option<f64>> {
        let Some(goal) = self.goal(id) else {
            return Ok(None);
        };
        let members = self.goal_habits(goal)?;
        Ok(Some(goal.progress(&members, start, end)))
    }

    // === Aggregation ===

    /// Mean progress of every active habit. Zero without habits.
    pub fn overall_progress(&self, start: NaiveDate, end: NaiveDate) -> Result<f64> {
        let habits = self.repository.get_all(false)?;
        if habits.is_empty() {
            return Ok(0.0);
        }
        let total: f64 = habits.iter().map(|h| h.progress(start, end)).sum();
        Ok(total / habits.len() as f64)
    }

    /// Mean progress of the goals that have a due date, each measured up to
    /// its own due date. Zero when no goal qualifies.
    pub fn overall_progress_from_goals(&self, start: NaiveDate) -> Result<f64> {
        let mut total = 0.0;
        let mut count = 0usize;
        for goal in self.goals.iter().filter(|g| g.due_date.is_some()) {
            let members = self.goal_habits(goal)?;
            total += goal.progress(&members, start, None);
            count += 1;
        }
        Ok(if count == 0 { 0.0 } else { total / count as f64 })
    }

    /// Progress of the goal whose due date is closest.
    ///
    /// Prefers the earliest due date on or after `reference` (today by
    /// default); when every due date is past, falls back to the earliest due
    /// date overall. Ties go to the goal registered first. `None` when no
    /// goal has a due date.
    pub fn nearest_due_date_progress(
        &self,
        start: NaiveDate,
        reference: Option<NaiveDate>,
    ) -> Result<Option<GoalProgressSummary>> {
        let reference = reference.unwrap_or_else(|| self.today());
        let dated: Vec<(&Goal, NaiveDate)> = self
            .goals
            .iter()
            .filter_map(|g| g.due_date.map(|due| (g, due)))
            .collect();

        let picked = dated
            .iter()
            .filter(|(_, due)| *due >= reference)
            .min_by_key(|(_, due)| *due)
            .or_else(|| dated.iter().min_by_key(|(_, due)| *due));

        let Some((goal, due)) = picked else {
            return Ok(None);
        };
        let members = self.goal_habits(goal)?;
        Ok(Some(GoalProgressSummary {
            goal_id: goal.id.clone(),
            goal_name: goal.name.clone(),
            due_date: *due,
            progress: goal.progress(&members, start, None),
        }))
    }

    // === Reminders ===

    /// Send one reminder per active habit. Returns how many were sent.
    pub fn send_reminders(&self) -> Result<usize> {
        let habits = self.repository.get_all(false)?;
        for habit in &habits {
            self.notifier.send_reminder(habit);
        }
        Ok(habits.len())
    }
}
