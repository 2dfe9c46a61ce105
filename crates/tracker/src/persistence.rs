//! Snapshot persistence - converts manager state to and from [`Snapshot`].
//!
//! Loading is all-or-nothing: the whole snapshot is decoded into domain
//! values first and only then committed to the manager, so a failed load
//! leaves in-memory state unchanged.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use habitual_core::{
    format_iso_date, parse_iso_date, Category, CategoryId, Goal, Habit, HabitId,
};
use habitual_storage::{
    CategoryDto, GoalDto, HabitDto, HabitRepository, Result, Snapshot, SnapshotProvider,
    StorageError,
};
use tracing::{debug, error, info, warn};

use crate::manager::HabitManager;

/// What a snapshot restore did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Categories registered
    pub categories: usize,
    /// Habits stored
    pub habits: usize,
    /// Goals registered
    pub goals: usize,
    /// Habits dropped because their category is unknown
    pub skipped_habits: usize,
    /// Dates dropped because they are not valid ISO dates
    pub skipped_dates: usize,
}

impl<R: HabitRepository> HabitManager<R> {
    /// Serialize the complete state, archived habits included.
    ///
    /// Notes are written only for dates that are still completed.
    pub fn to_snapshot(&self) -> Result<Snapshot> {
        let categories = self
            .categories()
            .iter()
            .map(|c| CategoryDto {
                id: c.id.to_string(),
                name: c.name.clone(),
                description: c.description.clone(),
            })
            .collect();

        let habits = self
            .habits(true)?
            .iter()
            .map(habit_to_dto)
            .collect();

        let goals = self
            .goals()
            .iter()
            .map(|g| GoalDto {
                id: g.id.to_string(),
                name: g.name.clone(),
                description: g.description.clone(),
                priority: g.priority,
                habit_ids: g.habit_ids().iter().map(|id| id.to_string()).collect(),
                due_date: g.due_date.map(format_iso_date),
            })
            .collect();

        Ok(Snapshot {
            categories,
            habits,
            goals,
        })
    }

    /// Merge a snapshot into this manager.
    ///
    /// Habits whose category is not in the snapshot (or already registered)
    /// are skipped, never given a substitute category. Malformed dates are
    /// skipped. Goal references to habits that do not exist are dropped.
    ///
    /// An entry with a blank id fails the whole restore with
    /// [`StorageError::InvalidSnapshot`] and leaves the manager untouched.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) -> Result<RestoreReport> {
        validate_ids(&snapshot)?;
        let mut report = RestoreReport::default();

        // Stage everything before touching the manager.
        let mut categories: BTreeMap<CategoryId, Arc<Category>> = self
            .categories()
            .iter()
            .map(|c| (c.id.clone(), c.clone()))
            .collect();
        let mut staged_categories = Vec::with_capacity(snapshot.categories.len());
        for dto in snapshot.categories {
            let category = Arc::new(Category {
                id: dto.id.into(),
                name: dto.name,
                description: dto.description,
            });
            categories.insert(category.id.clone(), category.clone());
            staged_categories.push(category);
        }

        let mut staged_habits = Vec::with_capacity(snapshot.habits.len());
        for dto in snapshot.habits {
            let category_id = CategoryId::from(dto.category_id.as_str());
            let Some(category) = categories.get(&category_id).cloned() else {
                warn!(habit = %dto.id, category = %dto.category_id, "skipping habit with unknown category");
                report.skipped_habits += 1;
                continue;
            };
            staged_habits.push(habit_from_dto(dto, category, &mut report.skipped_dates));
        }

        let mut known: HashSet<HabitId> = staged_habits.iter().map(|h| h.id.clone()).collect();
        for habit in self.habits(true)? {
            known.insert(habit.id);
        }

        let mut staged_goals = Vec::with_capacity(snapshot.goals.len());
        for dto in snapshot.goals {
            let mut goal = Goal::new(dto.id, dto.name).with_priority(dto.priority);
            goal.set_description(dto.description);
            if let Some(raw) = dto.due_date {
                match parse_iso_date(&raw) {
                    Ok(due) => goal.set_due_date(Some(due)),
                    Err(e) => {
                        warn!(goal = %goal.id, error = %e, "ignoring goal due date");
                        report.skipped_dates += 1;
                    }
                }
            }
            for id in dto.habit_ids.into_iter().map(HabitId::from) {
                if known.contains(&id) {
                    goal.add_habit(id);
                } else {
                    debug!(goal = %goal.id, habit = %id, "dropping unknown habit reference");
                }
            }
            staged_goals.push(goal);
        }

        // Commit.
        report.categories = staged_categories.len();
        for category in staged_categories {
            self.register_category(category);
        }
        report.habits = staged_habits.len();
        for habit in &staged_habits {
            self.add_habit(habit)?;
        }
        report.goals = staged_goals.len();
        for goal in staged_goals {
            self.add_goal(goal);
        }

        Ok(report)
    }
}

fn validate_ids(snapshot: &Snapshot) -> Result<()> {
    let blank = |kind: &str, index: usize| {
        StorageError::InvalidSnapshot(format!("{kind} #{index} has a blank id"))
    };
    if let Some(i) = snapshot.categories.iter().position(|c| c.id.trim().is_empty()) {
        return Err(blank("category", i));
    }
    if let Some(i) = snapshot.habits.iter().position(|h| h.id.trim().is_empty()) {
        return Err(blank("habit", i));
    }
    if let Some(i) = snapshot.goals.iter().position(|g| g.id.trim().is_empty()) {
        return Err(blank("goal", i));
    }
    Ok(())
}

fn habit_to_dto(habit: &Habit) -> HabitDto {
    let notes: BTreeMap<String, String> = habit
        .completion_notes()
        .filter(|(date, _)| habit.is_completed_on(*date))
        .map(|(date, note)| (format_iso_date(date), note.to_string()))
        .collect();

    HabitDto {
        id: habit.id.to_string(),
        name: habit.name.clone(),
        description: habit.description.clone(),
        frequency: habit.frequency.clone(),
        category_id: habit.category.id.to_string(),
        priority: habit.priority,
        archived: habit.archived,
        completed_dates: habit.completion_history().into_iter().map(format_iso_date).collect(),
        completion_notes: (!notes.is_empty()).then_some(notes),
        days_of_week: habit
            .days_of_week()
            .map(|days| days.iter().copied().map(i64::from).collect()),
        day_of_month: habit.day_of_month().map(i64::from),
    }
}

fn habit_from_dto(dto: HabitDto, category: Arc<Category>, skipped_dates: &mut usize) -> Habit {
    let mut habit = Habit::new(dto.id, dto.name, dto.frequency, category).with_priority(dto.priority);
    habit.set_description(dto.description);
    if let Some(days) = dto.days_of_week {
        let days: Vec<u8> = days.into_iter().map(|day| weekday_from_wire(&habit.id, day)).collect();
        habit.set_days_of_week(days);
    }
    if let Some(day) = dto.day_of_month {
        let day = day_of_month_from_wire(&habit.id, day);
        habit.set_day_of_month(day);
    }
    if dto.archived {
        habit.archive();
    }

    for raw in &dto.completed_dates {
        match parse_iso_date(raw) {
            Ok(date) => habit.mark_completed(date),
            Err(e) => {
                warn!(habit = %habit.id, error = %e, "skipping completion date");
                *skipped_dates += 1;
            }
        }
    }
    for (raw, note) in dto.completion_notes.unwrap_or_default() {
        match parse_iso_date(&raw) {
            Ok(date) => habit.complete_with_note(date, note),
            Err(e) => {
                warn!(habit = %habit.id, error = %e, "skipping completion note");
                *skipped_dates += 1;
            }
        }
    }
    habit
}

// Values that do not fit map to a weekday that matches no date.
fn weekday_from_wire(habit: &HabitId, day: i64) -> u8 {
    u8::try_from(day).unwrap_or_else(|_| {
        warn!(habit = %habit, day, "weekday out of range, habit will never be due on it");
        u8::MAX
    })
}

// Zero matches no date.
fn day_of_month_from_wire(habit: &HabitId, day: i64) -> u32 {
    u32::try_from(day).unwrap_or_else(|_| {
        warn!(habit = %habit, day, "day of month out of range, habit will never be due");
        0
    })
}

/// Loads and saves a manager through a [`SnapshotProvider`].
pub struct SnapshotStore<P: SnapshotProvider> {
    provider: P,
}

impl<P: SnapshotProvider> SnapshotStore<P> {
    /// Create a store over `provider`.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Load the stored snapshot into `manager`.
    ///
    /// Returns `Ok(None)` when nothing was stored yet.
    pub async fn try_load_into<R: HabitRepository>(
        &self,
        manager: &mut HabitManager<R>,
    ) -> Result<Option<RestoreReport>> {
        let Some(snapshot) = self.provider.load_snapshot().await? else {
            return Ok(None);
        };
        let report = manager.apply_snapshot(snapshot)?;
        info!(
            categories = report.categories,
            habits = report.habits,
            goals = report.goals,
            skipped_habits = report.skipped_habits,
            "loaded snapshot"
        );
        Ok(Some(report))
    }

    /// Like [`SnapshotStore::try_load_into`], logging failures instead of
    /// returning them. Returns whether a snapshot was applied.
    pub async fn load_into<R: HabitRepository>(&self, manager: &mut HabitManager<R>) -> bool {
        match self.try_load_into(manager).await {
            Ok(report) => report.is_some(),
            Err(e) => {
                error!(error = %e, "failed to load snapshot");
                false
            }
        }
    }

    /// Save the complete state of `manager`.
    pub async fn try_save_from<R: HabitRepository>(&self, manager: &HabitManager<R>) -> Result<()> {
        let snapshot = manager.to_snapshot()?;
        self.provider.save_snapshot(&snapshot).await
    }

    /// Like [`SnapshotStore::try_save_from`], logging failures instead of
    /// returning them. Returns whether the save succeeded.
    pub async fn save_from<R: HabitRepository>(&self, manager: &HabitManager<R>) -> bool {
        match self.try_save_from(manager).await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "failed to save snapshot");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use habitual_core::calendar::days_inclusive;
    use habitual_core::{Frequency, Priority};
    use habitual_storage::{InMemoryHabitRepository, InMemorySnapshotProvider, JsonFileStorage};

    /// Provider whose every call fails.
    struct ThrowingProvider;

    #[async_trait::async_trait]
    impl SnapshotProvider for ThrowingProvider {
        async fn load_snapshot(&self) -> Result<Option<Snapshot>> {
            Err(StorageError::Other("boom".to_string()))
        }

        async fn save_snapshot(&self, _snapshot: &Snapshot) -> Result<()> {
            Err(StorageError::Other("boom".to_string()))
        }
    }

    fn d(s: &str) -> NaiveDate {
        parse_iso_date(s).unwrap()
    }

    fn manager() -> HabitManager<InMemoryHabitRepository> {
        HabitManager::new(InMemoryHabitRepository::new())
    }

    fn populated() -> HabitManager<InMemoryHabitRepository> {
        let mut m = manager();
        let cat = m.add_category(Category::new("c", "C").with_description("desc"));

        let mut weekly = Habit::new("w", "Weekly", Frequency::Weekly, cat.clone())
            .with_priority(Priority::High)
            .with_description("hd");
        weekly.set_days_of_week([1, 3]);
        weekly.mark_completed(d("2025-09-01"));
        weekly.complete_with_note(d("2025-09-03"), "kept");
        weekly.complete_with_note(d("2025-09-05"), "orphan");
        weekly.unmark_completed(d("2025-09-05"));
        m.add_habit(&weekly).unwrap();

        let mut monthly = Habit::new("m", "Monthly", Frequency::Monthly, cat);
        monthly.set_day_of_month(15);
        monthly.archive();
        m.add_habit(&monthly).unwrap();

        m.add_goal(
            Goal::new("g", "G")
                .with_priority(Priority::High)
                .with_description("gd")
                .with_due_date(d("2025-09-30"))
                .with_habits([HabitId::from("w"), HabitId::from("m")]),
        );
        m.add_goal(Goal::new("plain", "Plain"));
        m
    }

    #[test]
    fn test_snapshot_shape() {
        let snap = populated().to_snapshot().unwrap();
        let json = serde_json::to_value(&snap).unwrap();

        assert_eq!(json["categories"][0]["description"], "desc");
        let weekly = &json["habits"][0];
        assert_eq!(weekly["categoryId"], "c");
        assert_eq!(weekly["priority"], 2);
        assert_eq!(weekly["daysOfWeek"], serde_json::json!([1, 3]));
        assert_eq!(weekly["completedDates"], serde_json::json!(["2025-09-01", "2025-09-03"]));
        assert_eq!(weekly["completionNotes"], serde_json::json!({ "2025-09-03": "kept" }));
        assert!(weekly.get("dayOfMonth").is_none());

        let monthly = &json["habits"][1];
        assert_eq!(monthly["archived"], true);
        assert_eq!(monthly["dayOfMonth"], 15);
        assert!(monthly.get("completionNotes").is_none());
        assert!(monthly.get("description").is_none());

        assert_eq!(json["goals"][0]["dueDate"], "2025-09-30");
        assert_eq!(json["goals"][0]["habitIds"], serde_json::json!(["w", "m"]));
        assert!(json["goals"][1].get("dueDate").is_none());
        assert!(json["goals"][1].get("description").is_none());
    }

    #[test]
    fn test_restore_rebuilds_state() {
        let original = populated();
        let snap = original.to_snapshot().unwrap();

        let mut restored = manager();
        let report = restored.apply_snapshot(snap.clone()).unwrap();
        assert_eq!(report.categories, 1);
        assert_eq!(report.habits, 2);
        assert_eq!(report.goals, 2);
        assert_eq!(report.skipped_habits, 0);

        let w = restored.habit(&"w".into()).unwrap().unwrap();
        assert_eq!(w.days_of_week(), Some(&[1, 3][..]));
        assert_eq!(w.completion_note(d("2025-09-03")), Some("kept"));
        assert_eq!(w.completion_note(d("2025-09-05")), None);
        assert!(restored.habit(&"m".into()).unwrap().unwrap().archived);
        assert_eq!(restored.goals()[0].due_date, Some(d("2025-09-30")));

        assert_eq!(restored.to_snapshot().unwrap(), snap);
    }

    #[test]
    fn test_restore_skips_habit_with_unknown_category() {
        let raw = serde_json::json!({
            "categories": [{ "id": "c", "name": "C" }],
            "habits": [{
                "id": "h", "name": "N", "frequency": "daily", "categoryId": "missing",
                "priority": 1, "archived": false, "completedDates": []
            }],
            "goals": [{ "id": "g", "name": "G", "priority": 1, "habitIds": ["h"] }]
        });
        let snap: Snapshot = serde_json::from_value(raw).unwrap();

        let mut m = manager();
        let report = m.apply_snapshot(snap).unwrap();
        assert_eq!(report.skipped_habits, 1);
        assert_eq!(m.categories().len(), 1);
        assert!(m.habits(true).unwrap().is_empty());
        assert!(m.goals()[0].habit_ids().is_empty());
    }

    #[test]
    fn test_restore_skips_malformed_dates_and_keeps_unknown_frequency() {
        let raw = serde_json::json!({
            "categories": [{ "id": "c", "name": "C" }],
            "habits": [{
                "id": "h", "name": "N", "frequency": "yearly", "categoryId": "c",
                "priority": 0, "archived": false,
                "completedDates": ["2025-09-01", "garbage", "2025-02-30"],
                "daysOfWeek": []
            }],
            "goals": [{ "id": "g", "name": "G", "priority": 1, "habitIds": ["h"], "dueDate": "soon" }]
        });
        let snap: Snapshot = serde_json::from_value(raw).unwrap();

        let mut m = manager();
        let report = m.apply_snapshot(snap).unwrap();
        assert_eq!(report.skipped_dates, 3);

        let h = m.habit(&"h".into()).unwrap().unwrap();
        assert_eq!(h.completion_history(), vec![d("2025-09-01")]);
        assert_eq!(h.frequency, Frequency::Unknown("yearly".to_string()));
        assert_eq!(h.days_of_week(), None);
        assert!(!h.is_due_on(d("2025-09-01")));
        assert!(m.goals()[0].due_date.is_none());

        let out = serde_json::to_value(m.to_snapshot().unwrap()).unwrap();
        assert_eq!(out["habits"][0]["frequency"], "yearly");
        assert!(out["habits"][0].get("daysOfWeek").is_none());
    }

    #[test]
    fn test_out_of_range_weekdays_survive_round_trip() {
        let mut m = manager();
        let cat = m.add_category(Category::new("c", "C"));
        let mut h = Habit::new("h", "Odd", Frequency::Weekly, cat);
        h.set_days_of_week([7]);
        m.add_habit(&h).unwrap();

        let snap = m.to_snapshot().unwrap();
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["habits"][0]["daysOfWeek"], serde_json::json!([7]));

        let mut restored = manager();
        restored.apply_snapshot(snap).unwrap();
        let h = restored.habit(&"h".into()).unwrap().unwrap();
        assert_eq!(h.days_of_week(), Some(&[7][..]));
        assert!(!h.is_due_on(d("2025-09-01")));
        assert!(restored.due_on(d("2025-09-01")).unwrap().is_empty());
    }

    #[test]
    fn test_unrepresentable_schedule_values_are_never_due() {
        let raw = serde_json::json!({
            "categories": [{ "id": "c", "name": "C" }],
            "habits": [
                { "id": "w", "name": "W", "frequency": "weekly", "categoryId": "c", "daysOfWeek": [-1, 1000] },
                { "id": "m", "name": "M", "frequency": "monthly", "categoryId": "c", "dayOfMonth": -3 }
            ]
        });
        let snap: Snapshot = serde_json::from_value(raw).unwrap();

        let mut m = manager();
        let report = m.apply_snapshot(snap).unwrap();
        assert_eq!(report.habits, 2);

        let weekly = m.habit(&"w".into()).unwrap().unwrap();
        assert_eq!(weekly.days_of_week(), Some(&[u8::MAX][..]));
        let monthly = m.habit(&"m".into()).unwrap().unwrap();
        assert_eq!(monthly.day_of_month(), Some(0));

        let due = days_inclusive(d("2025-01-01"), d("2025-12-31"))
            .filter(|day| weekly.is_due_on(*day) || monthly.is_due_on(*day))
            .count();
        assert_eq!(due, 0);
    }

    #[test]
    fn test_blank_id_rejects_whole_snapshot() {
        let raw = serde_json::json!({
            "categories": [{ "id": "new", "name": "New" }],
            "habits": [{ "id": " ", "name": "N", "frequency": "daily", "categoryId": "new" }]
        });
        let snap: Snapshot = serde_json::from_value(raw).unwrap();

        let mut m = populated();
        let before = m.to_snapshot().unwrap();
        let err = m.apply_snapshot(snap).unwrap_err();
        assert!(matches!(err, StorageError::InvalidSnapshot(_)));
        assert_eq!(m.to_snapshot().unwrap(), before);
    }

    #[tokio::test]
    async fn test_store_round_trip_through_memory_provider() {
        let store = SnapshotStore::new(InMemorySnapshotProvider::default());
        let mut empty = manager();
        assert!(!store.load_into(&mut empty).await);
        assert!(empty.categories().is_empty());

        assert!(store.save_from(&populated()).await);

        let mut reloaded = manager();
        assert!(store.load_into(&mut reloaded).await);
        assert_eq!(reloaded.categories().len(), 1);
        assert_eq!(reloaded.habits(false).unwrap().len(), 1);
        assert_eq!(reloaded.habits(true).unwrap().len(), 2);
        assert_eq!(reloaded.goals().len(), 2);
    }

    #[tokio::test]
    async fn test_store_round_trip_through_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(JsonFileStorage::new(dir.path().join(".data").join("snapshot.json")));
        store.try_save_from(&populated()).await.unwrap();

        let mut reloaded = manager();
        let report = store.try_load_into(&mut reloaded).await.unwrap().unwrap();
        assert_eq!(report.habits, 2);
        assert_eq!(
            reloaded.goal(&"g".into()).unwrap().habit_ids(),
            &[HabitId::from("w"), HabitId::from("m")]
        );
    }

    #[tokio::test]
    async fn test_corrupt_file_leaves_state_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, "{\"categories\": [").unwrap();

        let store = SnapshotStore::new(JsonFileStorage::new(&path));
        let mut m = populated();
        let before = m.to_snapshot().unwrap();

        assert!(!store.load_into(&mut m).await);
        assert_eq!(m.to_snapshot().unwrap(), before);
    }

    #[tokio::test]
    async fn test_provider_failures_are_logged_not_raised() {
        let store = SnapshotStore::new(ThrowingProvider);
        let mut m = populated();
        assert!(!store.save_from(&m).await);
        assert!(!store.load_into(&mut m).await);
        assert!(store.try_save_from(&m).await.is_err());
    }
}
