//! habitual CLI - track habits and goals from the terminal.

mod config;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use habitual_core::{
    format_iso_date, parse_iso_date, CalendarError, Category, CategoryId, Frequency, Goal, GoalId,
    Habit, HabitId, Priority,
};
use habitual_storage::{InMemoryHabitRepository, JsonFileStorage};
use habitual_tracker::{ConsoleNotifier, HabitManager, NewHabit, SnapshotStore};
use tracing::debug;

use config::CliConfig;

type Manager = HabitManager<InMemoryHabitRepository>;

#[derive(Parser)]
#[command(name = "habitual")]
#[command(about = "Habit and goal tracker", long_about = None)]
struct Cli {
    /// Snapshot file
    #[arg(long, global = true, env = "HABITUAL_DATA")]
    data: Option<PathBuf>,

    /// Log filter (e.g. `debug`, `habitual_tracker=trace`)
    #[arg(long, global = true, env = "HABITUAL_LOG")]
    log: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage categories
    #[command(subcommand)]
    Category(CategoryCommand),
    /// Manage habits
    #[command(subcommand)]
    Habit(HabitCommand),
    /// Mark a habit completed
    Done {
        /// Habit ID
        id: String,
        /// Date (defaults to today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Clear a completion
    Undo {
        /// Habit ID
        id: String,
        /// Date (defaults to today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Flip a completion
    Toggle {
        /// Habit ID
        id: String,
        /// Date (defaults to today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Complete a habit with a note
    Note {
        /// Habit ID
        id: String,
        /// Note text
        text: String,
        /// Date (defaults to today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Manage goals
    #[command(subcommand)]
    Goal(GoalCommand),
    /// Mean progress of all active habits
    Progress {
        /// First day of the range
        #[arg(long, value_parser = parse_date)]
        from: NaiveDate,
        /// Last day of the range (defaults to today)
        #[arg(long, value_parser = parse_date)]
        to: Option<NaiveDate>,
    },
    /// Mean progress of goals with a due date
    GoalsProgress {
        /// First day of the range
        #[arg(long, value_parser = parse_date)]
        from: NaiveDate,
    },
    /// Progress of the goal due soonest
    Nearest {
        /// First day of the range
        #[arg(long, value_parser = parse_date)]
        from: NaiveDate,
        /// Reference date (defaults to today)
        #[arg(long, value_parser = parse_date)]
        reference: Option<NaiveDate>,
    },
    /// Current and longest streak of a habit
    Streak {
        /// Habit ID
        id: String,
    },
    /// Habits due today and not done yet
    Today,
    /// Print a reminder for every active habit
    Remind,
}

#[derive(Subcommand)]
enum CategoryCommand {
    /// Add or replace a category
    Add {
        /// Category ID
        id: String,
        /// Display name
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List categories
    List,
}

#[derive(Subcommand)]
enum HabitCommand {
    /// Add a habit
    Add {
        /// Habit name
        name: String,
        /// Explicit ID (generated otherwise)
        #[arg(long)]
        id: Option<String>,
        /// daily, weekly or monthly
        #[arg(long, default_value = "daily", value_parser = parse_frequency)]
        frequency: Frequency,
        /// Category ID (defaults to the general category)
        #[arg(long)]
        category: Option<String>,
        /// low, medium, high or 0-2
        #[arg(long, default_value = "medium")]
        priority: Priority,
        #[arg(long)]
        description: Option<String>,
    },
    /// List habits
    List {
        /// Include archived habits
        #[arg(long)]
        all: bool,
        /// Only habits in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Show habit details
    Show {
        /// Habit ID
        id: String,
    },
    /// Rename a habit
    Rename {
        /// Habit ID
        id: String,
        /// New name
        name: String,
    },
    /// Set or clear the description
    Describe {
        /// Habit ID
        id: String,
        /// Description (omit to clear)
        text: Option<String>,
    },
    /// Archive a habit
    Archive {
        /// Habit ID
        id: String,
    },
    /// Restore an archived habit
    Unarchive {
        /// Habit ID
        id: String,
    },
    /// Delete a habit
    Delete {
        /// Habit ID
        id: String,
    },
    /// Change the frequency
    Frequency {
        /// Habit ID
        id: String,
        #[arg(value_parser = parse_frequency)]
        frequency: Frequency,
    },
    /// Change the priority
    Priority {
        /// Habit ID
        id: String,
        priority: Priority,
    },
    /// Set the weekdays a weekly habit is due on (0 = Sunday)
    Weekly {
        /// Habit ID
        id: String,
        #[arg(required = true, num_args = 1.., value_parser = clap::value_parser!(u8).range(0..=6))]
        days: Vec<u8>,
    },
    /// Set the day a monthly habit is due on
    Monthly {
        /// Habit ID
        id: String,
        #[arg(value_parser = clap::value_parser!(u32).range(1..=31))]
        day: u32,
    },
}

#[derive(Subcommand)]
enum GoalCommand {
    /// Add or replace a goal
    Add {
        /// Goal name
        name: String,
        /// Explicit ID (generated otherwise)
        #[arg(long)]
        id: Option<String>,
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// Due date
        #[arg(long, value_parser = parse_date)]
        due: Option<NaiveDate>,
        #[arg(long)]
        description: Option<String>,
        /// Member habit (repeatable)
        #[arg(long = "habit")]
        habits: Vec<String>,
    },
    /// List goals
    List,
    /// Add a habit to a goal
    Link {
        /// Goal ID
        goal: String,
        /// Habit ID
        habit: String,
    },
    /// Remove a habit from a goal
    Unlink {
        /// Goal ID
        goal: String,
        /// Habit ID
        habit: String,
    },
    /// Set or clear the due date
    Due {
        /// Goal ID
        goal: String,
        /// Due date (omit to clear)
        #[arg(value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Set or clear the description
    Describe {
        /// Goal ID
        goal: String,
        /// Description (omit to clear)
        text: Option<String>,
    },
    /// Remove a goal (its habits are kept)
    Remove {
        /// Goal ID
        goal: String,
    },
    /// Progress of one goal
    Progress {
        /// Goal ID
        goal: String,
        /// First day of the range
        #[arg(long, value_parser = parse_date)]
        from: NaiveDate,
        /// Last day of the range (defaults to the due date)
        #[arg(long, value_parser = parse_date)]
        to: Option<NaiveDate>,
    },
}

impl Commands {
    fn is_mutating(&self) -> bool {
        match self {
            Commands::Category(cmd) => matches!(cmd, CategoryCommand::Add { .. }),
            Commands::Habit(cmd) => !matches!(
                cmd,
                HabitCommand::List { .. } | HabitCommand::Show { .. }
            ),
            Commands::Goal(cmd) => !matches!(cmd, GoalCommand::List | GoalCommand::Progress { .. }),
            Commands::Done { .. }
            | Commands::Undo { .. }
            | Commands::Toggle { .. }
            | Commands::Note { .. } => true,
            Commands::Progress { .. }
            | Commands::GoalsProgress { .. }
            | Commands::Nearest { .. }
            | Commands::Streak { .. }
            | Commands::Today
            | Commands::Remind => false,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::resolve(cli.data, cli.log, std::env::var("RUST_LOG").ok());
    config.init_tracing();
    debug!(?config, "resolved configuration");

    let store = SnapshotStore::new(JsonFileStorage::new(&config.data_path));
    let mut manager = HabitManager::new(InMemoryHabitRepository::new()).with_notifier(ConsoleNotifier);
    store
        .try_load_into(&mut manager)
        .await
        .with_context(|| format!("failed to load {}", config.data_path.display()))?;

    let mutating = cli.command.is_mutating();
    run(cli.command, &mut manager)?;

    if mutating {
        store
            .try_save_from(&manager)
            .await
            .with_context(|| format!("failed to save {}", config.data_path.display()))?;
    }

    Ok(())
}

fn run(command: Commands, manager: &mut Manager) -> Result<()> {
    match command {
        Commands::Category(cmd) => run_category(cmd, manager),
        Commands::Habit(cmd) => run_habit(cmd, manager),
        Commands::Goal(cmd) => run_goal(cmd, manager),
        Commands::Done { id, date } => {
            let date = date.unwrap_or_else(|| manager.today());
            let habit = found_habit(manager.set_done(&id.clone().into(), true, date)?, &id)?;
            println!("Done: {} on {}", habit.name, format_iso_date(date));
            Ok(())
        }
        Commands::Undo { id, date } => {
            let date = date.unwrap_or_else(|| manager.today());
            let habit = found_habit(manager.set_done(&id.clone().into(), false, date)?, &id)?;
            println!("Cleared: {} on {}", habit.name, format_iso_date(date));
            Ok(())
        }
        Commands::Toggle { id, date } => {
            let date = date.unwrap_or_else(|| manager.today());
            let habit = found_habit(manager.toggle_habit(&id.clone().into(), date)?, &id)?;
            let state = if habit.is_completed_on(date) { "done" } else { "not done" };
            println!("{} on {}: {}", habit.name, format_iso_date(date), state);
            Ok(())
        }
        Commands::Note { id, text, date } => {
            let date = date.unwrap_or_else(|| manager.today());
            let habit = found_habit(manager.complete_with_note(&id.clone().into(), date, text)?, &id)?;
            println!("Noted: {} on {}", habit.name, format_iso_date(date));
            Ok(())
        }
        Commands::Progress { from, to } => {
            let to = to.unwrap_or_else(|| manager.today());
            let progress = manager.overall_progress(from, to)?;
            println!(
                "Overall progress {} .. {}: {}",
                format_iso_date(from),
                format_iso_date(to),
                percent(progress)
            );
            Ok(())
        }
        Commands::GoalsProgress { from } => {
            let progress = manager.overall_progress_from_goals(from)?;
            println!("Goal progress since {}: {}", format_iso_date(from), percent(progress));
            Ok(())
        }
        Commands::Nearest { from, reference } => {
            match manager.nearest_due_date_progress(from, reference)? {
                Some(summary) => println!(
                    "{} ({}) due {}: {}",
                    summary.goal_name,
                    summary.goal_id,
                    format_iso_date(summary.due_date),
                    percent(summary.progress)
                ),
                None => println!("No goal has a due date"),
            }
            Ok(())
        }
        Commands::Streak { id } => {
            let habit_id = HabitId::from(id.as_str());
            let current = found_habit(manager.current_streak(&habit_id)?, &id)?;
            let longest = found_habit(manager.longest_streak(&habit_id)?, &id)?;
            println!("Current streak: {}", current);
            println!("Longest streak: {}", longest);
            Ok(())
        }
        Commands::Today => {
            let due = manager.due_today()?;
            println!("Due {} ({})", format_iso_date(manager.today()), due.len());
            for habit in &due {
                println!("  {}", habit_line(habit));
            }
            Ok(())
        }
        Commands::Remind => {
            let sent = manager.send_reminders()?;
            debug!(sent, "reminders sent");
            Ok(())
        }
    }
}

fn run_category(cmd: CategoryCommand, manager: &mut Manager) -> Result<()> {
    match cmd {
        CategoryCommand::Add { id, name, description } => {
            let mut category = Category::new(id, name);
            category.description = description;
            let category = manager.add_category(category);
            println!("Added category: {} - {}", category.id, category.name);
        }
        CategoryCommand::List => {
            println!("Categories ({})", manager.categories().len());
            for category in manager.categories() {
                match &category.description {
                    Some(description) => {
                        println!("  {} | {} - {}", category.id, category.name, description)
                    }
                    None => println!("  {} | {}", category.id, category.name),
                }
            }
        }
    }
    Ok(())
}

fn run_habit(cmd: HabitCommand, manager: &mut Manager) -> Result<()> {
    match cmd {
        HabitCommand::Add { name, id, frequency, category, priority, description } => {
            let mut spec = NewHabit::new(name).with_frequency(frequency).with_priority(priority);
            if let Some(id) = id {
                spec = spec.with_id(id);
            }
            if let Some(category_id) = category {
                let category = manager
                    .category(&CategoryId::from(category_id.as_str()))
                    .ok_or_else(|| anyhow!("Category not found: {}", category_id))?;
                spec = spec.in_category(category);
            }
            if let Some(description) = description {
                spec = spec.with_description(description);
            }
            let habit = manager.create_habit(spec)?;
            println!("Added habit: {} - {}", habit.id, habit.name);
        }
        HabitCommand::List { all, category } => {
            let habits = match category {
                Some(category_id) => manager.habits_by_category(&CategoryId::from(category_id.as_str()))?,
                None => manager.habits(all)?,
            };
            println!("Habits ({})", habits.len());
            for habit in &habits {
                println!("  {}", habit_line(habit));
            }
        }
        HabitCommand::Show { id } => {
            let habit = found_habit(manager.habit(&id.clone().into())?, &id)?;
            print_habit(&habit, manager.today());
        }
        HabitCommand::Rename { id, name } => {
            let habit = found_habit(manager.rename_habit(&id.clone().into(), name)?, &id)?;
            println!("Renamed: {} - {}", habit.id, habit.name);
        }
        HabitCommand::Describe { id, text } => {
            found_habit(manager.set_habit_description(&id.clone().into(), text)?, &id)?;
            println!("Updated description of {}", id);
        }
        HabitCommand::Archive { id } => {
            let habit = found_habit(manager.archive_habit(&id.clone().into())?, &id)?;
            println!("Archived: {}", habit.name);
        }
        HabitCommand::Unarchive { id } => {
            let habit = found_habit(manager.unarchive_habit(&id.clone().into())?, &id)?;
            println!("Restored: {}", habit.name);
        }
        HabitCommand::Delete { id } => {
            if !manager.delete_habit(&id.clone().into())? {
                return Err(anyhow!("Habit not found: {}", id));
            }
            println!("Deleted habit {}", id);
        }
        HabitCommand::Frequency { id, frequency } => {
            let habit = found_habit(manager.set_habit_frequency(&id.clone().into(), frequency)?, &id)?;
            println!("{} is now {}", habit.name, habit.frequency);
        }
        HabitCommand::Priority { id, priority } => {
            let habit = found_habit(manager.set_habit_priority(&id.clone().into(), priority)?, &id)?;
            println!("{} priority: {}", habit.name, habit.priority);
        }
        HabitCommand::Weekly { id, days } => {
            let habit = found_habit(manager.set_weekly_days(&id.clone().into(), &days)?, &id)?;
            println!("{} due on weekdays {}", habit.name, weekdays(&habit));
        }
        HabitCommand::Monthly { id, day } => {
            let habit = found_habit(manager.set_monthly_day(&id.clone().into(), day)?, &id)?;
            println!("{} due on day {} of the month", habit.name, day);
        }
    }
    Ok(())
}

fn run_goal(cmd: GoalCommand, manager: &mut Manager) -> Result<()> {
    match cmd {
        GoalCommand::Add { name, id, priority, due, description, habits } => {
            let habit_ids: Vec<HabitId> = habits.iter().map(|h| HabitId::from(h.as_str())).collect();
            for habit_id in &habit_ids {
                found_habit(manager.habit(habit_id)?, habit_id)?;
            }

            let mut goal = Goal::new(id.map(GoalId::from).unwrap_or_else(GoalId::generate), name)
                .with_priority(priority)
                .with_habits(habit_ids);
            goal.set_due_date(due);
            goal.set_description(description);
            println!("Added goal: {} - {}", goal.id, goal.name);
            manager.add_goal(goal);
        }
        GoalCommand::List => {
            println!("Goals ({})", manager.goals().len());
            for goal in manager.goals() {
                let due = goal.due_date.map(format_iso_date).unwrap_or_else(|| "-".to_string());
                println!(
                    "  {} | {} | due {} | {} habits - {}",
                    goal.id,
                    goal.priority,
                    due,
                    goal.habit_ids().len(),
                    goal.name
                );
            }
        }
        GoalCommand::Link { goal, habit } => {
            let linked = manager.add_habit_to_goal(&goal.clone().into(), &habit.clone().into())?;
            if linked.is_none() {
                return Err(anyhow!("Goal or habit not found: {} / {}", goal, habit));
            }
            println!("Linked {} to {}", habit, goal);
        }
        GoalCommand::Unlink { goal, habit } => {
            found_goal(manager.remove_habit_from_goal(&goal.clone().into(), &habit.clone().into()), &goal)?;
            println!("Unlinked {} from {}", habit, goal);
        }
        GoalCommand::Due { goal, date } => {
            found_goal(manager.set_goal_due_date(&goal.clone().into(), date), &goal)?;
            match date {
                Some(date) => println!("{} due {}", goal, format_iso_date(date)),
                None => println!("{} has no due date", goal),
            }
        }
        GoalCommand::Describe { goal, text } => {
            found_goal(manager.set_goal_description(&goal.clone().into(), text), &goal)?;
            println!("Updated description of {}", goal);
        }
        GoalCommand::Remove { goal } => {
            let removed = found_goal(manager.remove_goal(&goal.clone().into()), &goal)?;
            println!("Removed goal: {}", removed.name);
        }
        GoalCommand::Progress { goal, from, to } => {
            let goal_id = GoalId::from(goal.as_str());
            let due = found_goal(manager.goal(&goal_id), &goal)?.due_date;
            let end = to.or(due);
            let progress = found_goal(manager.goal_progress(&goal_id, from, end)?, &goal)?;
            match end {
                Some(end) => println!(
                    "{} {} .. {}: {}",
                    goal,
                    format_iso_date(from),
                    format_iso_date(end),
                    percent(progress)
                ),
                None => println!("{}: {} (no due date)", goal, percent(progress)),
            }
        }
    }
    Ok(())
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, CalendarError> {
    parse_iso_date(s)
}

fn parse_frequency(s: &str) -> std::result::Result<Frequency, String> {
    match Frequency::from(s.to_lowercase()) {
        Frequency::Unknown(other) => Err(format!("unknown frequency: {} (expected daily, weekly or monthly)", other)),
        known => Ok(known),
    }
}

fn found_habit<T>(value: Option<T>, id: &impl std::fmt::Display) -> Result<T> {
    value.ok_or_else(|| anyhow!("Habit not found: {}", id))
}

fn found_goal<T>(value: Option<T>, id: &impl std::fmt::Display) -> Result<T> {
    value.ok_or_else(|| anyhow!("Goal not found: {}", id))
}

fn percent(progress: f64) -> String {
    format!("{:.1}%", progress * 100.0)
}

fn weekdays(habit: &Habit) -> String {
    match habit.days_of_week() {
        Some(days) => days.iter().map(u8::to_string).collect::<Vec<_>>().join(","),
        None => "-".to_string(),
    }
}

fn habit_line(habit: &Habit) -> String {
    let archived = if habit.archived { " [archived]" } else { "" };
    format!(
        "{} | {} | {} | {} | {}{}",
        habit.id, habit.frequency, habit.category.name, habit.priority, habit.name, archived
    )
}

fn print_habit(habit: &Habit, today: NaiveDate) {
    println!("Habit: {}", habit.id);
    println!("  Name: {}", habit.name);
    if let Some(description) = &habit.description {
        println!("  Description: {}", description);
    }
    println!("  Frequency: {}", habit.frequency);
    match habit.frequency {
        Frequency::Weekly => println!("  Weekdays: {}", weekdays(habit)),
        Frequency::Monthly => {
            let day = habit.day_of_month().map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
            println!("  Day of month: {}", day);
        }
        _ => {}
    }
    println!("  Category: {}", habit.category.name);
    println!("  Priority: {}", habit.priority);
    println!("  Archived: {}", habit.archived);
    println!("  Completions: {}", habit.completion_count());
    if let Some(last) = habit.last_completed() {
        println!("  Last completed: {}", format_iso_date(last));
    }
    println!("  Current streak: {}", habit.current_streak_on(today));
    println!("  Longest streak: {}", habit.longest_streak());
    for (date, note) in habit.completion_notes() {
        println!("  Note {}: {}", format_iso_date(date), note);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use habitual_core::FixedClock;

    fn d(s: &str) -> NaiveDate {
        parse_iso_date(s).unwrap()
    }

    fn manager() -> Manager {
        HabitManager::new(InMemoryHabitRepository::new()).with_clock(FixedClock(d("2025-09-10")))
    }

    fn parse(args: &[&str]) -> Commands {
        let mut argv = vec!["habitual"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command
    }

    #[test]
    fn test_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(Cli::try_parse_from(["habitual", "done", "h", "--date", "2025-13-01"]).is_err());
        assert!(Cli::try_parse_from(["habitual", "habit", "add", "x", "--frequency", "yearly"]).is_err());
        assert!(Cli::try_parse_from(["habitual", "habit", "weekly", "h", "7"]).is_err());
        assert!(Cli::try_parse_from(["habitual", "habit", "monthly", "h", "0"]).is_err());
    }

    #[test]
    fn test_mutating_commands() {
        assert!(parse(&["done", "h"]).is_mutating());
        assert!(parse(&["habit", "archive", "h"]).is_mutating());
        assert!(parse(&["goal", "due", "g"]).is_mutating());
        assert!(!parse(&["habit", "list"]).is_mutating());
        assert!(!parse(&["goal", "progress", "g", "--from", "2025-09-01"]).is_mutating());
        assert!(!parse(&["today"]).is_mutating());
    }

    #[test]
    fn test_run_commands_against_manager() {
        let mut m = manager();
        run(parse(&["category", "add", "fit", "Fitness"]), &mut m).unwrap();
        run(
            parse(&["habit", "add", "Run", "--id", "run", "--category", "fit", "--priority", "high"]),
            &mut m,
        )
        .unwrap();
        run(parse(&["done", "run"]), &mut m).unwrap();
        run(parse(&["note", "run", "easy", "--date", "2025-09-09"]), &mut m).unwrap();
        run(
            parse(&["goal", "add", "Fit", "--id", "g", "--due", "2025-09-10", "--habit", "run"]),
            &mut m,
        )
        .unwrap();

        let habit = m.habit(&"run".into()).unwrap().unwrap();
        assert_eq!(habit.priority, Priority::High);
        assert_eq!(habit.category.name, "Fitness");
        assert_eq!(habit.completion_history(), vec![d("2025-09-09"), d("2025-09-10")]);
        assert_eq!(m.current_streak(&"run".into()).unwrap(), Some(2));

        let goal = m.goal(&"g".into()).unwrap();
        assert_eq!(goal.habit_ids(), &[HabitId::from("run")]);
        assert_eq!(m.goal_progress(&"g".into(), d("2025-09-09"), goal.due_date).unwrap(), Some(1.0));
    }

    #[test]
    fn test_missing_ids_are_errors() {
        let mut m = manager();
        assert!(run(parse(&["done", "ghost"]), &mut m).is_err());
        assert!(run(parse(&["habit", "add", "x", "--category", "nope"]), &mut m).is_err());
        assert!(run(parse(&["goal", "add", "G", "--habit", "ghost"]), &mut m).is_err());
        assert!(m.goals().is_empty());
        assert!(run(parse(&["goal", "remove", "ghost"]), &mut m).is_err());
    }

    #[tokio::test]
    async fn test_state_survives_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(JsonFileStorage::new(dir.path().join("snapshot.json")));

        let mut m = manager();
        run(parse(&["habit", "add", "Read", "--id", "read", "--frequency", "weekly"]), &mut m).unwrap();
        run(parse(&["habit", "weekly", "read", "3", "1"]), &mut m).unwrap();
        store.try_save_from(&m).await.unwrap();

        let mut reloaded = manager();
        store.try_load_into(&mut reloaded).await.unwrap();
        let habit = reloaded.habit(&"read".into()).unwrap().unwrap();
        assert_eq!(habit.days_of_week(), Some(&[1, 3][..]));
        assert_eq!(habit.category.name, "General");
    }
}
