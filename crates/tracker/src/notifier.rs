//! Reminder delivery.

use habitual_core::Habit;
use tracing::info;

/// Delivers a reminder for a habit. Fire-and-forget: failures stay inside
/// the implementation.
pub trait Notifier: Send + Sync {
    /// Remind the user about `habit`.
    fn send_reminder(&self, habit: &Habit);
}

/// Emits reminders as `info` tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn send_reminder(&self, habit: &Habit) {
        info!(
            habit = %habit.id,
            name = %habit.name,
            category = %habit.category.name,
            priority = %habit.priority,
            "reminder"
        );
    }
}

/// Prints reminders to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    /// Text printed for `habit`.
    pub fn format_reminder(habit: &Habit) -> String {
        format!(
            "Reminder: don't forget \"{}\" [{}] (priority: {})",
            habit.name, habit.category.name, habit.priority
        )
    }
}

impl Notifier for ConsoleNotifier {
    fn send_reminder(&self, habit: &Habit) {
        println!("{}", Self::format_reminder(habit));
    }
}
