//! habitual core data models.
//!
//! This crate defines habits, goals and categories together with the
//! scheduling and progress rules that drive them. Nothing here performs I/O.

#![warn(missing_docs)]

// Core identities
mod id;

// Labels and enums
mod category;
mod frequency;
mod priority;

// Dates
pub mod calendar;
mod clock;

// Entities
mod habit;
mod goal;

// Re-exports
pub use id::*;

pub use category::Category;
pub use frequency::Frequency;
pub use priority::Priority;

pub use calendar::{parse_iso_date, format_iso_date, CalendarError};
pub use clock::{Clock, SystemClock, FixedClock};

pub use habit::{Habit, DEFAULT_WEEKDAY, DEFAULT_DAY_OF_MONTH};
pub use goal::Goal;

/// Calendar date type used throughout habitual.
pub type Date = chrono::NaiveDate;
