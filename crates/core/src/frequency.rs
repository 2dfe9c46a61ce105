//! Recurrence of a habit.

use serde::{Deserialize, Serialize};

/// How often a habit is expected.
///
/// Anything other than `daily`, `weekly` or `monthly` is kept verbatim in
/// [`Frequency::Unknown`]; such a habit is never due.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Frequency {
    /// Every day
    Daily,
    /// Selected weekdays (Monday by default)
    Weekly,
    /// One day of the month (the 1st by default)
    Monthly,
    /// Unrecognized value read from storage
    Unknown(String),
}

impl Frequency {
    /// Get string representation.
    pub fn as_str(&self) -> &str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Unknown(raw) => raw,
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Frequency {
    fn from(s: String) -> Self {
        match s.as_str() {
            "daily" => Frequency::Daily,
            "weekly" => Frequency::Weekly,
            "monthly" => Frequency::Monthly,
            _ => Frequency::Unknown(s),
        }
    }
}

impl From<&str> for Frequency {
    fn from(s: &str) -> Self {
        Frequency::from(s.to_string())
    }
}

impl From<Frequency> for String {
    fn from(f: Frequency) -> Self {
        match f {
            Frequency::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}
