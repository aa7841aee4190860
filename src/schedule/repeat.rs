//! Alarm repeat policies

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// How a fired alarm re-arms for its next occurrence.
///
/// The weekly variant carries its target day so a persisted weekly alarm
/// can never be missing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatPolicy {
    /// Fire once at the candidate instant; the caller corrects a past
    /// candidate by pushing it one day forward.
    #[default]
    None,
    /// Fire every day at the candidate time
    Daily,
    /// Fire Monday through Friday at the candidate time
    Weekdays,
    /// Fire once a week on the given day at the candidate time
    Weekly(Weekday),
}

impl RepeatPolicy {
    /// Whether the alarm re-arms after firing
    pub fn repeats(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Saturday and Sunday are excluded by the Weekdays policy
pub fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}
