use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Coarse time-of-day bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// morning 5-12, afternoon 12-17, evening 17-21, night otherwise.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=20 => Self::Evening,
            _ => Self::Night,
        }
    }

    pub fn of(at: DateTime<Utc>) -> Self {
        Self::from_hour(at.hour())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }
}

/// Signals derived from temporal context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalSignals {
    pub time_of_day: TimeOfDay,
    pub day_of_week: Weekday,
    /// How long the current session has been active, in seconds.
    pub session_duration_secs: u64,
    pub time_since_last_query_secs: Option<u64>,
    /// No query has been made in this session yet.
    pub is_new_session: bool,
}

impl TemporalSignals {
    pub fn gather(
        now: DateTime<Utc>,
        session_start: Option<DateTime<Utc>>,
        last_query: Option<DateTime<Utc>>,
    ) -> Self {
        let secs_since = |t: DateTime<Utc>| (now - t).num_seconds().max(0) as u64;
        Self {
            time_of_day: TimeOfDay::of(now),
            day_of_week: now.weekday(),
            session_duration_secs: session_start.map(secs_since).unwrap_or(0),
            time_since_last_query_secs: last_query.map(secs_since),
            is_new_session: last_query.is_none(),
        }
    }
}

impl Default for TemporalSignals {
    fn default() -> Self {
        Self::gather(Utc::now(), None, None)
    }
}
