//! Live / starting-soon / upcoming status of a scheduled class.
//!
//! Everything here is a pure function of a start instant and "now"; callers
//! recompute on every tick instead of storing the result.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

const MS_PER_MINUTE: i64 = 60_000;

/// Classes starting within this many minutes count as starting soon.
pub const STARTING_SOON_MINUTES: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassSchedule {
    pub start_instant: DateTime<Utc>,
    pub duration_minutes: u32,
}

/// Derived countdown values for one evaluation.
///
/// `is_live` holds exactly when `milliseconds_until_start` is zero.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, ToSchema)]
pub struct TimeStatus {
    pub is_live: bool,
    pub milliseconds_until_start: u64,
    pub minutes_until_start: u64,
    pub hours_until_start: u64,
}

impl TimeStatus {
    pub const LIVE: TimeStatus = TimeStatus {
        is_live: true,
        milliseconds_until_start: 0,
        minutes_until_start: 0,
        hours_until_start: 0,
    };

    pub fn status(&self) -> ClassStatus {
        ClassStatus::classify(self)
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassStatus {
    Live,
    StartingSoon,
    Upcoming,
}

impl ClassStatus {
    pub fn classify(status: &TimeStatus) -> Self {
        if status.is_live {
            ClassStatus::Live
        } else if status.minutes_until_start > 0
            && status.minutes_until_start <= STARTING_SOON_MINUTES
        {
            ClassStatus::StartingSoon
        } else {
            ClassStatus::Upcoming
        }
    }
}

pub fn compute_time_status(start: DateTime<Utc>, now: DateTime<Utc>) -> TimeStatus {
    let diff = (start - now).num_milliseconds();
    if diff <= 0 {
        return TimeStatus::LIVE;
    }

    let minutes = diff / MS_PER_MINUTE;
    // Less than a full minute left is shown as live, not "0 minutes".
    if minutes == 0 {
        return TimeStatus::LIVE;
    }

    TimeStatus {
        is_live: false,
        milliseconds_until_start: diff as u64,
        minutes_until_start: minutes as u64,
        hours_until_start: (minutes / 60) as u64,
    }
}

pub fn time_status_now(start: DateTime<Utc>) -> TimeStatus {
    compute_time_status(start, Utc::now())
}

/// Formats a class length as `H:MM`, `H:00` or `M:00`.
pub fn format_duration(total_minutes: u32) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    match (hours, minutes) {
        (h, m) if h > 0 && m > 0 => format!("{h}:{m:02}"),
        (h, _) if h > 0 => format!("{h}:00"),
        (_, m) => format!("{m}:00"),
    }
}

/// Formats the remaining time as `M:SS`; non-positive input gives `0:00`.
pub fn format_countdown(milliseconds: i64) -> String {
    if milliseconds <= 0 {
        return "0:00".to_string();
    }
    let total_secs = milliseconds / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// Pluralised minute count used by badges and join labels.
pub fn minutes_label(minutes: u64) -> String {
    if minutes == 1 {
        "1 min".to_string()
    } else {
        format!("{minutes} mins")
    }
}
