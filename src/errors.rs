use thiserror::Error;

use crate::ledger::RecurrenceInterval;

/// Conditions that prevent a projection from being computed. These are
/// meant to be shown to the user instead of a zeroed projection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    #[error("Next pay date is not available")]
    NextPayDateUnavailable,
    #[error("No paychecks found")]
    NoPaychecks,
    #[error("No paychecks found in the next {months} months")]
    NoPaychecksInWindow { months: u32 },
    #[error("Income day is required for specific-date pay schedules")]
    IncomeDayMissing,
    #[error("Weekly pay schedules need a next pay date or income start date")]
    MissingPayAnchor,
}

/// Malformed recurrence configuration. Expansion treats these as producing
/// zero occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecurrenceError {
    #[error("recurring obligation has no interval")]
    MissingInterval,
    #[error("recurring obligation has no start date")]
    MissingStartDate,
    #[error("{0} recurrence requires a day of month")]
    MissingDayOfMonth(RecurrenceInterval),
    #[error("{0} recurrence requires a day of week")]
    MissingDayOfWeek(RecurrenceInterval),
    #[error("day of month {0} is outside 1-31")]
    DayOfMonthOutOfRange(u32),
    #[error("day of week {0} is outside 0-6")]
    DayOfWeekOutOfRange(u32),
}

/// Failures while reading or writing finance snapshots.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
