use std::fmt;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::SnapshotError;

/// Wire format used for every calendar date crossing the crate boundary.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Cadence of a recurring obligation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum RecurrenceInterval {
    Weekly,
    BiWeekly,
    Monthly,
    Quarterly,
    Yearly,
}

/// How far the iteration cursor moves between two occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Days(i64),
    Months(i32),
}

impl RecurrenceInterval {
    pub fn step(self) -> Step {
        match self {
            RecurrenceInterval::Weekly => Step::Days(7),
            RecurrenceInterval::BiWeekly => Step::Days(14),
            RecurrenceInterval::Monthly => Step::Months(1),
            RecurrenceInterval::Quarterly => Step::Months(3),
            RecurrenceInterval::Yearly => Step::Months(12),
        }
    }

    /// Weekly cadences are anchored on a weekday, the others on a day of month.
    pub fn uses_day_of_week(self) -> bool {
        matches!(
            self,
            RecurrenceInterval::Weekly | RecurrenceInterval::BiWeekly
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            RecurrenceInterval::Weekly => "Weekly",
            RecurrenceInterval::BiWeekly => "Bi-weekly",
            RecurrenceInterval::Monthly => "Monthly",
            RecurrenceInterval::Quarterly => "Quarterly",
            RecurrenceInterval::Yearly => "Yearly",
        }
    }
}

impl fmt::Display for RecurrenceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive calendar window `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// The calendar month containing `reference`.
    pub fn month_of(reference: NaiveDate) -> Self {
        Self {
            start: start_of_month(reference),
            end: end_of_month(reference),
        }
    }
}

/// Parses a `yyyy-MM-dd` date, also accepting full timestamps whose time of
/// day is dropped.
pub fn parse_iso_date(raw: &str) -> Result<NaiveDate, SnapshotError> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT) {
        return Ok(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(stamp.date_naive());
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .map(|naive| naive.date())
        .map_err(|_| SnapshotError::InvalidDate(raw.to_string()))
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date_in_month(date.year(), date.month(), 1)
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    date_in_month(date.year(), date.month(), days_in_month(date.year(), date.month()))
}

/// Builds `(year, month, day)`, clamping `day` to the length of the month.
pub fn date_in_month(year: i32, month: u32, day: u32) -> NaiveDate {
    let day = day.clamp(1, days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// Calendar month arithmetic; the day of month is clamped when the target
/// month is shorter. Saturates at the bounds of the supported calendar.
pub fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    checked_shift_month(date, months).unwrap_or(if months < 0 {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    })
}

/// [`shift_month`], or `None` when the target month is out of range.
pub fn checked_shift_month(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let index = (date.year() * 12 + date.month0() as i32).checked_add(months)?;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(date_in_month(year, month, date.day()))
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match NaiveDate::from_ymd_opt(next_year, next_month, 1) {
        Some(first_next) => (first_next - Duration::days(1)).day(),
        None => 31,
    }
}

/// Whole months between the months of `from` and `to`, ignoring days.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    (to.year() * 12 + to.month0() as i32) - (from.year() * 12 + from.month0() as i32)
}

/// First date of the linear series `anchor + k * interval_days` that is not
/// before `reference`, if the calendar reaches it.
pub fn first_on_or_after(anchor: NaiveDate, reference: NaiveDate, interval_days: i64) -> Option<NaiveDate> {
    if reference <= anchor {
        return Some(anchor);
    }
    let diff = (reference - anchor).num_days();
    let steps = (diff + interval_days - 1).div_euclid(interval_days);
    anchor.checked_add_signed(Duration::days(steps * interval_days))
}
