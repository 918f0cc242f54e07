//! Expansion of recurring obligations into concrete dates.

use chrono::{Datelike, Duration, NaiveDate};
use tracing::debug;

use super::{
    obligation::{Obligation, RecurrenceRule, Schedule},
    time_interval::{checked_shift_month, date_in_month, first_on_or_after, months_between, Step},
    RecurrenceInterval,
};

const DUE_SOON_WINDOW_DAYS: i64 = 7;

/// Dates on which a recurring obligation falls inside `[window_start, window_end]`.
///
/// One-time obligations and malformed rules yield no dates.
pub fn expand(obligation: &Obligation, window_start: NaiveDate, window_end: NaiveDate) -> Vec<NaiveDate> {
    match &obligation.schedule {
        Schedule::OneTime => Vec::new(),
        Schedule::Recurring(rule) => {
            let dates = expand_rule(rule, window_start, window_end);
            if dates.is_empty() {
                debug!(obligation = %obligation.id, "no occurrences in window");
            }
            dates
        }
    }
}

/// Every date `obligation` is due within the window, one-time or recurring.
pub fn occurrence_dates(
    obligation: &Obligation,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Vec<NaiveDate> {
    match obligation.schedule {
        Schedule::OneTime => {
            if obligation.due_date >= window_start && obligation.due_date <= window_end {
                vec![obligation.due_date]
            } else {
                Vec::new()
            }
        }
        Schedule::Recurring(_) => expand(obligation, window_start, window_end),
    }
}

/// Expands a bare rule. The cursor walks forward from the start date and stops
/// once it passes `min(end_date, window_end)`.
pub fn expand_rule(rule: &RecurrenceRule, window_start: NaiveDate, window_end: NaiveDate) -> Vec<NaiveDate> {
    let rule = match rule.validate() {
        Ok(rule) => rule,
        Err(err) => {
            debug!(error = %err, "skipping malformed recurrence");
            return Vec::new();
        }
    };
    if window_end < window_start {
        return Vec::new();
    }
    let limit = match rule.end_date {
        Some(end) if end < window_start => return Vec::new(),
        Some(end) => end.min(window_end),
        None => window_end,
    };

    let mut dates = Vec::new();
    match rule.interval.step() {
        Step::Days(days) => {
            let mut next = first_on_or_after(rule.start_date, window_start, days);
            while let Some(cursor) = next.filter(|cursor| *cursor <= limit) {
                dates.push(cursor);
                next = cursor.checked_add_signed(Duration::days(days));
            }
        }
        Step::Months(months) => {
            let behind = months_between(rule.start_date, window_start).div_euclid(months) - 1;
            let mut index = behind.max(0);
            loop {
                let cursor = match checked_shift_month(rule.start_date, index * months) {
                    Some(cursor) if cursor <= limit => cursor,
                    _ => break,
                };
                if cursor >= window_start {
                    let candidate = if rule.interval == RecurrenceInterval::Yearly {
                        cursor
                    } else {
                        date_in_month(cursor.year(), cursor.month(), rule.day_of_month)
                    };
                    if candidate >= window_start && candidate <= limit {
                        dates.push(candidate);
                    }
                }
                index += 1;
            }
        }
    }
    dates
}

/// How close an occurrence is relative to a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleStatus {
    Overdue,
    DueToday,
    DueSoon(i64),
    Upcoming,
}

impl ScheduleStatus {
    pub fn classify(due: NaiveDate, today: NaiveDate) -> ScheduleStatus {
        let days = (due - today).num_days();
        if days < 0 {
            ScheduleStatus::Overdue
        } else if days == 0 {
            ScheduleStatus::DueToday
        } else if days <= DUE_SOON_WINDOW_DAYS {
            ScheduleStatus::DueSoon(days)
        } else {
            ScheduleStatus::Upcoming
        }
    }

    /// Short label; upcoming dates render as `Mon D`.
    pub fn label(self, due: NaiveDate) -> String {
        match self {
            ScheduleStatus::Overdue => "Overdue".into(),
            ScheduleStatus::DueToday => "Due Today".into(),
            ScheduleStatus::DueSoon(1) => "Due in 1 day".into(),
            ScheduleStatus::DueSoon(days) => format!("Due in {days} days"),
            ScheduleStatus::Upcoming => due.format("%b %-d").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::RecurrenceInterval;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn monthly_reanchors_day_every_month() {
        let rule = RecurrenceRule::new(RecurrenceInterval::Monthly, date(2024, 1, 20)).on_day_of_month(5);
        let dates = expand_rule(&rule, date(2024, 2, 1), date(2024, 4, 30));
        assert_eq!(dates, vec![date(2024, 2, 5), date(2024, 3, 5), date(2024, 4, 5)]);
    }

    #[test]
    fn monthly_clamps_to_last_day_of_short_month() {
        let rule = RecurrenceRule::new(RecurrenceInterval::Monthly, date(2024, 1, 31)).on_day_of_month(31);
        let dates = expand_rule(&rule, date(2024, 2, 1), date(2024, 2, 29));
        assert_eq!(dates, vec![date(2024, 2, 29)]);
    }

    #[test]
    fn quarterly_steps_three_months() {
        let rule = RecurrenceRule::new(RecurrenceInterval::Quarterly, date(2024, 1, 10)).on_day_of_month(10);
        let dates = expand_rule(&rule, date(2024, 1, 1), date(2024, 12, 31));
        assert_eq!(
            dates,
            vec![date(2024, 1, 10), date(2024, 4, 10), date(2024, 7, 10), date(2024, 10, 10)]
        );
    }

    #[test]
    fn yearly_keeps_start_month_and_day() {
        let rule = RecurrenceRule::new(RecurrenceInterval::Yearly, date(2020, 6, 3)).on_day_of_month(28);
        let dates = expand_rule(&rule, date(2023, 1, 1), date(2025, 12, 31));
        assert_eq!(dates, vec![date(2023, 6, 3), date(2024, 6, 3), date(2025, 6, 3)]);
    }

    #[test]
    fn end_date_is_inclusive_and_cuts_series() {
        let rule = RecurrenceRule::new(RecurrenceInterval::Weekly, date(2024, 1, 1))
            .on_day_of_week(1)
            .ending(date(2024, 1, 15));
        let dates = expand_rule(&rule, date(2024, 1, 1), date(2024, 1, 31));
        assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 1, 8), date(2024, 1, 15)]);
    }

    #[test]
    fn ended_before_window_is_empty() {
        let rule = RecurrenceRule::new(RecurrenceInterval::BiWeekly, date(2023, 1, 1))
            .on_day_of_week(0)
            .ending(date(2023, 6, 30));
        assert!(expand_rule(&rule, date(2024, 1, 1), date(2024, 1, 31)).is_empty());
    }

    #[test]
    fn inverted_window_is_empty() {
        let rule = RecurrenceRule::new(RecurrenceInterval::Weekly, date(2024, 1, 1)).on_day_of_week(1);
        assert!(expand_rule(&rule, date(2024, 2, 1), date(2024, 1, 1)).is_empty());
    }

    #[test]
    fn expansion_stops_at_end_of_calendar() {
        let start = NaiveDate::MAX - Duration::days(10);
        let weekly = RecurrenceRule::new(RecurrenceInterval::Weekly, start).on_day_of_week(0);
        assert_eq!(
            expand_rule(&weekly, start, NaiveDate::MAX),
            vec![start, start + Duration::days(7)]
        );

        let last_month = NaiveDate::MAX.with_day(1).unwrap();
        let monthly = RecurrenceRule::new(RecurrenceInterval::Monthly, last_month).on_day_of_month(1);
        assert_eq!(expand_rule(&monthly, last_month, NaiveDate::MAX), vec![last_month]);
    }

    #[test]
    fn due_status_labels() {
        let today = date(2024, 5, 10);
        assert_eq!(ScheduleStatus::classify(today, today).label(today), "Due Today");
        let soon = date(2024, 5, 13);
        assert_eq!(ScheduleStatus::classify(soon, today).label(soon), "Due in 3 days");
        let later = date(2024, 6, 2);
        assert_eq!(ScheduleStatus::classify(later, today).label(later), "Jun 2");
        assert_eq!(ScheduleStatus::classify(date(2024, 5, 1), today), ScheduleStatus::Overdue);
    }
}
