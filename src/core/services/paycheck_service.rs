//! Paycheck timing, from stored rows or from the income configuration.

use chrono::{Datelike, Duration, NaiveDate};

use crate::errors::ProjectionError;
use crate::ledger::time_interval::{
    checked_shift_month, date_in_month, end_of_month, shift_month, start_of_month,
};
use crate::ledger::{IncomeFrequency, PayDates, Paycheck, PaycheckConfig};

const BI_MONTHLY_FIRST_PAY_DAY: u32 = 15;

pub struct PaycheckService;

impl PaycheckService {
    /// Earliest stored paycheck date strictly after `today`.
    pub fn next_paycheck_date(paychecks: &[Paycheck], today: NaiveDate) -> Option<NaiveDate> {
        paychecks
            .iter()
            .map(|paycheck| paycheck.payment_date)
            .filter(|date| *date > today)
            .min()
    }

    /// Stored paychecks with `start <= payment_date < end`, in date order.
    pub fn upcoming_paychecks(paychecks: &[Paycheck], start: NaiveDate, end: NaiveDate) -> Vec<Paycheck> {
        let mut upcoming: Vec<Paycheck> = paychecks
            .iter()
            .filter(|paycheck| paycheck.payment_date >= start && paycheck.payment_date < end)
            .cloned()
            .collect();
        upcoming.sort_by_key(|paycheck| paycheck.payment_date);
        upcoming
    }

    /// Last and next pay dates around `today`, derived from the income
    /// frequency alone. Weekly, bi-weekly and monthly schedules are offsets
    /// from `today` and ignore the configured pay day.
    pub fn pay_dates(config: &PaycheckConfig, today: NaiveDate) -> Result<PayDates, ProjectionError> {
        let (last, next) = match config.income_frequency {
            IncomeFrequency::Weekly => (today - Duration::days(7), today + Duration::days(7)),
            IncomeFrequency::BiWeekly => (today - Duration::days(14), today + Duration::days(14)),
            IncomeFrequency::BiMonthly => {
                let fifteenth = date_in_month(today.year(), today.month(), BI_MONTHLY_FIRST_PAY_DAY);
                let month_end = end_of_month(today);
                if today.day() < BI_MONTHLY_FIRST_PAY_DAY {
                    (end_of_month(shift_month(today, -1)), fifteenth)
                } else if today < month_end {
                    (fifteenth, month_end)
                } else {
                    let next_month = shift_month(start_of_month(today), 1);
                    (
                        month_end,
                        date_in_month(next_month.year(), next_month.month(), BI_MONTHLY_FIRST_PAY_DAY),
                    )
                }
            }
            IncomeFrequency::Monthly => (shift_month(today, -1), shift_month(today, 1)),
            IncomeFrequency::SpecificDate => {
                let day = config.income_day.ok_or(ProjectionError::IncomeDayMissing)?;
                let in_month = |offset: i32| {
                    let month = shift_month(start_of_month(today), offset);
                    date_in_month(month.year(), month.month(), day)
                };
                let this_month = in_month(0);
                if today < this_month {
                    (in_month(-1), this_month)
                } else {
                    (this_month, in_month(1))
                }
            }
        };
        Ok(PayDates {
            last: Some(last),
            next: Some(next),
        })
    }

    /// Paychecks implied by `config` with `start <= date < end`.
    pub fn derive_paychecks(
        config: &PaycheckConfig,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Paycheck>, ProjectionError> {
        if end <= start {
            return Ok(Vec::new());
        }
        let dates = match config.income_frequency {
            IncomeFrequency::Weekly => linear_dates(pay_anchor(config)?, 7, start, end),
            IncomeFrequency::BiWeekly => linear_dates(pay_anchor(config)?, 14, start, end),
            IncomeFrequency::BiMonthly => monthly_dates(start, end, |year, month| {
                vec![
                    date_in_month(year, month, BI_MONTHLY_FIRST_PAY_DAY),
                    date_in_month(year, month, 31),
                ]
            }),
            IncomeFrequency::Monthly | IncomeFrequency::SpecificDate => {
                let day = config.income_day.ok_or(ProjectionError::IncomeDayMissing)?;
                monthly_dates(start, end, |year, month| vec![date_in_month(year, month, day)])
            }
        };
        Ok(dates
            .into_iter()
            .map(|date| Paycheck::derived(config.income_amount, date))
            .collect())
    }
}

fn pay_anchor(config: &PaycheckConfig) -> Result<NaiveDate, ProjectionError> {
    config
        .next_paydate_override
        .or(config.income_start_date)
        .ok_or(ProjectionError::MissingPayAnchor)
}

// The series extends in both directions from the anchor.
fn linear_dates(anchor: NaiveDate, step: i64, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let offset = (start - anchor).num_days();
    let steps = (offset + step - 1).div_euclid(step);
    let mut next = anchor.checked_add_signed(Duration::days(steps * step));
    let mut dates = Vec::new();
    while let Some(cursor) = next.filter(|cursor| *cursor < end) {
        dates.push(cursor);
        next = cursor.checked_add_signed(Duration::days(step));
    }
    dates
}

fn monthly_dates<F>(start: NaiveDate, end: NaiveDate, pay_days: F) -> Vec<NaiveDate>
where
    F: Fn(i32, u32) -> Vec<NaiveDate>,
{
    let mut dates = Vec::new();
    let mut next = Some(start_of_month(start));
    while let Some(month) = next.filter(|month| *month < end) {
        dates.extend(
            pay_days(month.year(), month.month())
                .into_iter()
                .filter(|date| *date >= start && *date < end),
        );
        next = checked_shift_month(month, 1);
    }
    dates
}
