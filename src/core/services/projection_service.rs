//! Running-balance projection across paycheck periods.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::services::{
    CardPaths, ObligationService, OverviewService, PaycheckService, ServiceResult,
};
use crate::core::source::FinanceSnapshot;
use crate::errors::ProjectionError;
use crate::ledger::time_interval::shift_month;
use crate::ledger::{total_amount, Obligation, Occurrence, Paycheck, SavingsPayment};

pub const DEFAULT_PROJECTION_MONTHS: u32 = 6;

/// One slice of the projection, from a paycheck up to (not including) the next.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectionPeriod {
    pub paycheck: Paycheck,
    pub period_start: NaiveDate,
    /// Exclusive.
    pub period_end: NaiveDate,
    pub obligations: Vec<Occurrence>,
    pub savings: Vec<SavingsPayment>,
    pub starting_balance: Decimal,
    pub ending_balance: Decimal,
}

impl ProjectionPeriod {
    pub fn obligations_total(&self) -> Decimal {
        total_amount(&self.obligations)
    }

    pub fn savings_total(&self) -> Decimal {
        self.savings.iter().map(|payment| payment.amount).sum()
    }
}

/// Explicit inputs of [`ProjectionService::project`].
#[derive(Debug, Clone, Copy)]
pub struct ProjectionRequest<'a> {
    pub starting_balance: Decimal,
    pub obligations: &'a [Obligation],
    pub paychecks: &'a [Paycheck],
    pub savings: &'a [SavingsPayment],
    pub today: NaiveDate,
    pub window_months: u32,
    pub include_savings: bool,
}

/// The multi-month projection shown as the income book.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IncomeBook {
    pub starting_balance: Decimal,
    pub window_end: NaiveDate,
    pub periods: Vec<ProjectionPeriod>,
}

impl IncomeBook {
    pub fn ending_balance(&self) -> Decimal {
        self.periods
            .last()
            .map(|period| period.ending_balance)
            .unwrap_or(self.starting_balance)
    }
}

pub struct ProjectionService;

impl ProjectionService {
    /// Splits `[today, today + window_months)` into one period per paycheck
    /// and carries the running balance from period to period.
    pub fn project(request: &ProjectionRequest<'_>) -> Result<Vec<ProjectionPeriod>, ProjectionError> {
        if request.paychecks.is_empty() {
            return Err(ProjectionError::NoPaychecks);
        }
        let window_end = shift_month(request.today, request.window_months as i32);
        let paychecks = PaycheckService::upcoming_paychecks(request.paychecks, request.today, window_end);
        if paychecks.is_empty() {
            return Err(ProjectionError::NoPaychecksInWindow {
                months: request.window_months,
            });
        }

        let mut running = request.starting_balance;
        let mut periods = Vec::with_capacity(paychecks.len());
        for (index, paycheck) in paychecks.iter().enumerate() {
            let period_start = paycheck.payment_date;
            let period_end = paychecks
                .get(index + 1)
                .map(|next| next.payment_date)
                .unwrap_or(window_end);

            let obligations = if period_end > period_start {
                ObligationService::dedup_card_payments(ObligationService::occurrences(
                    request.obligations,
                    period_start,
                    period_end - Duration::days(1),
                ))
            } else {
                Vec::new()
            };
            let savings = if request.include_savings {
                savings_in(request.savings, period_start, period_end)
            } else {
                Vec::new()
            };

            let starting_balance = running;
            running += paycheck.amount;
            running -= total_amount(&obligations);
            running -= savings.iter().map(|payment| payment.amount).sum::<Decimal>();

            periods.push(ProjectionPeriod {
                paycheck: paycheck.clone(),
                period_start,
                period_end,
                obligations,
                savings,
                starting_balance,
                ending_balance: running,
            });
        }
        info!(periods = periods.len(), "cash flow projected");
        Ok(periods)
    }

    /// Builds the income book from a snapshot. Without an explicit
    /// `starting_balance` it is seeded with available funds less the unpaid
    /// obligations due before the first projected paycheck.
    pub fn income_book(
        snapshot: &FinanceSnapshot,
        credit_card_category: &str,
        today: NaiveDate,
        window_months: u32,
        include_savings: bool,
        starting_balance: Option<Decimal>,
    ) -> ServiceResult<IncomeBook> {
        let window_end = shift_month(today, window_months as i32);
        let starting_balance = match starting_balance {
            Some(balance) => balance,
            None => {
                let overview = OverviewService::next_paycheck(snapshot, credit_card_category, today)?;
                let first_pay_date = PaycheckService::upcoming_paychecks(&snapshot.paychecks, today, window_end)
                    .first()
                    .map(|paycheck| paycheck.payment_date);
                match first_pay_date {
                    // The first period already covers everything from its paycheck on.
                    Some(first) => {
                        overview.available_funds
                            - total_amount(
                                overview
                                    .obligations
                                    .iter()
                                    .filter(|item| !item.is_paid && item.due_date < first),
                            )
                    }
                    None => overview.projected_balance,
                }
            }
        };
        let sources = snapshot.obligation_sources(credit_card_category);
        let obligations = ObligationService::collect(&sources, CardPaths::MINIMUM);
        let request = ProjectionRequest {
            starting_balance,
            obligations: &obligations,
            paychecks: &snapshot.paychecks,
            savings: &snapshot.savings_payments,
            today,
            window_months,
            include_savings,
        };
        let periods = Self::project(&request)?;
        Ok(IncomeBook {
            starting_balance,
            window_end,
            periods,
        })
    }
}

fn savings_in(payments: &[SavingsPayment], start: NaiveDate, end: NaiveDate) -> Vec<SavingsPayment> {
    let mut selected: Vec<SavingsPayment> = payments
        .iter()
        .filter(|payment| payment.payment_date >= start && payment.payment_date < end)
        .cloned()
        .collect();
    selected.sort_by_key(|payment| payment.payment_date);
    selected
}
