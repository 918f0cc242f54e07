//! Dashboard-style views: what is due before the next paycheck and the
//! short-term outlook.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::services::{CardPaths, ObligationService, PaycheckService};
use crate::core::source::FinanceSnapshot;
use crate::errors::ProjectionError;
use crate::ledger::{total_amount, total_available, CardPaymentRecord, Occurrence, PayDates, Paycheck};

pub const DEFAULT_OUTLOOK_DAYS: i64 = 30;

/// Obligations due between today and the next stored paycheck.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NextPaycheckOverview {
    pub today: NaiveDate,
    pub next_pay_date: NaiveDate,
    pub obligations: Vec<Occurrence>,
    pub available_funds: Decimal,
    pub unpaid_total: Decimal,
    /// Funds left once every unpaid obligation is settled.
    pub projected_balance: Decimal,
}

/// Funds, income and outgoings over the next few weeks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThirtyDayOutlook {
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub available_funds: Decimal,
    pub paychecks: Vec<Paycheck>,
    pub bills: Vec<Occurrence>,
    pub card_payments: Vec<CardPaymentRecord>,
    /// Derived from the income configuration when one exists.
    pub pay_dates: Option<PayDates>,
}

impl ThirtyDayOutlook {
    pub fn expected_income(&self) -> Decimal {
        self.paychecks.iter().map(|paycheck| paycheck.amount).sum()
    }

    pub fn bills_total(&self) -> Decimal {
        total_amount(&self.bills)
    }

    pub fn card_payments_total(&self) -> Decimal {
        self.card_payments.iter().map(|payment| payment.amount).sum()
    }

    pub fn expected_funds(&self) -> Decimal {
        self.available_funds + self.expected_income()
    }

    pub fn remaining_after_bills(&self) -> Decimal {
        self.expected_funds() - self.bills_total() - self.card_payments_total()
    }
}

pub struct OverviewService;

impl OverviewService {
    /// Stored bills plus both card payment paths due in `[today, next pay
    /// date]`, with duplicate card payments removed.
    pub fn next_paycheck(
        snapshot: &FinanceSnapshot,
        credit_card_category: &str,
        today: NaiveDate,
    ) -> Result<NextPaycheckOverview, ProjectionError> {
        let next_pay_date = PaycheckService::next_paycheck_date(&snapshot.paychecks, today)
            .ok_or(ProjectionError::NextPayDateUnavailable)?;
        let sources = snapshot.obligation_sources(credit_card_category);
        let obligations = ObligationService::dedup_card_payments(
            ObligationService::obligations_in_range(&sources, CardPaths::ALL, today, next_pay_date),
        );
        let available_funds = total_available(&snapshot.debit_cards);
        let unpaid_total = total_amount(obligations.iter().filter(|item| !item.is_paid));
        debug!(%next_pay_date, obligations = obligations.len(), "next paycheck overview");
        Ok(NextPaycheckOverview {
            today,
            next_pay_date,
            obligations,
            available_funds,
            unpaid_total,
            projected_balance: available_funds - unpaid_total,
        })
    }

    /// Stored-bill occurrences in `[today, today + days]`, paychecks in
    /// `[today, today + days)` and planned card payments in
    /// `(today, today + days]`.
    pub fn thirty_day_outlook(
        snapshot: &FinanceSnapshot,
        credit_card_category: &str,
        today: NaiveDate,
        days: i64,
    ) -> ThirtyDayOutlook {
        let window_end = today + Duration::days(days.max(0));
        let sources = snapshot.obligation_sources(credit_card_category);
        let bills = ObligationService::obligations_in_range(&sources, CardPaths::NONE, today, window_end);
        let paychecks = PaycheckService::upcoming_paychecks(&snapshot.paychecks, today, window_end);
        let mut card_payments: Vec<CardPaymentRecord> = snapshot
            .card_payments
            .iter()
            .filter(|payment| payment.payment_date > today && payment.payment_date <= window_end)
            .cloned()
            .collect();
        card_payments.sort_by_key(|payment| payment.payment_date);
        let pay_dates = snapshot
            .profile
            .as_ref()
            .and_then(|config| PaycheckService::pay_dates(config, today).ok());
        ThirtyDayOutlook {
            window_start: today,
            window_end,
            available_funds: total_available(&snapshot.debit_cards),
            paychecks,
            bills,
            card_payments,
            pay_dates,
        }
    }
}
