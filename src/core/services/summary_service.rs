//! Monthly financial summary and spending recommendation.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::ledger::{Bill, CreditCard, PaycheckConfig, RecurrenceInterval};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FinancialSummary {
    pub income: Decimal,
    /// Bills scaled to their monthly equivalent.
    pub total_bills: Decimal,
    pub total_minimum_payments: Decimal,
    pub total_debt: Decimal,
    pub available_income: Decimal,
    pub debt_to_income_ratio: Decimal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendedSpending {
    pub spending: Decimal,
    pub debt_payment: Decimal,
}

pub struct SummaryService;

impl SummaryService {
    /// Monthly amount a bill represents. One-time bills count once.
    pub fn monthly_equivalent(bill: &Bill) -> Decimal {
        if !bill.is_recurring() {
            return bill.amount;
        }
        match bill.recurrence_interval {
            Some(RecurrenceInterval::Weekly) => bill.amount * Decimal::new(433, 2),
            Some(RecurrenceInterval::BiWeekly) => bill.amount * Decimal::new(217, 2),
            Some(RecurrenceInterval::Quarterly) => bill.amount / Decimal::from(3),
            Some(RecurrenceInterval::Yearly) => bill.amount / Decimal::from(12),
            Some(RecurrenceInterval::Monthly) | None => bill.amount,
        }
    }

    pub fn financial_summary(
        profile: Option<&PaycheckConfig>,
        bills: &[Bill],
        credit_cards: &[CreditCard],
    ) -> FinancialSummary {
        let income = profile.map(PaycheckConfig::monthly_income).unwrap_or_default();
        let total_bills: Decimal = bills.iter().map(Self::monthly_equivalent).sum();
        let total_minimum_payments: Decimal = credit_cards.iter().map(|card| card.minimum_payment).sum();
        let total_debt: Decimal = credit_cards.iter().map(|card| card.current_balance).sum();
        let debt_to_income_ratio = if income > Decimal::ZERO {
            total_debt / income
        } else {
            Decimal::ZERO
        };
        FinancialSummary {
            income,
            total_bills,
            total_minimum_payments,
            total_debt,
            available_income: income - total_bills - total_minimum_payments,
            debt_to_income_ratio,
        }
    }

    /// Splits the available income between spending and debt repayment,
    /// leaning towards repayment as the debt-to-income ratio grows.
    pub fn recommended_spending(summary: &FinancialSummary) -> RecommendedSpending {
        if summary.available_income <= Decimal::ZERO {
            return RecommendedSpending {
                spending: Decimal::ZERO,
                debt_payment: Decimal::ZERO,
            };
        }
        let ratio = if summary.debt_to_income_ratio > Decimal::new(5, 1) {
            Decimal::new(2, 1)
        } else if summary.debt_to_income_ratio < Decimal::new(2, 1) {
            Decimal::new(4, 1)
        } else {
            Decimal::new(3, 1)
        };
        let spending = summary.available_income * ratio;
        let debt_payment = summary.available_income - spending;
        RecommendedSpending {
            spending: spending.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
            debt_payment: debt_payment.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        }
    }
}
