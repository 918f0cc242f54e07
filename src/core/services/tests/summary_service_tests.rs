use rust_decimal::Decimal;

use super::{date, money};
use crate::core::services::SummaryService;
use crate::ledger::{Bill, CreditCard, IncomeFrequency, PaycheckConfig, RecurrenceInterval, RecurrenceRule};

fn monthly_profile(income: i64) -> PaycheckConfig {
    let mut profile = PaycheckConfig::new(money(income), IncomeFrequency::Monthly);
    profile.monthly_income = Some(money(income));
    profile
}

#[test]
fn bills_are_scaled_to_monthly_equivalents() {
    let weekly = Bill::recurring(
        "Groceries",
        money(100),
        RecurrenceRule::new(RecurrenceInterval::Weekly, date(2024, 1, 1)).on_day_of_week(1),
    );
    let yearly = Bill::recurring(
        "Insurance",
        money(1200),
        RecurrenceRule::new(RecurrenceInterval::Yearly, date(2024, 1, 1)).on_day_of_month(1),
    );
    let quarterly = Bill::recurring(
        "Water",
        money(90),
        RecurrenceRule::new(RecurrenceInterval::Quarterly, date(2024, 1, 1)).on_day_of_month(1),
    );
    let one_time = Bill::one_time("Repair", money(50), date(2024, 2, 1));
    assert_eq!(SummaryService::monthly_equivalent(&weekly), money(433));
    assert_eq!(SummaryService::monthly_equivalent(&yearly), money(100));
    assert_eq!(SummaryService::monthly_equivalent(&quarterly), money(30));
    assert_eq!(SummaryService::monthly_equivalent(&one_time), money(50));
}

#[test]
fn summary_subtracts_bills_and_card_minimums() {
    let profile = monthly_profile(4000);
    let bills = vec![Bill::one_time("Rent", money(1500), date(2024, 3, 1))];
    let mut card = CreditCard::new("Visa", money(1000), date(2024, 3, 20));
    card.minimum_payment = money(100);

    let summary = SummaryService::financial_summary(Some(&profile), &bills, &[card]);
    assert_eq!(summary.total_bills, money(1500));
    assert_eq!(summary.total_minimum_payments, money(100));
    assert_eq!(summary.available_income, money(2400));
    assert_eq!(summary.debt_to_income_ratio, Decimal::new(25, 2));
}

#[test]
fn recommendation_tracks_debt_to_income() {
    let profile = monthly_profile(1000);
    let low_debt = SummaryService::financial_summary(Some(&profile), &[], &[]);
    let low = SummaryService::recommended_spending(&low_debt);
    assert_eq!(low.spending, money(400));
    assert_eq!(low.debt_payment, money(600));

    let heavy = CreditCard::new("Store", money(800), date(2024, 3, 1));
    let high_debt = SummaryService::financial_summary(Some(&profile), &[], &[heavy]);
    let high = SummaryService::recommended_spending(&high_debt);
    assert_eq!(high.spending, money(200));
    assert_eq!(high.debt_payment, money(800));

    let moderate = CreditCard::new("Store", money(300), date(2024, 3, 1));
    let mid_debt = SummaryService::financial_summary(Some(&profile), &[], &[moderate]);
    assert_eq!(SummaryService::recommended_spending(&mid_debt).spending, money(300));
}

#[test]
fn no_income_recommends_nothing() {
    let summary = SummaryService::financial_summary(None, &[], &[]);
    assert_eq!(summary.debt_to_income_ratio, Decimal::ZERO);
    let recommendation = SummaryService::recommended_spending(&summary);
    assert_eq!(recommendation.spending, Decimal::ZERO);
    assert_eq!(recommendation.debt_payment, Decimal::ZERO);
}
