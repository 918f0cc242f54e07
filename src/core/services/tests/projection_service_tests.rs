use rust_decimal::Decimal;
use uuid::Uuid;

use super::{date, money};
use crate::core::services::{
    CardPaths, ObligationService, ObligationSources, ProjectionRequest, ProjectionService, ServiceError,
};
use crate::core::source::FinanceSnapshot;
use crate::errors::ProjectionError;
use crate::ledger::{
    Bill, CategoryIndex, DebitCard, Obligation, Paycheck, RecurrenceInterval, RecurrenceRule,
    SavingsPayment,
};

fn obligations(bills: &[Bill]) -> Vec<Obligation> {
    let sources = ObligationSources {
        bills,
        credit_cards: &[],
        debit_cards: &[],
        categories: CategoryIndex::new(&[]),
    };
    ObligationService::collect(&sources, CardPaths::NONE)
}

fn request<'a>(
    obligations: &'a [Obligation],
    paychecks: &'a [Paycheck],
    savings: &'a [SavingsPayment],
) -> ProjectionRequest<'a> {
    ProjectionRequest {
        starting_balance: money(1000),
        obligations,
        paychecks,
        savings,
        today: date(2024, 3, 1),
        window_months: 6,
        include_savings: true,
    }
}

#[test]
fn single_period_balance_matches_hand_computation() {
    let bills = vec![
        Bill::one_time("Rent", money(600), date(2024, 3, 5)),
        Bill::one_time("Car", money(200), date(2024, 3, 20)),
    ];
    let obligations = obligations(&bills);
    let paychecks = vec![Paycheck::new(money(2000), date(2024, 3, 1))];
    let periods = ProjectionService::project(&request(&obligations, &paychecks, &[])).unwrap();

    assert_eq!(periods.len(), 1);
    let period = &periods[0];
    assert_eq!(period.period_end, date(2024, 9, 1));
    assert_eq!(period.starting_balance, money(1000));
    assert_eq!(period.obligations_total(), money(800));
    assert_eq!(period.ending_balance, money(2200));
}

#[test]
fn periods_are_half_open_and_chain_balances() {
    let bills = vec![Bill::recurring(
        "Phone",
        money(50),
        RecurrenceRule::new(RecurrenceInterval::Monthly, date(2024, 1, 15)).on_day_of_month(15),
    )];
    let obligations = obligations(&bills);
    let paychecks = vec![
        Paycheck::new(money(1000), date(2024, 3, 15)),
        Paycheck::new(money(1000), date(2024, 3, 1)),
    ];
    let mut request = request(&obligations, &paychecks, &[]);
    request.window_months = 1;
    let periods = ProjectionService::project(&request).unwrap();

    assert_eq!(periods.len(), 2);
    assert_eq!(periods[0].period_start, date(2024, 3, 1));
    assert_eq!(periods[0].period_end, date(2024, 3, 15));
    assert!(periods[0].obligations.is_empty());
    assert_eq!(periods[1].obligations.len(), 1);
    assert_eq!(periods[1].obligations[0].due_date, date(2024, 3, 15));
    assert_eq!(periods[1].period_end, date(2024, 4, 1));
    assert_eq!(periods[1].starting_balance, periods[0].ending_balance);
    for period in &periods {
        assert_eq!(
            period.ending_balance,
            period.starting_balance + period.paycheck.amount
                - period.obligations_total()
                - period.savings_total()
        );
    }
}

#[test]
fn savings_only_reduce_balance_when_enabled() {
    let paychecks = vec![Paycheck::new(money(500), date(2024, 3, 1))];
    let savings = vec![SavingsPayment::new(Uuid::new_v4(), money(100), date(2024, 3, 2))];

    let with_savings = ProjectionService::project(&request(&[], &paychecks, &savings)).unwrap();
    assert_eq!(with_savings[0].savings.len(), 1);
    assert_eq!(with_savings[0].ending_balance, money(1400));

    let mut without = request(&[], &paychecks, &savings);
    without.include_savings = false;
    let without_savings = ProjectionService::project(&without).unwrap();
    assert!(without_savings[0].savings.is_empty());
    assert_eq!(without_savings[0].ending_balance, money(1500));
}

#[test]
fn missing_paychecks_are_reported() {
    assert_eq!(
        ProjectionService::project(&request(&[], &[], &[])),
        Err(ProjectionError::NoPaychecks)
    );
    let stale = vec![Paycheck::new(money(500), date(2023, 12, 1))];
    assert_eq!(
        ProjectionService::project(&request(&[], &stale, &[])),
        Err(ProjectionError::NoPaychecksInWindow { months: 6 })
    );
}

#[test]
fn income_book_seeds_balance_from_next_paycheck_overview() {
    let mut snapshot = FinanceSnapshot::default();
    snapshot.debit_cards.push(DebitCard::new("Checking", money(900)));
    snapshot.bills.push(Bill::one_time("Water", money(100), date(2024, 3, 10)));
    snapshot.paychecks.push(Paycheck::new(money(1500), date(2024, 3, 15)));

    let book = ProjectionService::income_book(&snapshot, "Credit Card", date(2024, 3, 1), 6, true, None).unwrap();
    assert_eq!(book.starting_balance, money(800));
    assert_eq!(book.periods.len(), 1);
    assert_eq!(book.ending_balance(), money(2300));

    let explicit =
        ProjectionService::income_book(&snapshot, "Credit Card", date(2024, 3, 1), 6, true, Some(Decimal::ZERO))
            .unwrap();
    assert_eq!(explicit.starting_balance, Decimal::ZERO);
}

#[test]
fn income_book_without_future_paycheck_fails_loudly() {
    let snapshot = FinanceSnapshot::default();
    let err = ProjectionService::income_book(&snapshot, "Credit Card", date(2024, 3, 1), 6, true, None).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Projection(ProjectionError::NextPayDateUnavailable)
    ));
    assert_eq!(err.to_string(), "Next pay date is not available");
}

#[test]
fn income_book_counts_each_bill_once_when_paid_today() {
    let mut snapshot = FinanceSnapshot::default();
    snapshot.debit_cards.push(DebitCard::new("Checking", money(1000)));
    snapshot.bills.push(Bill::one_time("Water", money(100), date(2024, 3, 5)));
    snapshot.paychecks.push(Paycheck::new(money(2000), date(2024, 3, 1)));
    snapshot.paychecks.push(Paycheck::new(money(2000), date(2024, 3, 15)));

    let book = ProjectionService::income_book(&snapshot, "Credit Card", date(2024, 3, 1), 6, true, None).unwrap();
    assert_eq!(book.starting_balance, money(1000));
    assert_eq!(book.periods.len(), 2);
    assert_eq!(book.periods[0].obligations_total(), money(100));
    assert_eq!(book.periods[0].ending_balance, money(2900));
    assert_eq!(book.ending_balance(), money(4900));
}

#[test]
fn income_book_leaves_pay_day_bills_to_their_period() {
    let mut snapshot = FinanceSnapshot::default();
    snapshot.debit_cards.push(DebitCard::new("Checking", money(900)));
    snapshot.bills.push(Bill::one_time("Water", money(100), date(2024, 3, 10)));
    snapshot.bills.push(Bill::one_time("Insurance", money(50), date(2024, 3, 15)));
    snapshot.paychecks.push(Paycheck::new(money(1500), date(2024, 3, 15)));

    let book = ProjectionService::income_book(&snapshot, "Credit Card", date(2024, 3, 1), 6, true, None).unwrap();
    assert_eq!(book.starting_balance, money(800));
    assert_eq!(book.periods[0].obligations_total(), money(50));
    assert_eq!(book.ending_balance(), money(2250));
}
