use std::fs;

use assert_cmd::Command;
use cashflow_core::{
    core::FinanceSnapshot,
    ledger::{Bill, DebitCard, Paycheck, RecurrenceInterval, RecurrenceRule, SavingsPayment},
    utils::persistence::save_snapshot_to_file,
};
use chrono::NaiveDate;
use predicates::prelude::*;
use rust_decimal::Decimal;
use tempfile::TempDir;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct Fixture {
    dir: TempDir,
    rent: Bill,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let rent = Bill::recurring(
            "Rent",
            Decimal::from(900),
            RecurrenceRule::new(RecurrenceInterval::Monthly, date(2024, 1, 10)).on_day_of_month(10),
        );
        let mut snapshot = FinanceSnapshot::default();
        snapshot.bills.push(rent.clone());
        snapshot.debit_cards.push(DebitCard::new("Checking", Decimal::from(1500)));
        snapshot.paychecks.push(Paycheck::new(Decimal::from(2000), date(2024, 3, 15)));
        let savings_id = Uuid::new_v4();
        snapshot
            .savings_payments
            .push(SavingsPayment::new(savings_id, Decimal::from(25), date(2024, 4, 5)));
        snapshot
            .savings_payments
            .push(SavingsPayment::new(savings_id, Decimal::from(10), date(2024, 5, 5)));
        save_snapshot_to_file(&snapshot, &dir.path().join("snapshot.json")).unwrap();
        Self { dir, rent }
    }

    fn snapshot_path(&self) -> String {
        self.dir.path().join("snapshot.json").display().to_string()
    }

    fn write_config(&self, json: &str) {
        let config_dir = self.dir.path().join("home").join("config");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("config.json"), json).unwrap();
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("cashflow_core_cli").unwrap();
        cmd.env("CASHFLOW_CORE_HOME", self.dir.path().join("home"))
            .env("NO_COLOR", "1");
        cmd
    }
}

#[test]
fn expand_lists_occurrences() {
    let fixture = Fixture::new();
    fixture
        .command()
        .args([
            "expand",
            &fixture.snapshot_path(),
            &fixture.rent.id.to_string(),
            "2024-02-01",
            "2024-04-30",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-02-10"))
        .stdout(predicate::str::contains("2024-04-10"))
        .stdout(predicate::str::contains("$900.00"));
}

#[test]
fn next_paycheck_prints_projected_balance() {
    let fixture = Fixture::new();
    fixture
        .command()
        .args(["next-paycheck", &fixture.snapshot_path(), "--today", "2024-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Next paycheck: 2024-03-15"))
        .stdout(predicate::str::contains("Projected balance: $600.00"));
}

#[test]
fn income_book_without_future_paycheck_fails() {
    let fixture = Fixture::new();
    fixture
        .command()
        .args(["income-book", &fixture.snapshot_path(), "--today", "2024-04-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Next pay date is not available"));
}

#[test]
fn unknown_command_prints_usage() {
    let fixture = Fixture::new();
    fixture
        .command()
        .args(["bogus", &fixture.snapshot_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: cashflow_core_cli"));
}

#[test]
fn income_book_follows_configured_locale_and_savings_limit() {
    let fixture = Fixture::new();
    fixture.write_config(
        r#"{"locale":"de-DE","currency":"USD","date_format":"medium","savings_payment_limit":1}"#,
    );
    fixture
        .command()
        .args(["income-book", &fixture.snapshot_path(), "--today", "2024-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Starting balance: $600,00"))
        .stdout(predicate::str::contains("Mar 15, 2024 to Sep 1, 2024"))
        .stdout(predicate::str::contains("May 5, 2024  Savings Payment  $10,00"))
        .stdout(predicate::str::contains("Apr 5, 2024").not());
}
