use std::{env, path::PathBuf, process};

use cashflow_core::{
    config::{self, Config},
    core::{
        services::{
            CardPaths, ObligationService, OverviewService, ProjectionService, ServiceError,
            SummaryService,
        },
        Clock, FinanceSnapshot, SystemClock,
    },
    currency::{group_by_category, DisplayFormat},
    init,
    ledger::{parse_iso_date, Occurrence, ScheduleStatus},
    utils::persistence,
};
use chrono::NaiveDate;
use colored::Colorize;
use rust_decimal::Decimal;
use uuid::Uuid;

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

struct Invocation {
    positional: Vec<String>,
    today: Option<NaiveDate>,
    include_savings: bool,
}

fn parse_args() -> Result<Invocation, Box<dyn std::error::Error>> {
    let mut positional = Vec::new();
    let mut today = None;
    let mut include_savings = true;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--today" => {
                let raw = args.next().ok_or("--today requires a date")?;
                today = Some(parse_iso_date(&raw)?);
            }
            "--no-savings" => include_savings = false,
            _ => positional.push(arg),
        }
    }
    Ok(Invocation {
        positional,
        today,
        include_savings,
    })
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let invocation = parse_args()?;
    let mut positional = invocation.positional.into_iter();
    let (Some(command), Some(path)) = (positional.next(), positional.next()) else {
        print_usage();
        process::exit(1);
    };
    let rest: Vec<String> = positional.collect();

    let config = load_config();
    let stored = persistence::load_snapshot_from_file(&PathBuf::from(path))?;
    let snapshot = FinanceSnapshot::gather(&stored, config.savings_payment_limit)?;
    let today = invocation.today.unwrap_or_else(|| SystemClock.today());
    let display = config.display_format();
    let category = config.credit_card_category.as_str();

    match command.as_str() {
        "expand" => {
            let [bill_id, start, end] = rest.as_slice() else {
                print_usage();
                process::exit(1);
            };
            let bill_id = Uuid::parse_str(bill_id)?;
            let sources = snapshot.obligation_sources(category);
            let occurrences =
                ObligationService::expand_bill(&sources, bill_id, parse_iso_date(start)?, parse_iso_date(end)?)?;
            for occurrence in &occurrences {
                print_occurrence(occurrence, &display, None);
            }
        }
        "month" => {
            let raw = rest.first().ok_or("month requires <yyyy-mm>")?;
            let reference = parse_iso_date(&format!("{raw}-01"))?;
            report_issues(&snapshot, category);
            let sources = snapshot.obligation_sources(category);
            let occurrences = ObligationService::monthly_obligations(&sources, CardPaths::default(), reference);
            for group in group_by_category(&occurrences) {
                println!("{} ({})", group.label().bold(), display.money(group.total));
                for occurrence in &group.occurrences {
                    print_occurrence(occurrence, &display, None);
                }
            }
        }
        "next-paycheck" => {
            let overview = OverviewService::next_paycheck(&snapshot, category, today)
                .map_err(ServiceError::from)?;
            println!("Next paycheck: {}", display.date(overview.next_pay_date));
            for occurrence in &overview.obligations {
                print_occurrence(occurrence, &display, Some(today));
            }
            println!("Available funds: {}", balance(overview.available_funds, &display));
            println!("Unpaid obligations: {}", display.money(overview.unpaid_total));
            println!("Projected balance: {}", balance(overview.projected_balance, &display));
        }
        "outlook" => {
            let outlook = OverviewService::thirty_day_outlook(&snapshot, category, today, config.outlook_days);
            println!(
                "Outlook {} to {}",
                display.date(outlook.window_start),
                display.date(outlook.window_end)
            );
            if let Some(pay_dates) = outlook.pay_dates {
                if let Some(last) = pay_dates.last {
                    println!("Last pay date: {}", display.date(last));
                }
                if let Some(next) = pay_dates.next {
                    println!("Next pay date: {}", display.date(next));
                }
            }
            println!("Available funds: {}", balance(outlook.available_funds, &display));
            println!("Expected income: {}", display.money(outlook.expected_income()));
            println!("Upcoming bills: {}", display.money(outlook.bills_total()));
            println!("Card payments: {}", display.money(outlook.card_payments_total()));
            println!("Remaining: {}", balance(outlook.remaining_after_bills(), &display));
        }
        "income-book" => {
            let book = ProjectionService::income_book(
                &snapshot,
                category,
                today,
                config.projection_months,
                invocation.include_savings && config.include_savings,
                None,
            )?;
            println!("Starting balance: {}", balance(book.starting_balance, &display));
            for period in &book.periods {
                println!(
                    "{} to {}: {} -> {}",
                    display.date(period.period_start),
                    display.date(period.period_end),
                    balance(period.starting_balance, &display),
                    balance(period.ending_balance, &display)
                );
                println!("  Paycheck {}", display.money(period.paycheck.amount));
                for occurrence in &period.obligations {
                    print_occurrence(occurrence, &display, None);
                }
                for payment in &period.savings {
                    println!(
                        "  {}  {}  {}",
                        display.date(payment.payment_date),
                        payment.label(),
                        display.money(payment.amount)
                    );
                }
            }
        }
        "summary" => {
            let summary = SummaryService::financial_summary(
                snapshot.profile.as_ref(),
                &snapshot.bills,
                &snapshot.credit_cards,
            );
            let recommendation = SummaryService::recommended_spending(&summary);
            println!("Monthly income: {}", display.money(summary.income));
            println!("Monthly bills: {}", display.money(summary.total_bills));
            println!(
                "Card minimums: {}",
                display.money(summary.total_minimum_payments)
            );
            println!("Total debt: {}", display.money(summary.total_debt));
            println!("Available income: {}", balance(summary.available_income, &display));
            println!("Debt-to-income: {}", summary.debt_to_income_ratio.round_dp(2));
            println!("Recommended spending: {}", display.money(recommendation.spending));
            println!(
                "Recommended debt payment: {}",
                display.money(recommendation.debt_payment)
            );
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    }

    Ok(())
}

fn load_config() -> Config {
    match config::default_manager().and_then(|manager| manager.load()) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "using default configuration");
            Config::default()
        }
    }
}

fn report_issues(snapshot: &FinanceSnapshot, category: &str) {
    let sources = snapshot.obligation_sources(category);
    for issue in ObligationService::diagnose(&sources, CardPaths::default()) {
        eprintln!("{} {issue}", "Warning:".yellow());
    }
}

fn balance(amount: Decimal, display: &DisplayFormat) -> String {
    let text = display.money(amount);
    if amount < Decimal::ZERO {
        text.red().to_string()
    } else {
        text
    }
}

fn print_occurrence(occurrence: &Occurrence, display: &DisplayFormat, today: Option<NaiveDate>) {
    let status = today
        .map(|today| {
            let status = ScheduleStatus::classify(occurrence.due_date, today);
            format!("  [{}]", status.label(occurrence.due_date))
        })
        .unwrap_or_default();
    let paid = if occurrence.is_paid { "  (paid)" } else { "" };
    println!(
        "  {}  {}  {}  {}{}{}",
        display.date(occurrence.due_date),
        occurrence.name,
        display.money(occurrence.amount),
        occurrence.payment_method.label(),
        status,
        paid
    );
}

fn print_usage() {
    eprintln!(
        "Usage: cashflow_core_cli <command> <snapshot.json> [--today yyyy-mm-dd]\n\
         Commands:\n  \
         expand <bill-id> <start> <end>\n  \
         month <yyyy-mm>\n  \
         next-paycheck\n  \
         outlook\n  \
         income-book [--no-savings]\n  \
         summary"
    );
}
