use cashflow_core::{
    currency::{
        format_currency, format_date, group_by_category, CurrencyCode, DateFormatStyle, DisplayFormat,
        LocaleConfig, NegativeStyle,
    },
    ledger::{Bill, Category, CategoryIndex, Obligation},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn formats_currency_with_locale() {
    let locale = LocaleConfig::for_tag("fr-FR", DateFormatStyle::Iso);
    let code = CurrencyCode::new("EUR");
    let formatted = format_currency(Decimal::new(-12345, 1), &code, &locale, NegativeStyle::Parentheses);
    assert_eq!(formatted, "€ (1 234,50)");
}

#[test]
fn default_formatting_rounds_to_minor_units() {
    let display = DisplayFormat::default();
    assert_eq!(display.money(Decimal::new(1234567, 3)), "$1,234.57");
    assert_eq!(display.money(Decimal::new(-5, 0)), "-$5.00");
    assert_eq!(display.money(Decimal::new(-1, 3)), "$0.00");

    let yen = DisplayFormat {
        currency: CurrencyCode::new("jpy"),
        ..DisplayFormat::default()
    };
    assert_eq!(yen.money(Decimal::new(1000, 0)), "¥1,000");
    assert_eq!(CurrencyCode::new("chf").symbol(), "CHF");
}

#[test]
fn unknown_languages_use_english_separators() {
    let locale = LocaleConfig::for_tag("xx", DateFormatStyle::Iso);
    assert_eq!(locale.decimal_separator, '.');
    assert_eq!(locale.grouping_separator, ',');
    assert_eq!(LocaleConfig::for_tag("pt_BR", DateFormatStyle::Iso).decimal_separator, ',');
}

#[test]
fn formats_dates_by_style() {
    let day = date(2024, 3, 5);
    assert_eq!(format_date(&LocaleConfig::default(), day), "2024-03-05");
    assert_eq!(
        format_date(&LocaleConfig::for_tag("en-US", DateFormatStyle::Medium), day),
        "Mar 5, 2024"
    );
    assert_eq!(
        format_date(&LocaleConfig::for_tag("en-US", DateFormatStyle::Long), day),
        "Tue, Mar 5, 2024"
    );
}

#[test]
fn groups_occurrences_by_category_in_first_seen_order() {
    let utilities = Category::new("Utilities");
    let categories = vec![utilities.clone()];
    let index = CategoryIndex::new(&categories);
    let bills = vec![
        Bill::one_time("Water", Decimal::from(30), date(2024, 3, 2)).with_category(utilities.id),
        Bill::one_time("Haircut", Decimal::from(25), date(2024, 3, 3)),
        Bill::one_time("Power", Decimal::from(70), date(2024, 3, 4)).with_category(utilities.id),
    ];
    let occurrences: Vec<_> = bills
        .iter()
        .map(|bill| {
            let mut occurrence = Obligation::from_bill(bill, &index, &[], &[]).occur_on(bill.due_date);
            occurrence.is_paid = bill.name == "Water";
            occurrence
        })
        .collect();

    let groups = group_by_category(&occurrences);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].label(), "Utilities");
    assert_eq!(groups[0].occurrences.len(), 2);
    assert_eq!(groups[0].total, Decimal::from(100));
    assert_eq!(groups[0].unpaid_total, Decimal::from(70));
    assert_eq!(groups[1].label(), "Uncategorized");
    assert_eq!(groups[1].total, Decimal::from(25));
}
