mod projection_service_tests;
mod summary_service_tests;

use chrono::NaiveDate;
use rust_decimal::Decimal;

pub(super) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(super) fn money(units: i64) -> Decimal {
    Decimal::from(units)
}
