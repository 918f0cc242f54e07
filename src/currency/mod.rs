//! Money and date rendering plus category grouping for display.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::ledger::{CategoryTag, Occurrence};

pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Upper-cased ISO 4217 code such as `USD`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display symbol, or the code itself when no symbol is known.
    pub fn symbol(&self) -> &str {
        match self.0.as_str() {
            "USD" => "$",
            "EUR" => "€",
            "GBP" => "£",
            "JPY" => "¥",
            "BRL" => "R$",
            "CAD" => "CA$",
            "AUD" => "A$",
            other => other,
        }
    }

    /// Digits after the decimal separator.
    pub fn minor_units(&self) -> u32 {
        match self.0.as_str() {
            "JPY" | "KRW" => 0,
            "KWD" | "BHD" => 3,
            _ => 2,
        }
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DateFormatStyle {
    /// `2024-03-05`
    #[default]
    Iso,
    /// `Mar 5, 2024`
    Medium,
    /// `Tue, Mar 5, 2024`
    Long,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum NegativeStyle {
    /// `-$5.00`
    #[default]
    Sign,
    /// `$ (5.00)`
    Parentheses,
}

/// Separators and date style for one language tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub date_format: DateFormatStyle,
}

impl LocaleConfig {
    /// Separators follow the language part of a BCP 47 tag; unknown
    /// languages use the `en-US` conventions.
    pub fn for_tag(tag: &str, date_format: DateFormatStyle) -> Self {
        let language = tag
            .split(|c: char| c == '-' || c == '_')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let (decimal_separator, grouping_separator) = match language.as_str() {
            "de" | "es" | "it" | "pt" | "nl" | "da" | "tr" | "id" => (',', '.'),
            "fr" | "sv" | "nb" | "fi" | "pl" | "cs" | "ru" => (',', ' '),
            _ => ('.', ','),
        };
        Self {
            language_tag: tag.to_string(),
            decimal_separator,
            grouping_separator,
            date_format,
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::for_tag("en-US", DateFormatStyle::Iso)
    }
}

/// Everything needed to render amounts and dates for one user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayFormat {
    pub currency: CurrencyCode,
    pub locale: LocaleConfig,
    pub negative_style: NegativeStyle,
}

impl DisplayFormat {
    pub fn money(&self, amount: Decimal) -> String {
        format_currency(amount, &self.currency, &self.locale, self.negative_style)
    }

    pub fn date(&self, date: NaiveDate) -> String {
        format_date(&self.locale, date)
    }
}

/// Rounds half away from zero to `precision` digits and applies the locale's
/// separators.
pub fn format_number(locale: &LocaleConfig, value: Decimal, precision: u32) -> String {
    let rounded = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", precision as usize, rounded.abs());
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };
    let mut out = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            out.push(locale.grouping_separator);
        }
        out.push(digit);
    }
    if let Some(fraction) = fraction {
        out.push(locale.decimal_separator);
        out.push_str(fraction);
    }
    out
}

/// `-$1,234.50` or `$ (1,234.50)` depending on `negative_style`.
pub fn format_currency(
    amount: Decimal,
    code: &CurrencyCode,
    locale: &LocaleConfig,
    negative_style: NegativeStyle,
) -> String {
    let rounded = amount.round_dp_with_strategy(code.minor_units(), RoundingStrategy::MidpointAwayFromZero);
    let digits = format_number(locale, rounded.abs(), code.minor_units());
    if rounded >= Decimal::ZERO {
        return format!("{}{}", code.symbol(), digits);
    }
    match negative_style {
        NegativeStyle::Sign => format!("-{}{}", code.symbol(), digits),
        NegativeStyle::Parentheses => format!("{} ({})", code.symbol(), digits),
    }
}

pub fn format_date(locale: &LocaleConfig, date: NaiveDate) -> String {
    let pattern = match locale.date_format {
        DateFormatStyle::Iso => "%Y-%m-%d",
        DateFormatStyle::Medium => "%b %-d, %Y",
        DateFormatStyle::Long => "%a, %b %-d, %Y",
    };
    date.format(pattern).to_string()
}

/// Occurrences sharing one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryGroup {
    pub category: Option<CategoryTag>,
    pub occurrences: Vec<Occurrence>,
    pub total: Decimal,
    pub unpaid_total: Decimal,
}

impl CategoryGroup {
    pub fn label(&self) -> &str {
        self.category
            .as_ref()
            .map(|category| category.name.as_str())
            .unwrap_or(UNCATEGORIZED_LABEL)
    }
}

/// Groups occurrences by category in first-seen order. Occurrences without a
/// category share one group.
pub fn group_by_category(occurrences: &[Occurrence]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    for occurrence in occurrences {
        let key = occurrence.category.as_ref().map(|category| category.id);
        let index = match groups
            .iter()
            .position(|group| group.category.as_ref().map(|category| category.id) == key)
        {
            Some(index) => index,
            None => {
                groups.push(CategoryGroup {
                    category: occurrence.category.clone(),
                    occurrences: Vec::new(),
                    total: Decimal::ZERO,
                    unpaid_total: Decimal::ZERO,
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[index];
        group.total += occurrence.amount;
        if !occurrence.is_paid {
            group.unpaid_total += occurrence.amount;
        }
        group.occurrences.push(occurrence.clone());
    }
    groups
}
