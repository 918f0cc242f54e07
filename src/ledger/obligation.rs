use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    account::DebitCard,
    bill::Bill,
    card::{CreditCard, PaymentMethod},
    category::{CategoryIndex, CategoryKind, CategoryTag},
    time_interval::RecurrenceInterval,
};
use crate::errors::RecurrenceError;

/// Identity of an obligation. Synthetic variants are generated from a card
/// and never persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "source", content = "id", rename_all = "snake_case")]
pub enum ObligationId {
    Bill(Uuid),
    ScheduledCardPayment(Uuid),
    MinimumCardPayment(Uuid),
}

impl fmt::Display for ObligationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObligationId::Bill(id) => write!(f, "{id}"),
            ObligationId::ScheduledCardPayment(card) => write!(f, "cc-payment-{card}"),
            ObligationId::MinimumCardPayment(card) => write!(f, "cc-{card}"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SourceKind {
    StoredBill,
    SyntheticCardPayment,
}

/// Recurrence fields as entered; any of them may be missing on malformed data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RecurrenceRule {
    pub interval: Option<RecurrenceInterval>,
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound.
    pub end_date: Option<NaiveDate>,
    /// 1-31, used by monthly, quarterly and yearly rules.
    pub day_of_month: Option<u32>,
    /// 0-6 with Sunday = 0, used by weekly and bi-weekly rules.
    pub day_of_week: Option<u32>,
}

/// A rule whose required fields are known to be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidRule {
    pub interval: RecurrenceInterval,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub day_of_month: u32,
}

impl RecurrenceRule {
    pub fn new(interval: RecurrenceInterval, start_date: NaiveDate) -> Self {
        Self {
            interval: Some(interval),
            start_date: Some(start_date),
            ..Self::default()
        }
    }

    pub fn ending(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn on_day_of_month(mut self, day: u32) -> Self {
        self.day_of_month = Some(day);
        self
    }

    pub fn on_day_of_week(mut self, day: u32) -> Self {
        self.day_of_week = Some(day);
        self
    }

    /// Checks the fields the rule's interval depends on.
    pub fn validate(&self) -> Result<ValidRule, RecurrenceError> {
        let interval = self.interval.ok_or(RecurrenceError::MissingInterval)?;
        let start_date = self.start_date.ok_or(RecurrenceError::MissingStartDate)?;
        let mut day_of_month = 0;
        if interval.uses_day_of_week() {
            let day = self
                .day_of_week
                .ok_or(RecurrenceError::MissingDayOfWeek(interval))?;
            if day > 6 {
                return Err(RecurrenceError::DayOfWeekOutOfRange(day));
            }
        } else {
            let day = self
                .day_of_month
                .ok_or(RecurrenceError::MissingDayOfMonth(interval))?;
            if !(1..=31).contains(&day) {
                return Err(RecurrenceError::DayOfMonthOutOfRange(day));
            }
            day_of_month = day;
        }
        Ok(ValidRule {
            interval,
            start_date,
            end_date: self.end_date,
            day_of_month,
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Schedule {
    OneTime,
    Recurring(RecurrenceRule),
}

/// The bill-like unit the projection engine consumes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Obligation {
    pub id: ObligationId,
    pub name: String,
    pub amount: Decimal,
    pub category: Option<CategoryTag>,
    pub category_kind: CategoryKind,
    pub schedule: Schedule,
    pub due_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub is_autopay: bool,
    pub is_paid: bool,
    pub notes: Option<String>,
}

impl Obligation {
    /// Builds the obligation for a stored bill. Unknown categories leave the
    /// bill uncategorised and unknown cards yield [`PaymentMethod::Unknown`].
    pub fn from_bill(
        bill: &Bill,
        categories: &CategoryIndex<'_>,
        credit_cards: &[CreditCard],
        debit_cards: &[DebitCard],
    ) -> Self {
        let (category, category_kind) = match categories.resolve(bill.category_id) {
            Some((tag, kind)) => (Some(tag), kind),
            None => (None, CategoryKind::Regular),
        };
        let schedule = match bill.recurrence_rule() {
            Some(rule) => Schedule::Recurring(rule),
            None => Schedule::OneTime,
        };
        Self {
            id: ObligationId::Bill(bill.id),
            name: bill.name.clone(),
            amount: bill.amount,
            category,
            category_kind,
            schedule,
            due_date: bill.due_date,
            payment_method: PaymentMethod::resolve(bill.card_id, credit_cards, debit_cards),
            is_autopay: bill.is_autopay,
            is_paid: bill.is_paid,
            notes: bill.notes.clone(),
        }
    }

    /// The card's configured payment, projected as if it were a bill.
    pub fn scheduled_card_payment(card: &CreditCard, categories: &CategoryIndex<'_>) -> Self {
        let bank = card.bank_name.as_deref().unwrap_or(&card.name);
        Self {
            id: ObligationId::ScheduledCardPayment(card.id),
            name: format!("{} Payment", card.name),
            amount: card.payment_amount,
            notes: Some(format!("Automatic payment for {bank} credit card")),
            ..Self::card_template(card, categories)
        }
    }

    /// The minimum amount that must be paid on the card.
    pub fn minimum_card_payment(card: &CreditCard, categories: &CategoryIndex<'_>) -> Self {
        Self {
            id: ObligationId::MinimumCardPayment(card.id),
            name: card.name.clone(),
            amount: card.minimum_payment,
            notes: Some(format!("Minimum payment for {}", card.name)),
            ..Self::card_template(card, categories)
        }
    }

    fn card_template(card: &CreditCard, categories: &CategoryIndex<'_>) -> Self {
        Self {
            id: ObligationId::MinimumCardPayment(card.id),
            name: String::new(),
            amount: Decimal::ZERO,
            category: categories.credit_card().map(CategoryTag::from),
            category_kind: CategoryKind::CreditCardPayment,
            schedule: Schedule::Recurring(RecurrenceRule {
                interval: card
                    .payment_frequency
                    .and_then(|frequency| frequency.as_recurrence()),
                start_date: card.payment_start_date,
                end_date: card.payment_end_date,
                day_of_month: card.payment_day,
                day_of_week: card.payment_week_day,
            }),
            due_date: card.due_date,
            payment_method: PaymentMethod::CreditCard {
                card_id: card.id,
                name: card.name.clone(),
            },
            is_autopay: card.is_autopay,
            is_paid: false,
            notes: None,
        }
    }

    pub fn source_kind(&self) -> SourceKind {
        match self.id {
            ObligationId::Bill(_) => SourceKind::StoredBill,
            ObligationId::ScheduledCardPayment(_) | ObligationId::MinimumCardPayment(_) => {
                SourceKind::SyntheticCardPayment
            }
        }
    }

    pub fn recurrence(&self) -> Option<&RecurrenceRule> {
        match &self.schedule {
            Schedule::OneTime => None,
            Schedule::Recurring(rule) => Some(rule),
        }
    }

    pub fn category_id(&self) -> Option<Uuid> {
        self.category.as_ref().map(|category| category.id)
    }

    /// Materialises the obligation on `date` without touching `self`.
    pub fn occur_on(&self, date: NaiveDate) -> Occurrence {
        Occurrence {
            id: self.id,
            name: self.name.clone(),
            amount: self.amount,
            category: self.category.clone(),
            category_kind: self.category_kind,
            interval: self.recurrence().and_then(|rule| rule.interval),
            due_date: date,
            payment_method: self.payment_method.clone(),
            is_autopay: self.is_autopay,
            is_paid: self.is_paid,
        }
    }
}

/// An obligation placed on one concrete date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Occurrence {
    pub id: ObligationId,
    pub name: String,
    pub amount: Decimal,
    pub category: Option<CategoryTag>,
    pub category_kind: CategoryKind,
    pub interval: Option<RecurrenceInterval>,
    pub due_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub is_autopay: bool,
    pub is_paid: bool,
}

impl Occurrence {
    pub fn source_kind(&self) -> SourceKind {
        match self.id {
            ObligationId::Bill(_) => SourceKind::StoredBill,
            _ => SourceKind::SyntheticCardPayment,
        }
    }

    pub fn is_card_payment(&self) -> bool {
        self.category_kind == CategoryKind::CreditCardPayment
    }
}

/// Sum of the amounts of `occurrences`.
pub fn total_amount<'a>(occurrences: impl IntoIterator<Item = &'a Occurrence>) -> Decimal {
    occurrences.into_iter().map(|item| item.amount).sum()
}
