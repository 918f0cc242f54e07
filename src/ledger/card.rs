use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{account::DebitCard, time_interval::RecurrenceInterval};

/// A credit card with its balance and configured payment schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreditCard {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub bank_name: Option<String>,
    pub current_balance: Decimal,
    #[serde(default)]
    pub credit_limit: Decimal,
    #[serde(default)]
    pub interest_rate: Decimal,
    #[serde(default)]
    pub minimum_payment: Decimal,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub is_autopay: bool,
    #[serde(default)]
    pub payment_amount: Decimal,
    #[serde(default)]
    pub payment_frequency: Option<CardPaymentFrequency>,
    #[serde(default)]
    pub payment_day: Option<u32>,
    #[serde(default)]
    pub payment_week_day: Option<u32>,
    #[serde(default)]
    pub payment_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub payment_end_date: Option<NaiveDate>,
}

impl CreditCard {
    pub fn new(name: impl Into<String>, current_balance: Decimal, due_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            bank_name: None,
            current_balance,
            credit_limit: Decimal::ZERO,
            interest_rate: Decimal::ZERO,
            minimum_payment: Decimal::ZERO,
            due_date,
            is_autopay: false,
            payment_amount: Decimal::ZERO,
            payment_frequency: None,
            payment_day: None,
            payment_week_day: None,
            payment_start_date: None,
            payment_end_date: None,
        }
    }

    /// Balance as a percentage of the credit limit; zero without a limit.
    pub fn utilization(&self) -> Decimal {
        if self.credit_limit <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.current_balance / self.credit_limit * Decimal::ONE_HUNDRED
    }

    /// Whether the card has a scheduled payment worth projecting.
    pub fn has_scheduled_payment(&self) -> bool {
        self.payment_frequency.is_some() && self.payment_amount > Decimal::ZERO
    }

    /// Whether the card owes at least its minimum payment.
    pub fn owes_minimum(&self) -> bool {
        self.current_balance > Decimal::ZERO && self.current_balance >= self.minimum_payment
    }
}

/// Payment cadences a card can be configured with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CardPaymentFrequency {
    Weekly,
    BiWeekly,
    BiMonthly,
    Monthly,
    Quarterly,
    Yearly,
}

impl CardPaymentFrequency {
    /// The bill recurrence this cadence expands with. Bi-monthly card
    /// payments have no bill equivalent and expand to nothing.
    pub fn as_recurrence(self) -> Option<RecurrenceInterval> {
        match self {
            CardPaymentFrequency::Weekly => Some(RecurrenceInterval::Weekly),
            CardPaymentFrequency::BiWeekly => Some(RecurrenceInterval::BiWeekly),
            CardPaymentFrequency::BiMonthly => None,
            CardPaymentFrequency::Monthly => Some(RecurrenceInterval::Monthly),
            CardPaymentFrequency::Quarterly => Some(RecurrenceInterval::Quarterly),
            CardPaymentFrequency::Yearly => Some(RecurrenceInterval::Yearly),
        }
    }
}

/// A stored, planned payment towards a credit card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardPaymentRecord {
    pub id: Uuid,
    pub credit_card_id: Uuid,
    pub amount: Decimal,
    pub payment_date: NaiveDate,
}

/// The card a bill is paid with, as far as it can be resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    Unassigned,
    CreditCard { card_id: Uuid, name: String },
    DebitCard { card_id: Uuid, name: String },
    /// The referenced card is neither a known credit nor debit card.
    Unknown { card_id: Uuid },
}

impl PaymentMethod {
    /// Resolves `card_id` against credit cards first, then debit cards.
    pub fn resolve(card_id: Option<Uuid>, credit: &[CreditCard], debit: &[DebitCard]) -> Self {
        let Some(card_id) = card_id else {
            return PaymentMethod::Unassigned;
        };
        if let Some(card) = credit.iter().find(|card| card.id == card_id) {
            return PaymentMethod::CreditCard {
                card_id,
                name: card.name.clone(),
            };
        }
        if let Some(card) = debit.iter().find(|card| card.id == card_id) {
            return PaymentMethod::DebitCard {
                card_id,
                name: card.name.clone(),
            };
        }
        PaymentMethod::Unknown { card_id }
    }

    pub fn label(&self) -> &str {
        match self {
            PaymentMethod::Unassigned => "No Payment Method",
            PaymentMethod::CreditCard { name, .. } | PaymentMethod::DebitCard { name, .. } => name,
            PaymentMethod::Unknown { .. } => "Unknown Payment Method",
        }
    }
}
