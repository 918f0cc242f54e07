use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{obligation::RecurrenceRule, time_interval::RecurrenceInterval};

/// A bill as stored by the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bill {
    pub id: Uuid,
    pub name: String,
    pub amount: Decimal,
    /// Concrete date for one-time bills, anchor date for recurring ones.
    pub due_date: NaiveDate,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    pub bill_type: BillType,
    #[serde(default)]
    pub recurrence_interval: Option<RecurrenceInterval>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub recurrence_day: Option<u32>,
    #[serde(default)]
    pub recurrence_week_day: Option<u32>,
    #[serde(default)]
    pub card_id: Option<Uuid>,
    #[serde(default)]
    pub is_autopay: bool,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BillType {
    OneTime,
    Recurring,
}

impl Bill {
    pub fn one_time(name: impl Into<String>, amount: Decimal, due_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            due_date,
            category_id: None,
            bill_type: BillType::OneTime,
            recurrence_interval: None,
            start_date: None,
            end_date: None,
            recurrence_day: None,
            recurrence_week_day: None,
            card_id: None,
            is_autopay: false,
            is_paid: false,
            notes: None,
        }
    }

    /// Creates a recurring bill; the due date is anchored on the rule's start date.
    pub fn recurring(name: impl Into<String>, amount: Decimal, rule: RecurrenceRule) -> Self {
        let anchor = rule.start_date.unwrap_or(NaiveDate::MIN);
        Self {
            bill_type: BillType::Recurring,
            recurrence_interval: rule.interval,
            start_date: rule.start_date,
            end_date: rule.end_date,
            recurrence_day: rule.day_of_month,
            recurrence_week_day: rule.day_of_week,
            ..Self::one_time(name, amount, anchor)
        }
    }

    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_card(mut self, card_id: Uuid) -> Self {
        self.card_id = Some(card_id);
        self
    }

    pub fn is_recurring(&self) -> bool {
        self.bill_type == BillType::Recurring
    }

    /// The recurrence fields of a recurring bill, `None` for one-time bills.
    pub fn recurrence_rule(&self) -> Option<RecurrenceRule> {
        if !self.is_recurring() {
            return None;
        }
        Some(RecurrenceRule {
            interval: self.recurrence_interval,
            start_date: self.start_date,
            end_date: self.end_date,
            day_of_month: self.recurrence_day,
            day_of_week: self.recurrence_week_day,
        })
    }
}
