use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A planned contribution into a savings account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavingsPayment {
    pub id: Uuid,
    pub savings_id: Uuid,
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_name: Option<String>,
}

impl SavingsPayment {
    pub fn new(savings_id: Uuid, amount: Decimal, payment_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            savings_id,
            amount,
            payment_date,
            plan_name: None,
        }
    }

    pub fn label(&self) -> &str {
        self.plan_name.as_deref().unwrap_or("Savings Payment")
    }
}
