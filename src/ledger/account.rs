use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A debit-card backed account whose balance funds upcoming obligations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DebitCard {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub last_four_digits: Option<String>,
    pub available_balance: Decimal,
    pub account_type: AccountType,
    #[serde(default)]
    pub is_primary: bool,
}

impl DebitCard {
    /// Creates a checking account with the given balance.
    pub fn new(name: impl Into<String>, available_balance: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            bank_name: None,
            last_four_digits: None,
            available_balance,
            account_type: AccountType::Checking,
            is_primary: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Checking,
    Savings,
}

/// Sum of every account's available balance.
pub fn total_available(accounts: &[DebitCard]) -> Decimal {
    accounts.iter().map(|account| account.available_balance).sum()
}
