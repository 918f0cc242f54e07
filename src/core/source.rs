//! Inputs gathered from the persistence layer before any projection runs.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    core::services::ObligationSources,
    errors::SnapshotError,
    ledger::{
        Bill, CardPaymentRecord, Category, CategoryIndex, CreditCard, DebitCard, Paycheck,
        PaycheckConfig, SavingsPayment,
    },
};

/// Read access to stored finance entities. Each fetch is independent of the
/// others, so implementations may serve them in any order.
pub trait FinanceSource {
    fn fetch_bills(&self) -> Result<Vec<Bill>, SnapshotError>;
    fn fetch_credit_cards(&self) -> Result<Vec<CreditCard>, SnapshotError>;
    fn fetch_debit_cards(&self) -> Result<Vec<DebitCard>, SnapshotError>;
    fn fetch_categories(&self) -> Result<Vec<Category>, SnapshotError>;
    fn fetch_paychecks(&self) -> Result<Vec<Paycheck>, SnapshotError>;
    fn fetch_user_profile(&self) -> Result<Option<PaycheckConfig>, SnapshotError>;
    /// Returns the `limit` most recent payments, earliest first.
    fn fetch_savings_payments(&self, limit: usize) -> Result<Vec<SavingsPayment>, SnapshotError>;
    fn fetch_card_payments(&self) -> Result<Vec<CardPaymentRecord>, SnapshotError>;
}

/// Every entity a projection needs, fetched and joined up front.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FinanceSnapshot {
    #[serde(default)]
    pub bills: Vec<Bill>,
    #[serde(default)]
    pub credit_cards: Vec<CreditCard>,
    #[serde(default)]
    pub debit_cards: Vec<DebitCard>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub paychecks: Vec<Paycheck>,
    #[serde(default)]
    pub profile: Option<PaycheckConfig>,
    #[serde(default)]
    pub savings_payments: Vec<SavingsPayment>,
    #[serde(default)]
    pub card_payments: Vec<CardPaymentRecord>,
}

impl FinanceSnapshot {
    /// Runs every fetch of `source` and joins the results.
    pub fn gather<S: FinanceSource + ?Sized>(
        source: &S,
        savings_limit: usize,
    ) -> Result<Self, SnapshotError> {
        let snapshot = Self {
            bills: source.fetch_bills()?,
            credit_cards: source.fetch_credit_cards()?,
            debit_cards: source.fetch_debit_cards()?,
            categories: source.fetch_categories()?,
            paychecks: source.fetch_paychecks()?,
            profile: source.fetch_user_profile()?,
            savings_payments: source.fetch_savings_payments(savings_limit)?,
            card_payments: source.fetch_card_payments()?,
        };
        debug!(
            bills = snapshot.bills.len(),
            credit_cards = snapshot.credit_cards.len(),
            paychecks = snapshot.paychecks.len(),
            "finance snapshot gathered"
        );
        Ok(snapshot)
    }

    pub fn category_index<'a>(&'a self, credit_card_category: &'a str) -> CategoryIndex<'a> {
        CategoryIndex::with_credit_card_name(&self.categories, credit_card_category)
    }

    /// Borrowed view used by the obligation aggregator.
    pub fn obligation_sources<'a>(&'a self, credit_card_category: &'a str) -> ObligationSources<'a> {
        ObligationSources {
            bills: &self.bills,
            credit_cards: &self.credit_cards,
            debit_cards: &self.debit_cards,
            categories: self.category_index(credit_card_category),
        }
    }
}

impl FinanceSource for FinanceSnapshot {
    fn fetch_bills(&self) -> Result<Vec<Bill>, SnapshotError> {
        Ok(self.bills.clone())
    }

    fn fetch_credit_cards(&self) -> Result<Vec<CreditCard>, SnapshotError> {
        Ok(self.credit_cards.clone())
    }

    fn fetch_debit_cards(&self) -> Result<Vec<DebitCard>, SnapshotError> {
        Ok(self.debit_cards.clone())
    }

    fn fetch_categories(&self) -> Result<Vec<Category>, SnapshotError> {
        Ok(self.categories.clone())
    }

    fn fetch_paychecks(&self) -> Result<Vec<Paycheck>, SnapshotError> {
        Ok(self.paychecks.clone())
    }

    fn fetch_user_profile(&self) -> Result<Option<PaycheckConfig>, SnapshotError> {
        Ok(self.profile.clone())
    }

    fn fetch_savings_payments(&self, limit: usize) -> Result<Vec<SavingsPayment>, SnapshotError> {
        let mut payments = self.savings_payments.clone();
        payments.sort_by(|a, b| b.payment_date.cmp(&a.payment_date));
        payments.truncate(limit);
        payments.reverse();
        Ok(payments)
    }

    fn fetch_card_payments(&self) -> Result<Vec<CardPaymentRecord>, SnapshotError> {
        Ok(self.card_payments.clone())
    }
}
