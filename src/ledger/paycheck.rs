use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A concrete paycheck, either stored or derived from a [`PaycheckConfig`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Paycheck {
    /// `None` for paychecks derived from the income configuration.
    #[serde(default)]
    pub id: Option<Uuid>,
    pub amount: Decimal,
    pub payment_date: NaiveDate,
}

impl Paycheck {
    pub fn new(amount: Decimal, payment_date: NaiveDate) -> Self {
        Self {
            id: Some(Uuid::new_v4()),
            amount,
            payment_date,
        }
    }

    pub fn derived(amount: Decimal, payment_date: NaiveDate) -> Self {
        Self {
            id: None,
            amount,
            payment_date,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum IncomeFrequency {
    Weekly,
    BiWeekly,
    /// The 15th and the last day of every month.
    BiMonthly,
    Monthly,
    SpecificDate,
}

impl IncomeFrequency {
    pub fn label(self) -> &'static str {
        match self {
            IncomeFrequency::Weekly => "Weekly",
            IncomeFrequency::BiWeekly => "Bi-weekly",
            IncomeFrequency::BiMonthly => "Bi-monthly (15th & Last Day)",
            IncomeFrequency::Monthly => "Monthly",
            IncomeFrequency::SpecificDate => "Specific Date",
        }
    }
}

/// The user's income settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaycheckConfig {
    pub income_amount: Decimal,
    pub income_frequency: IncomeFrequency,
    #[serde(default)]
    pub income_day: Option<u32>,
    #[serde(default)]
    pub income_start_date: Option<NaiveDate>,
    /// User-entered next pay date, used for bi-weekly schedules.
    #[serde(default, alias = "user_entry_next_paydate")]
    pub next_paydate_override: Option<NaiveDate>,
    #[serde(default)]
    pub monthly_income: Option<Decimal>,
}

impl PaycheckConfig {
    pub fn new(income_amount: Decimal, income_frequency: IncomeFrequency) -> Self {
        Self {
            income_amount,
            income_frequency,
            income_day: None,
            income_start_date: None,
            next_paydate_override: None,
            monthly_income: None,
        }
    }

    /// The stored monthly income, or the paycheck amount scaled to a month.
    pub fn monthly_income(&self) -> Decimal {
        if let Some(income) = self.monthly_income {
            return income;
        }
        let factor = match self.income_frequency {
            IncomeFrequency::Weekly => Decimal::new(433, 2),
            IncomeFrequency::BiWeekly => Decimal::new(217, 2),
            IncomeFrequency::BiMonthly => Decimal::from(2),
            IncomeFrequency::Monthly | IncomeFrequency::SpecificDate => Decimal::ONE,
        };
        self.income_amount * factor
    }

    pub fn with_income_day(mut self, day: u32) -> Self {
        self.income_day = Some(day);
        self
    }

    pub fn with_next_paydate(mut self, date: NaiveDate) -> Self {
        self.next_paydate_override = Some(date);
        self
    }
}

/// Last and next pay dates around a reference day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PayDates {
    pub last: Option<NaiveDate>,
    pub next: Option<NaiveDate>,
}
