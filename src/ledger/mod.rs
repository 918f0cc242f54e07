//! Finance domain models, date helpers, and recurrence expansion.

pub mod account;
pub mod bill;
pub mod card;
pub mod category;
pub mod obligation;
pub mod paycheck;
pub mod recurring;
pub mod savings;
pub mod time_interval;

pub use account::{total_available, AccountType, DebitCard};
pub use bill::{Bill, BillType};
pub use card::{CardPaymentFrequency, CardPaymentRecord, CreditCard, PaymentMethod};
pub use category::{
    Category, CategoryIndex, CategoryKind, CategoryTag, DEFAULT_CREDIT_CARD_CATEGORY,
};
pub use obligation::{
    total_amount, Obligation, ObligationId, Occurrence, RecurrenceRule, Schedule, SourceKind,
    ValidRule,
};
pub use paycheck::{IncomeFrequency, PayDates, Paycheck, PaycheckConfig};
pub use recurring::{expand, expand_rule, occurrence_dates, ScheduleStatus};
pub use savings::SavingsPayment;
pub use time_interval::{
    parse_iso_date, DateWindow, RecurrenceInterval, Step, ISO_DATE_FORMAT,
};
