pub mod services;
pub mod source;
pub mod time;

pub use source::{FinanceSnapshot, FinanceSource};
pub use time::{Clock, FixedClock, SystemClock};
