pub mod obligation_service;
pub mod overview_service;
pub mod paycheck_service;
pub mod projection_service;
pub mod summary_service;

pub use obligation_service::{CardPaths, ObligationIssue, ObligationService, ObligationSources};
pub use overview_service::{NextPaycheckOverview, OverviewService, ThirtyDayOutlook};
pub use paycheck_service::PaycheckService;
pub use projection_service::{IncomeBook, ProjectionPeriod, ProjectionRequest, ProjectionService};
pub use summary_service::{FinancialSummary, RecommendedSpending, SummaryService};

use crate::errors::{ProjectionError, SnapshotError};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Projection(#[from] ProjectionError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error("{0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests;
