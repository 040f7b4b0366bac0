pub mod filter_service;
pub mod summary_service;

pub use filter_service::{FilterService, LedgerQuery, SortOrder};
pub use summary_service::{CategoryBreakdown, CategoryShare, ChartPoint, SummaryService};

use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
