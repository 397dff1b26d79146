//! Error types for the jobboard backend.
//!
//! A single `thiserror` enum covers the repository layer (not-found),
//! the service layer (permission and business-rule violations), and
//! pass-through database errors. The web layer owns HTTP mapping.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Raised by repository `retrieve`, `update`, and `delete` when the
    /// filter or id matches zero rows. `retrieve_many` never raises this.
    #[error("{0}")]
    EntityNotFound(String),
    /// The caller is not allowed to perform the operation.
    #[error("{0}")]
    PermissionDenied(String),
    /// The target job is no longer accepting responses.
    #[error("Job is not accepting responses")]
    InactiveJob,
    /// The user already responded to this job.
    #[error("User has already responded to this job")]
    DuplicateResponse,
    /// Lower salary bound exceeds the upper bound.
    #[error("Invalid salary range: {salary_from} exceeds {salary_to}")]
    InvalidSalaryRange {
        salary_from: Decimal,
        salary_to: Decimal,
    },
    /// A repository was constructed before its mapper was registered.
    #[error("No mapper registered for the {0} entity")]
    MapperNotRegistered(&'static str),
    /// Internal error indicating a bug in jobboard's code.
    #[error("Internal error, this indicates a bug: {0}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
}
