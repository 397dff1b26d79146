//! Data access layer repositories.
//!
//! One repository per entity kind. Every operation runs in its own
//! short-lived transaction, translates "zero rows" into
//! [`Error::EntityNotFound`](crate::error::Error::EntityNotFound), and
//! hands fetched records to the mapper; relations are eager-loaded inside
//! the same transaction when requested, so the mapper never has to.

pub mod record;

pub mod job;
pub mod response;
pub mod user;

pub use job::{JobFilter, JobRepository};
pub use response::{ResponseFilter, ResponseRepository};
pub use user::{UserFilter, UserRepository};
