//! Persisted records as the mapper sees them.
//!
//! A record wraps the fetched table row together with one [`Loaded`] slot
//! per relationship. Repositories are the only writers of these slots:
//! `flat` marks every relation as not fetched, and the eager-loading query
//! paths fill the slots with depth-one related records (whose own slots
//! stay not fetched).

use crate::mapper::Loaded;

/// A `users` row plus the load state of its relations.
#[derive(Clone, Debug, PartialEq)]
pub struct UserRecord {
    pub row: entity::user::Model,
    pub jobs: Loaded<Vec<JobRecord>>,
    pub responses: Loaded<Vec<ResponseRecord>>,
}

impl UserRecord {
    /// Row fetched without relations.
    pub fn flat(row: entity::user::Model) -> Self {
        Self {
            row,
            jobs: Loaded::NotFetched,
            responses: Loaded::NotFetched,
        }
    }
}

/// A `jobs` row plus the load state of its relations.
#[derive(Clone, Debug, PartialEq)]
pub struct JobRecord {
    pub row: entity::job::Model,
    pub user: Loaded<Box<UserRecord>>,
    pub responses: Loaded<Vec<ResponseRecord>>,
}

impl JobRecord {
    /// Row fetched without relations.
    pub fn flat(row: entity::job::Model) -> Self {
        Self {
            row,
            user: Loaded::NotFetched,
            responses: Loaded::NotFetched,
        }
    }
}

/// A `responses` row plus the load state of its relations.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseRecord {
    pub row: entity::response::Model,
    pub user: Loaded<Box<UserRecord>>,
    pub job: Loaded<Box<JobRecord>>,
}

impl ResponseRecord {
    /// Row fetched without relations.
    pub fn flat(row: entity::response::Model) -> Self {
        Self {
            row,
            user: Loaded::NotFetched,
            job: Loaded::NotFetched,
        }
    }
}
