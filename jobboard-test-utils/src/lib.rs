//! Shared helpers for jobboard tests: in-memory database setup and row
//! factories for the three tables.

pub mod factory;
pub mod setup;
