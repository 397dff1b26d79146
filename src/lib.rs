//! Job board backend core.
//!
//! Companies post jobs, employees respond to them. This crate owns the
//! domain model, the record-to-entity mapping layer (a rule-driven mapper
//! with a process-wide registry), repositories performing CRUD against the
//! relational schema in the `entity`/`migration` member crates, and the
//! business-rule services on top. HTTP routing, request validation, and
//! credential handling are external collaborators.

pub mod config;
pub mod data;
pub mod error;
pub mod mapper;
pub mod model;
pub mod service;
pub mod startup;
