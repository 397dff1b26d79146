//! Domain entities and DTOs.
//!
//! Entities are storage-independent data holders; their relationship
//! fields default to empty and are populated only when a caller explicitly
//! requests relation inclusion from a repository. Create/update DTOs are
//! plain field bundles produced by request validation, with `Option`
//! fields on update DTOs meaning "not provided, leave unchanged".

pub mod job;
pub mod response;
pub mod user;

pub use job::{Job, JobCreateDto, JobUpdateDto};
pub use response::{Response, ResponseCreateDto, ResponseUpdateDto};
pub use user::{User, UserCreateDto, UserUpdateDto};
