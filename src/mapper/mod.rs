//! Record-to-entity mapping.
//!
//! Repositories fetch persisted records and hand them to a
//! [`DynamicMapper`] to produce domain entities. Each mapper carries the
//! relationship rules registered for its entity pair; relations are mapped
//! exactly one level deep, through the related mapper, and only when the
//! caller asked for them. Mappers never perform I/O and never mutate their
//! input.
//!
//! Mappers for the three entity kinds reference each other (User↔Job↔
//! Response), so they are wired through a [`registry::MapperRegistry`]
//! built once at startup rather than owning each other directly.

pub mod loaded;
pub mod registry;
pub mod rule;
pub mod wiring;

mod dynamic;

pub use dynamic::{DynamicMapper, FromRecord};
pub use loaded::Loaded;
