use std::marker::PhantomData;

use crate::mapper::rule::MappingRule;

/// Scalar projection of a persisted record into a domain entity.
///
/// Copies every non-relationship field and leaves relationship fields
/// empty. This is the compile-time replacement for field reflection: each
/// entity/record pair states its projection once, and the mapper composes
/// relationship rules on top of it.
pub trait FromRecord<R>: Sized {
    fn from_record(record: &R) -> Self;
}

/// Converts one persisted record into one domain entity.
///
/// Relationship rules run only when the caller requested relations, and
/// each rule maps its related records through the related entity's mapper
/// with relations disabled, so recursion is capped at exactly one level.
/// The cap is what keeps the mutually referencing User↔Job↔Response graph
/// from cycling.
pub struct DynamicMapper<R, E> {
    rules: Vec<MappingRule<R, E>>,
    _marker: PhantomData<fn(&R) -> E>,
}

impl<R: 'static, E> DynamicMapper<R, E>
where
    E: FromRecord<R> + 'static,
{
    pub(crate) fn new(rules: Vec<MappingRule<R, E>>) -> Self {
        Self {
            rules,
            _marker: PhantomData,
        }
    }

    /// A mapper with no relationship rules; relations always map empty.
    pub(crate) fn flat() -> Self {
        Self::new(Vec::new())
    }

    /// Maps a record to an entity, or `None` when the record is absent.
    ///
    /// An absent record short-circuits before any field is touched, so
    /// "not found" passes through without a partially constructed entity.
    pub fn map(&self, record: Option<&R>, include_relations: bool) -> Option<E> {
        let record = record?;

        let mut entity = E::from_record(record);
        if include_relations {
            for rule in &self.rules {
                rule.apply(record, &mut entity);
            }
        }

        Some(entity)
    }
}
