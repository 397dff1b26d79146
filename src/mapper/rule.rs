//! Relationship rules: how one relation field of a record maps into the
//! target entity through the related entity's mapper.

use std::sync::Arc;

use crate::mapper::{
    dynamic::{DynamicMapper, FromRecord},
    loaded::Loaded,
    registry::{MapperRegistry, RuleSpec},
};

/// Maps one relationship field of a record into the target entity.
///
/// Built from a slot extractor, an entity field assigner, and a handle to
/// the related mapper. The related mapper always runs with relations
/// disabled (depth-one cap).
pub struct MappingRule<R, E> {
    apply: Box<dyn Fn(&R, &mut E) + Send + Sync>,
}

impl<R: 'static, E: 'static> MappingRule<R, E> {
    pub(crate) fn apply(&self, record: &R, entity: &mut E) {
        (self.apply)(record, entity)
    }

    /// One-to-many: maps every element of the fetched collection.
    pub(crate) fn collection<RR, RE>(
        field: &'static str,
        extract: fn(&R) -> &Loaded<Vec<RR>>,
        assign: fn(&mut E, Vec<RE>),
        related: Arc<DynamicMapper<RR, RE>>,
    ) -> Self
    where
        RR: 'static,
        RE: FromRecord<RR> + 'static,
    {
        MappingRule {
            apply: Box::new(move |record, entity| match extract(record) {
                Loaded::NotFetched => panic!(
                    "relation `{field}` was not fetched by the query but relations were requested"
                ),
                Loaded::Absent => assign(entity, Vec::new()),
                Loaded::Present(rows) => {
                    let mapped = rows
                        .iter()
                        .filter_map(|row| related.map(Some(row), false))
                        .collect();
                    assign(entity, mapped);
                }
            }),
        }
    }

    /// Many-to-one: maps the single fetched related record.
    pub(crate) fn single<RR, RE>(
        field: &'static str,
        extract: fn(&R) -> &Loaded<Box<RR>>,
        assign: fn(&mut E, Option<Box<RE>>),
        related: Arc<DynamicMapper<RR, RE>>,
    ) -> Self
    where
        RR: 'static,
        RE: FromRecord<RR> + 'static,
    {
        MappingRule {
            apply: Box::new(move |record, entity| match extract(record) {
                Loaded::NotFetched => panic!(
                    "relation `{field}` was not fetched by the query but relations were requested"
                ),
                Loaded::Absent => assign(entity, None),
                Loaded::Present(row) => {
                    assign(entity, related.map(Some(row.as_ref()), false).map(Box::new));
                }
            }),
        }
    }
}

/// Declares a one-to-many relationship rule. The related mapper is
/// resolved against the registry when the owning mapper is registered,
/// creating a rule-less placeholder if the pair is not registered yet.
pub fn has_many<R, E, RR, RE>(
    field: &'static str,
    extract: fn(&R) -> &Loaded<Vec<RR>>,
    assign: fn(&mut E, Vec<RE>),
) -> RuleSpec<R, E>
where
    R: Send + Sync + 'static,
    E: Send + Sync + 'static,
    RR: Send + Sync + 'static,
    RE: FromRecord<RR> + Send + Sync + 'static,
{
    Box::new(move |registry: &mut MapperRegistry| {
        let related = registry.get_or_create::<RR, RE>();
        MappingRule::collection(field, extract, assign, related)
    })
}

/// Declares a many-to-one relationship rule; resolution works as in
/// [`has_many`].
pub fn belongs_to<R, E, RR, RE>(
    field: &'static str,
    extract: fn(&R) -> &Loaded<Box<RR>>,
    assign: fn(&mut E, Option<Box<RE>>),
) -> RuleSpec<R, E>
where
    R: Send + Sync + 'static,
    E: Send + Sync + 'static,
    RR: Send + Sync + 'static,
    RE: FromRecord<RR> + Send + Sync + 'static,
{
    Box::new(move |registry: &mut MapperRegistry| {
        let related = registry.get_or_create::<RR, RE>();
        MappingRule::single(field, extract, assign, related)
    })
}
