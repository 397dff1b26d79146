//! Process-wide mapper table.
//!
//! One registry is constructed at startup, all entity mappers are
//! registered into it, and it is then passed by shared reference to every
//! repository. Registration must complete before any concurrent reads
//! begin; the registry is read-only afterwards.

use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::Arc,
};

use crate::mapper::{
    dynamic::{DynamicMapper, FromRecord},
    rule::MappingRule,
};

/// A deferred relationship rule: resolved against the registry at
/// registration time so mutually referencing mappers can be declared in
/// any order.
pub type RuleSpec<R, E> = Box<dyn FnOnce(&mut MapperRegistry) -> MappingRule<R, E>>;

type MapperKey = (TypeId, TypeId);

/// Table of mappers keyed by `(entity type, record type)`.
#[derive(Default)]
pub struct MapperRegistry {
    mappers: HashMap<MapperKey, Arc<dyn Any + Send + Sync>>,
}

impl MapperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the mapper for `(E, R)` from the given rules and stores it,
    /// replacing any previous registration for the pair.
    ///
    /// Each rule first resolves its related mapper via
    /// [`MapperRegistry::get_or_create`], so registering User, Job, and
    /// Response works in any order.
    pub fn register<R, E>(&mut self, rules: Vec<RuleSpec<R, E>>) -> Arc<DynamicMapper<R, E>>
    where
        R: Send + Sync + 'static,
        E: FromRecord<R> + Send + Sync + 'static,
    {
        let resolved = rules.into_iter().map(|rule| rule(self)).collect();

        let mapper = Arc::new(DynamicMapper::new(resolved));
        self.mappers.insert(Self::key::<R, E>(), mapper.clone());

        mapper
    }

    /// Pure lookup; never constructs a mapper.
    pub fn get_mapper<R, E>(&self) -> Option<Arc<DynamicMapper<R, E>>>
    where
        R: Send + Sync + 'static,
        E: FromRecord<R> + Send + Sync + 'static,
    {
        self.mappers
            .get(&Self::key::<R, E>())
            .and_then(|mapper| mapper.clone().downcast::<DynamicMapper<R, E>>().ok())
    }

    /// Looks up the mapper for `(E, R)`, creating a rule-less one when the
    /// pair has not been registered yet.
    ///
    /// Rules hold the returned `Arc` directly: if the pair is registered
    /// with full rules later, only the registry entry is replaced and
    /// already-built mappers keep the placeholder. Related mappers run
    /// with relations disabled, where rules are never consulted, so the
    /// placeholder and the full mapper behave identically there.
    pub(crate) fn get_or_create<R, E>(&mut self) -> Arc<DynamicMapper<R, E>>
    where
        R: Send + Sync + 'static,
        E: FromRecord<R> + Send + Sync + 'static,
    {
        if let Some(mapper) = self.get_mapper::<R, E>() {
            return mapper;
        }

        let mapper = Arc::new(DynamicMapper::flat());
        self.mappers.insert(Self::key::<R, E>(), mapper.clone());

        mapper
    }

    fn key<R: 'static, E: 'static>() -> MapperKey {
        (TypeId::of::<E>(), TypeId::of::<R>())
    }
}
