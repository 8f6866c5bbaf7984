//! Resolver contracts and resolution precedence
//!
//! A [`ResolverFactory`] produces the per-query resolve function for an
//! entity; [`Resolvers`] groups the factories for the two access patterns
//! (single and listing). [`resolve`] picks the concrete factory for each
//! pattern independently: entity override, else schema-wide default, else a
//! fallback that always errors at query time. Construction therefore never
//! fails for a missing resolver.

use std::sync::Arc;

use async_graphql::dynamic::{FieldFuture, ResolverContext};
use async_graphql::Value;

use crate::entity::Entity;

/// A field resolve function as consumed by the execution engine.
pub type ResolveFn = Box<dyn for<'a> Fn(ResolverContext<'a>) -> FieldFuture<'a> + Send + Sync>;

/// Produces a [`ResolveFn`] bound to one entity.
///
/// Listing factories are expected to use the entity's filter metadata once
/// filter arguments are wired; today they only receive the entity itself.
pub type ResolverFactory = Arc<dyn Fn(&Entity) -> ResolveFn + Send + Sync>;

/// Resolver factories for the two access patterns of an entity. Either may
/// be absent; resolution falls through to the schema-wide defaults.
#[derive(Clone, Default)]
pub struct Resolvers {
    pub single: Option<ResolverFactory>,
    pub listing: Option<ResolverFactory>,
}

/// The concrete factories selected for one entity, one per access pattern.
#[derive(Clone)]
pub(crate) struct Resolved {
    pub(crate) single: ResolverFactory,
    pub(crate) listing: ResolverFactory,
}

/// Select the factory for each access pattern: entity override, else
/// schema-wide default, else the unresolvable fallback.
pub(crate) fn resolve(defaults: &Resolvers, entity: &Entity) -> Resolved {
    let single = entity
        .resolvers()
        .single
        .clone()
        .or_else(|| defaults.single.clone())
        .unwrap_or_else(unresolvable);
    let listing = entity
        .resolvers()
        .listing
        .clone()
        .or_else(|| defaults.listing.clone())
        .unwrap_or_else(unresolvable);

    Resolved { single, listing }
}

/// Fallback factory bound when no resolver is configured anywhere. The
/// produced function fails every invocation with the entity description and
/// yields no data, so the error stays scoped to the field at query time.
fn unresolvable() -> ResolverFactory {
    Arc::new(|entity: &Entity| -> ResolveFn {
        let message = format!("unresolvable: {}", entity.description());
        Box::new(move |_ctx| {
            let message = message.clone();
            FieldFuture::new(async move { Err::<Option<Value>, _>(async_graphql::Error::new(message)) })
        })
    })
}
