//! Relationship wiring between entity types
//!
//! Pass two of schema construction. Runs only once every entity's scalar
//! object type exists: relationship fields reference sibling types by name,
//! so the full type set must be built first for forward references to
//! resolve. A struct-kinded field becomes a single relationship to the
//! entity named by the field identifier; a slice-kinded field becomes a list
//! relationship to the entity named by the singularized identifier.

use std::collections::HashSet;

use async_graphql::dynamic::{Field, TypeRef};
use async_graphql::indexmap::IndexMap;
use inflector::Inflector;

use crate::entity::Entity;
use crate::resolver::Resolved;
use crate::shape::Kind;
use crate::{Result, SchemaError};

/// Derive the relationship fields of one entity against the completed
/// entity registry and built-type set, keyed by field name.
///
/// `resolvers` are the factories resolved for the entity being wired; each
/// produced field binds the matching factory to the TARGET entity. An entity
/// with no struct- or slice-kinded fields yields an empty map.
pub(crate) fn relationship_fields(
    registry: &IndexMap<String, Entity>,
    types: &HashSet<String>,
    entity: &Entity,
    resolvers: &Resolved,
) -> Result<IndexMap<String, Field>> {
    let mut fields = IndexMap::new();

    for shape_field in entity.shape().fields() {
        let kind = shape_field.kind();
        if !matches!(kind, Kind::Struct | Kind::Slice) {
            continue;
        }

        // Relationship fields keep the declared identifier, lowercased;
        // rename tags apply to scalar fields only.
        let name = shape_field.ident().to_lowercase();
        let target_name = match kind {
            Kind::Slice => name.to_singular(),
            _ => name.clone(),
        };

        let target = registry
            .get(&target_name)
            .filter(|_| types.contains(&target_name));
        let Some(target) = target else {
            return Err(SchemaError::UnknownRelationshipTarget {
                entity: entity.name().to_lowercase(),
                field: shape_field.ident().to_string(),
                target: target_name,
            });
        };

        let field = match kind {
            Kind::Struct => Field::new(
                name.clone(),
                TypeRef::named(target.label()),
                (resolvers.single)(target),
            )
            .description(format!(
                "Get a single {} ({}) by id or slug",
                target.name(),
                target.description()
            )),
            _ => Field::new(
                name.clone(),
                TypeRef::named_list(target.label()),
                (resolvers.listing)(target),
            )
            .description(format!(
                "Get a list of {} ({}) according to filters",
                target.name(),
                target.description()
            )),
        };

        fields.insert(name, field);
    }

    Ok(fields)
}
