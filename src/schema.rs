//! Schema assembly
//!
//! Orchestrates the three construction passes over the entity set: build
//! every scalar object type, wire every relationship against the completed
//! type set, then expose singular and plural root Query fields per entity.
//! The first error in any pass aborts the whole build; no partial schema is
//! ever returned.

use std::collections::HashSet;

use async_graphql::dynamic::{Field, InputValue, Object, Schema, TypeRef};
use async_graphql::indexmap::IndexMap;
use inflector::Inflector;
use tracing::{debug, trace};

use crate::entity::Entity;
use crate::resolver::{resolve, Resolvers};
use crate::{fields, relations, scalars, Result, SchemaError};

/// Options for schema construction.
#[derive(Clone, Default)]
pub struct SchemaOpts {
    /// Resolver factories applied to every entity that does not carry its
    /// own override.
    pub default_resolvers: Resolvers,
}

/// Build a GraphQL schema exposing the given entities.
///
/// Every entity contributes one object type plus two root Query fields: a
/// singular accessor keyed by its lowercased name carrying a nullable `id`
/// argument, and a plural accessor keyed by the pluralized name returning a
/// list. Relationship fields between entities are wired by field name, so an
/// entity may reference siblings registered after it.
pub fn schema(opts: SchemaOpts, entities: Vec<Entity>) -> Result<Schema> {
    debug!(entities = entities.len(), "starting schema build");

    // First pass defines all entity types without relationships.
    let mut registry: IndexMap<String, Entity> = IndexMap::with_capacity(entities.len());
    let mut objects: IndexMap<String, Object> = IndexMap::with_capacity(entities.len());

    for entity in entities {
        let name = entity.name().to_lowercase();
        if registry.contains_key(&name) {
            return Err(SchemaError::DuplicateEntity(name));
        }

        // TODO: thread the collected filter kinds into listing arguments
        let (object, _) = fields::object_type(&entity)?;
        trace!(entity = %name, "built scalar object type");

        objects.insert(name.clone(), object);
        registry.insert(name, entity);
    }

    // Second pass wires relationships; every sibling type now exists, so
    // forward references resolve by name.
    let type_names: HashSet<String> = objects.keys().cloned().collect();
    let mut wired: IndexMap<String, Object> = IndexMap::with_capacity(objects.len());

    for (name, mut object) in objects {
        let entity = &registry[name.as_str()];
        let resolvers = resolve(&opts.default_resolvers, entity);

        let rel_fields = relations::relationship_fields(&registry, &type_names, entity, &resolvers)?;
        trace!(entity = %name, relationships = rel_fields.len(), "wired relationships");

        for (_, field) in rel_fields {
            object = object.field(field);
        }
        wired.insert(name, object);
    }

    // Final pass defines the query itself.
    let mut query_fields: IndexMap<String, Field> = IndexMap::new();

    for (name, entity) in &registry {
        let resolvers = resolve(&opts.default_resolvers, entity);
        let plural = name.to_plural();

        query_fields.insert(
            name.clone(),
            Field::new(
                name.clone(),
                TypeRef::named(entity.label()),
                (resolvers.single)(entity),
            )
            .argument(InputValue::new("id", TypeRef::named(TypeRef::STRING)))
            .description(format!(
                "Get a single {} ({}) by id or slug",
                name,
                entity.description()
            )),
        );

        query_fields.insert(
            plural.clone(),
            Field::new(
                plural.clone(),
                TypeRef::named_list(entity.label()),
                (resolvers.listing)(entity),
            )
            .description(format!(
                "Get a list of {} ({}) according to filters",
                name,
                entity.description()
            )),
        );
        trace!(entity = %name, plural = %plural, "added root query fields");
    }

    let mut query = Object::new("Query");
    for (_, field) in query_fields {
        query = query.field(field);
    }

    let mut builder = Schema::build("Query", None, None).register(scalars::date_time());
    for (_, object) in wired {
        builder = builder.register(object);
    }
    builder = builder.register(query);

    let schema = builder
        .finish()
        .map_err(|err| SchemaError::Build(err.to_string()))?;

    debug!("schema build complete");
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_graphql::dynamic::FieldFuture;
    use async_graphql::Value;

    use super::*;
    use crate::resolver::{ResolveFn, ResolverFactory};
    use crate::shape::{FieldShape, Kind, Shape};

    fn article() -> Entity {
        let shape = Shape::new()
            .field(FieldShape::new("ID", Kind::Str).rename("id"))
            .field(FieldShape::new("Title", Kind::Str).filterable("true"))
            .field(FieldShape::new("Body", Kind::Str))
            .field(FieldShape::new("Author", Kind::Struct))
            .field(FieldShape::new("Tags", Kind::Slice))
            .field(FieldShape::new("CreatedAt", Kind::DateTime).rename("created_at"))
            .field(FieldShape::new("UpdatedAt", Kind::DateTime).rename("updated_at"));
        Entity::new("article", "Article", "An article on the website", shape)
    }

    fn author() -> Entity {
        let shape = Shape::new()
            .field(FieldShape::new("ID", Kind::Str).rename("id"))
            .field(FieldShape::new("Name", Kind::Str))
            .field(FieldShape::new("Email", Kind::Str));
        Entity::new("author", "Author", "A human person who writes things", shape)
    }

    fn tag() -> Entity {
        let shape = Shape::new()
            .field(FieldShape::new("ID", Kind::Str))
            .field(FieldShape::new("Name", Kind::Str))
            .field(FieldShape::new("Articles", Kind::Slice));
        Entity::new("tag", "Tag", "Tags are used to categorize articles", shape)
    }

    /// Factory serving one fixed object per entity, keyed by entity name.
    fn fixture_single(fixtures: serde_json::Value) -> ResolverFactory {
        Arc::new(move |entity: &Entity| -> ResolveFn {
            let data = fixtures[entity.name()].clone();
            Box::new(move |_ctx| {
                let data = data.clone();
                FieldFuture::new(async move {
                    let value = Value::from_json(data).expect("fixture is valid json");
                    Ok(Some(value))
                })
            })
        })
    }

    /// Factory serving one fixed list per entity, keyed by entity name.
    fn fixture_listing(fixtures: serde_json::Value) -> ResolverFactory {
        fixture_single(fixtures)
    }

    #[tokio::test]
    async fn test_every_entity_yields_type_and_query_fields() {
        // article is registered first and references author and tag, which
        // only exist later in the input order.
        let schema = schema(SchemaOpts::default(), vec![article(), author(), tag()])
            .expect("forward references resolve after pass one");
        let sdl = schema.sdl();

        for type_def in ["type Article", "type Author", "type Tag"] {
            assert!(sdl.contains(type_def), "missing {type_def} in SDL:\n{sdl}");
        }
        assert!(sdl.contains("scalar DateTime"), "missing DateTime scalar:\n{sdl}");

        for query_field in [
            "article(id: String): Article",
            "articles: [Article]",
            "author(id: String): Author",
            "authors: [Author]",
            "tag(id: String): Tag",
            "tags: [Tag]",
        ] {
            assert!(sdl.contains(query_field), "missing {query_field} in SDL:\n{sdl}");
        }
    }

    #[tokio::test]
    async fn test_scalar_fields_named_and_typed_from_shape() {
        let schema = schema(SchemaOpts::default(), vec![article(), author(), tag()])
            .expect("schema builds");
        let sdl = schema.sdl();

        assert!(sdl.contains("id: String"), "rename tag should win:\n{sdl}");
        assert!(sdl.contains("created_at: DateTime"), "{sdl}");
        assert!(sdl.contains("updated_at: DateTime"), "{sdl}");
        assert!(sdl.contains("title: String"), "{sdl}");
        assert!(!sdl.contains("createdat"), "ident should not leak unrenamed:\n{sdl}");
    }

    #[tokio::test]
    async fn test_relationship_fields_reference_sibling_types() {
        let schema = schema(SchemaOpts::default(), vec![article(), author(), tag()])
            .expect("schema builds");
        let sdl = schema.sdl();

        assert!(sdl.contains("author: Author"), "single relationship:\n{sdl}");
        assert!(sdl.contains("tags: [Tag]"), "list relationship:\n{sdl}");
        assert!(sdl.contains("articles: [Article]"), "reverse list relationship:\n{sdl}");
    }

    #[tokio::test]
    async fn test_singular_query_resolves_through_default_single() {
        let fixtures = serde_json::json!({
            "article": { "id": "a1", "title": "Hello", "author": {}, "tags": {} },
            "author": { "id": "w1", "name": "Ada" },
            "tag": { "id": "t1", "name": "news" },
        });
        let opts = SchemaOpts {
            default_resolvers: Resolvers {
                single: Some(fixture_single(fixtures.clone())),
                listing: None,
            },
        };

        let schema = schema(opts, vec![article(), author(), tag()]).expect("schema builds");
        let response = schema
            .execute(r#"{ article(id: "a1") { id title author { name } } }"#)
            .await;

        assert!(response.errors.is_empty(), "unexpected errors: {:?}", response.errors);
        let data = response.data.into_json().expect("data serializes");
        assert_eq!(
            data,
            serde_json::json!({
                "article": { "id": "a1", "title": "Hello", "author": { "name": "Ada" } }
            })
        );
    }

    #[tokio::test]
    async fn test_listing_query_resolves_through_default_listing() {
        let fixtures = serde_json::json!({
            "tag": [ { "name": "news" }, { "name": "sports" } ],
        });
        let opts = SchemaOpts {
            default_resolvers: Resolvers {
                single: None,
                listing: Some(fixture_listing(fixtures)),
            },
        };

        let schema = schema(opts, vec![tag()]).expect("schema builds");
        let response = schema.execute("{ tags { name } }").await;

        assert!(response.errors.is_empty(), "unexpected errors: {:?}", response.errors);
        let data = response.data.into_json().expect("data serializes");
        assert_eq!(
            data,
            serde_json::json!({ "tags": [ { "name": "news" }, { "name": "sports" } ] })
        );
    }

    #[tokio::test]
    async fn test_entity_override_beats_schema_default() {
        let default_fixtures = serde_json::json!({ "author": { "name": "default" } });
        let override_fixtures = serde_json::json!({ "author": { "name": "override" } });

        let entity = author().with_resolvers(Resolvers {
            single: Some(fixture_single(override_fixtures)),
            listing: None,
        });
        let opts = SchemaOpts {
            default_resolvers: Resolvers {
                single: Some(fixture_single(default_fixtures)),
                listing: None,
            },
        };

        let schema = schema(opts, vec![entity]).expect("schema builds");
        let response = schema.execute(r#"{ author(id: "w1") { name } }"#).await;

        assert!(response.errors.is_empty(), "unexpected errors: {:?}", response.errors);
        let data = response.data.into_json().expect("data serializes");
        assert_eq!(data, serde_json::json!({ "author": { "name": "override" } }));
    }

    #[tokio::test]
    async fn test_missing_resolver_errors_at_query_time_only() {
        // No resolvers anywhere: construction still succeeds, the field
        // fails when queried, and the message carries the description.
        let schema = schema(SchemaOpts::default(), vec![article(), author(), tag()])
            .expect("missing resolvers never break construction");
        let response = schema.execute("{ articles { id } }").await;

        assert_eq!(response.errors.len(), 1);
        assert!(
            response.errors[0].message.contains("unresolvable: An article on the website"),
            "unexpected message: {}",
            response.errors[0].message
        );
        let data = response.data.into_json().expect("data serializes");
        assert_eq!(data, serde_json::json!({ "articles": null }));
    }

    #[tokio::test]
    async fn test_unknown_relationship_target_aborts_build() {
        // article references author and tag, neither of which is registered.
        let err = schema(SchemaOpts::default(), vec![article()])
            .expect_err("unregistered relationship target must fail");
        assert!(matches!(err, SchemaError::UnknownRelationshipTarget { .. }));
    }

    #[tokio::test]
    async fn test_unrecognized_field_kind_aborts_build() {
        let shape = Shape::new()
            .field(FieldShape::new("ID", Kind::Str))
            .field(FieldShape::new("Meta", Kind::Map));
        let entity = Entity::new("article", "Article", "An article on the website", shape);

        let err = schema(SchemaOpts::default(), vec![entity])
            .expect_err("map fields have no mapping");
        assert!(matches!(err, SchemaError::UnrecognizedFieldType { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_entity_name_rejected() {
        let err = schema(SchemaOpts::default(), vec![author(), author()])
            .expect_err("duplicate names must not silently overwrite");
        assert!(matches!(err, SchemaError::DuplicateEntity(ref name) if name.as_str() == "author"));
    }

    #[tokio::test]
    async fn test_name_normalized_but_label_preserved() {
        let shape = Shape::new().field(FieldShape::new("ID", Kind::Str));
        let entity = Entity::new("Author", "WebsiteAuthor", "A human person who writes things", shape);

        let schema = schema(SchemaOpts::default(), vec![entity]).expect("schema builds");
        let sdl = schema.sdl();

        assert!(sdl.contains("type WebsiteAuthor"), "{sdl}");
        assert!(sdl.contains("author(id: String): WebsiteAuthor"), "{sdl}");
        assert!(sdl.contains("authors: [WebsiteAuthor]"), "{sdl}");
    }
}
