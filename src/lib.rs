//! # graphql-entities
//!
//! Entity-driven GraphQL schema generation.
//!
//! ## Features
//!
//! - **Shape Declarations** - describe a domain type's fields once, derive the rest
//! - **Scalar Derivation** - string/bool/integer/float/date fields mapped to GraphQL primitives
//! - **Relationship Wiring** - struct and slice fields wired to sibling entity types by name
//! - **Root Query Assembly** - singular and plural accessors generated per entity
//! - **Resolver Precedence** - entity override, schema-wide default, erroring fallback
//! - **Axum Endpoint** - a ready-made handler serving the assembled schema
//!
//! ## Usage
//!
//! ```rust
//! use graphql_entities::{schema, Entity, FieldShape, Kind, SchemaOpts, Shape};
//!
//! # fn main() -> graphql_entities::Result<()> {
//! let article = Entity::new(
//!     "article",
//!     "Article",
//!     "An article on the website",
//!     Shape::new()
//!         .field(FieldShape::new("ID", Kind::Str).rename("id"))
//!         .field(FieldShape::new("Title", Kind::Str).filterable("true"))
//!         .field(FieldShape::new("Tags", Kind::Slice)),
//! );
//! let tag = Entity::new(
//!     "tag",
//!     "Tag",
//!     "Tags are used to categorize articles",
//!     Shape::new().field(FieldShape::new("Name", Kind::Str)),
//! );
//!
//! // `Query.article(id)`, `Query.articles`, `Query.tag(id)`, `Query.tags`,
//! // and `Article.tags: [Tag]` are all derived and bound to resolvers.
//! let schema = schema(SchemaOpts::default(), vec![article, tag])?;
//! # Ok(())
//! # }
//! ```

pub mod entity;
mod fields;
pub mod http;
mod relations;
pub mod resolver;
pub mod scalars;
pub mod schema;
pub mod shape;

pub use entity::Entity;
pub use fields::FilterKind;
pub use http::graphql_handler;
pub use resolver::{ResolveFn, ResolverFactory, Resolvers};
pub use schema::{schema, SchemaOpts};
pub use shape::{FieldShape, Kind, Shape};

use thiserror::Error;

/// Schema construction errors
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A declared field kind has no scalar or relationship mapping.
    #[error("unrecognized field type: {entity}.{field}")]
    UnrecognizedFieldType { entity: String, field: String },

    /// A relationship field names an entity absent from the registered set.
    #[error("unknown relationship target: {entity}.{field} references {target}")]
    UnknownRelationshipTarget {
        entity: String,
        field: String,
        target: String,
    },

    /// Two entities normalize to the same lookup name.
    #[error("duplicate entity name: {0}")]
    DuplicateEntity(String),

    /// The execution engine rejected the assembled type graph.
    #[error("schema build failed: {0}")]
    Build(String),
}

/// Result type for schema construction
pub type Result<T> = std::result::Result<T, SchemaError>;
