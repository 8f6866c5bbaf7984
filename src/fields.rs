//! Field classification and scalar type derivation
//!
//! Pass one of schema construction: every declared field of an entity is
//! classified as a scalar (mapped to a GraphQL primitive), deferred
//! (relationship material for pass two), or unsupported (a hard error). The
//! scalar fields become the entity's object type; filter kinds of filterable
//! fields are collected on the side for later use as listing arguments.

use async_graphql::dynamic::{Field, FieldFuture, Object, ResolverContext, TypeRef};
use async_graphql::indexmap::IndexMap;
use async_graphql::Value;

use crate::entity::Entity;
use crate::scalars;
use crate::shape::{FieldShape, Kind};
use crate::{Result, SchemaError};

/// Filter classification recorded for a filterable scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Bool,
    Date,
    Float,
    Int,
    Str,
}

/// Outcome of classifying one declared field.
pub(crate) enum FieldClass {
    /// A primitive field belonging to the entity's own object type.
    Scalar {
        type_name: &'static str,
        filter: Option<FilterKind>,
    },
    /// Relationship material, handled in pass two.
    Deferred,
    /// No scalar or relationship mapping exists for the kind.
    Unsupported,
}

/// Map a declared field to its scalar GraphQL type, defer relationship
/// kinds, and reject everything else.
pub(crate) fn classify(field: &FieldShape) -> FieldClass {
    let (type_name, filter) = match field.kind() {
        Kind::Str => (TypeRef::STRING, FilterKind::Str),
        Kind::Bool => (TypeRef::BOOLEAN, FilterKind::Bool),
        Kind::I8
        | Kind::I16
        | Kind::I32
        | Kind::I64
        | Kind::Isize
        | Kind::U8
        | Kind::U16
        | Kind::U32
        | Kind::U64
        | Kind::Usize => (TypeRef::INT, FilterKind::Int),
        Kind::F32 | Kind::F64 => (TypeRef::FLOAT, FilterKind::Float),
        Kind::DateTime => (scalars::DATE_TIME, FilterKind::Date),
        Kind::Struct | Kind::Slice => return FieldClass::Deferred,
        Kind::Option | Kind::Map => return FieldClass::Unsupported,
    };

    FieldClass::Scalar {
        type_name,
        filter: field.is_filterable().then_some(filter),
    }
}

/// Build the scalar-only object type for an entity, named by its label and
/// carrying its description. Returns the object together with the filter
/// kinds of its filterable fields.
///
/// Later fields whose resolved names collide overwrite earlier ones.
pub(crate) fn object_type(entity: &Entity) -> Result<(Object, IndexMap<String, FilterKind>)> {
    let mut fields: IndexMap<String, Field> = IndexMap::new();
    let mut filters: IndexMap<String, FilterKind> = IndexMap::new();

    for shape_field in entity.shape().fields() {
        match classify(shape_field) {
            FieldClass::Deferred => continue,
            FieldClass::Unsupported => {
                return Err(SchemaError::UnrecognizedFieldType {
                    entity: entity.name().to_lowercase(),
                    field: shape_field.ident().to_string(),
                })
            }
            FieldClass::Scalar { type_name, filter } => {
                let name = shape_field.name();
                if let Some(kind) = filter {
                    filters.insert(name.clone(), kind);
                }
                let field = Field::new(
                    name.clone(),
                    TypeRef::named(type_name),
                    value_resolver(name.clone()),
                );
                fields.insert(name, field);
            }
        }
    }

    let mut object = Object::new(entity.label()).description(entity.description());
    for (_, field) in fields {
        object = object.field(field);
    }

    Ok((object, filters))
}

/// Default scalar resolver: look the field name up in the parent value,
/// which resolvers produce as an object keyed by field name.
fn value_resolver(
    name: String,
) -> impl for<'a> Fn(ResolverContext<'a>) -> FieldFuture<'a> + Send + Sync + 'static {
    move |ctx: ResolverContext| {
        let name = name.clone();
        FieldFuture::new(async move {
            if let Some(Value::Object(parent)) = ctx.parent_value.as_value() {
                if let Some(value) = parent.get(name.as_str()) {
                    return Ok(Some(value.clone()));
                }
            }
            Ok(None)
        })
    }
}
