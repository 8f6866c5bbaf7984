//! Entity definitions
//!
//! An [`Entity`] describes one domain type to expose: its lookup name, the
//! GraphQL type label, a human description, the declared [`Shape`] of its
//! fields, and optional resolver factories. Entities are plain data; all
//! derivation logic lives in the schema passes.

use crate::resolver::Resolvers;
use crate::shape::Shape;

/// A domain type exposed through the generated schema.
///
/// `name` is the unique lookup key (case-normalized to lowercase wherever it
/// keys a map); `label` names the generated GraphQL object type.
#[derive(Clone)]
pub struct Entity {
    name: String,
    label: String,
    description: String,
    shape: Shape,
    resolvers: Resolvers,
}

impl Entity {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
        shape: Shape,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            description: description.into(),
            shape,
            resolvers: Resolvers::default(),
        }
    }

    /// Attach entity-specific resolver factories, overriding the schema-wide
    /// defaults for this entity.
    pub fn with_resolvers(mut self, resolvers: Resolvers) -> Self {
        self.resolvers = resolvers;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn resolvers(&self) -> &Resolvers {
        &self.resolvers
    }
}

impl std::fmt::Debug for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entity")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("description", &self.description)
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}
