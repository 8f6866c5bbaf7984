//! Structural shape declarations for entities
//!
//! A [`Shape`] is the declared field list of a domain type. It stands in for
//! the exemplar instance a reflective runtime would inspect: the entity
//! author lists each field's identifier, structural [`Kind`], and tags once,
//! and the schema builder derives everything else from it.

/// Structural kind of a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// UTF-8 string
    Str,
    /// Boolean
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    /// A point in time, exposed through the `DateTime` scalar
    DateTime,
    /// A nested structure, wired as a single relationship in pass two
    Struct,
    /// A sequence, wired as a list relationship in pass two
    Slice,
    /// An optional value; no schema mapping exists for it
    Option,
    /// A keyed collection; no schema mapping exists for it
    Map,
}

/// One declared field of a [`Shape`].
#[derive(Debug, Clone)]
pub struct FieldShape {
    ident: String,
    kind: Kind,
    rename: Option<String>,
    filterable: Option<String>,
}

impl FieldShape {
    /// Declare a field by its structural identifier and kind.
    pub fn new(ident: impl Into<String>, kind: Kind) -> Self {
        Self {
            ident: ident.into(),
            kind,
            rename: None,
            filterable: None,
        }
    }

    /// Set a serialization-name tag, used verbatim as the GraphQL field name.
    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.rename = Some(name.into());
        self
    }

    /// Set the raw `filterable` tag value.
    pub fn filterable(mut self, raw: impl Into<String>) -> Self {
        self.filterable = Some(raw.into());
        self
    }

    /// The structural identifier as declared.
    pub fn ident(&self) -> &str {
        &self.ident
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The resolved GraphQL field name: the rename tag verbatim when present,
    /// otherwise the lowercased identifier.
    pub fn name(&self) -> String {
        match &self.rename {
            Some(name) => name.clone(),
            None => self.ident.to_lowercase(),
        }
    }

    /// Whether the field is marked filterable. Tag values outside the
    /// accepted set count as false.
    pub fn is_filterable(&self) -> bool {
        self.filterable.as_deref().is_some_and(parse_flag)
    }
}

/// Ordered field list of a domain type. Declaration order drives field
/// iteration order in every derivation pass.
#[derive(Debug, Clone, Default)]
pub struct Shape {
    fields: Vec<FieldShape>,
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field declaration.
    pub fn field(mut self, field: FieldShape) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(&self) -> &[FieldShape] {
        &self.fields
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw, "1" | "t" | "T" | "true" | "True" | "TRUE")
}
