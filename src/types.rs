//! Data types used throughout the GraphQL docs server.
//!
//! This module contains the "model" structs and enums that represent a
//! loaded schema (named types, fields, arguments, wrapper types) as well
//! as the `Definition` variant that navigation entries point at.
use std::collections::BTreeMap;
use std::sync::Arc;

/// The kind of a named type in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

impl TypeKind {
    /// The introspection `kind` string for this type kind.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::Scalar => "SCALAR",
            TypeKind::Object => "OBJECT",
            TypeKind::Interface => "INTERFACE",
            TypeKind::Union => "UNION",
            TypeKind::Enum => "ENUM",
            TypeKind::InputObject => "INPUT_OBJECT",
        }
    }
}

/// A reference to a type as written in a field or argument position.
///
/// Wrappers nest finitely around exactly one named type, so every
/// recursive walk over a `TypeRef` terminates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// `T!`
    NonNull(Box<TypeRef>),
    /// `[T]`
    List(Box<TypeRef>),
    /// A reference to a named type by name (e.g. "User", "String").
    Named(String),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn non_null(inner: TypeRef) -> Self {
        TypeRef::NonNull(Box::new(inner))
    }

    pub fn list(inner: TypeRef) -> Self {
        TypeRef::List(Box::new(inner))
    }

    /// The innermost named type, with every wrapper stripped.
    pub fn named_type(&self) -> &str {
        match self {
            TypeRef::NonNull(inner) | TypeRef::List(inner) => inner.named_type(),
            TypeRef::Named(name) => name,
        }
    }
}

/// An argument or input-object field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputValueInfo {
    /// The argument name (e.g. "first", "id").
    pub name: String,
    /// The declared type of the argument.
    pub ty: TypeRef,
    pub description: Option<String>,
    /// The default value as GraphQL source text (e.g. "10", "\"en\"").
    pub default_value: Option<String>,
    pub deprecation_reason: Option<String>,
}

/// A field on an object or interface type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    /// The field name (e.g. "email").
    pub name: String,
    /// The declared output type of the field.
    pub ty: TypeRef,
    pub description: Option<String>,
    pub deprecation_reason: Option<String>,
    /// The arguments accepted by the field, in declaration order.
    pub args: Vec<Arc<InputValueInfo>>,
}

/// A value of an enum type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValueInfo {
    pub name: String,
    pub description: Option<String>,
    pub deprecation_reason: Option<String>,
}

/// A named, independently defined type in the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedType {
    /// The type name (e.g. "User").
    pub name: String,
    pub kind: TypeKind,
    pub description: Option<String>,
    /// Output fields (objects and interfaces only).
    pub fields: Vec<Arc<FieldInfo>>,
    /// Input fields (input objects only).
    pub input_fields: Vec<Arc<InputValueInfo>>,
    /// Enum values (enums only).
    pub enum_values: Vec<EnumValueInfo>,
    /// Names of the interfaces this type implements.
    pub interfaces: Vec<String>,
    /// Names of the concrete types behind a union or interface.
    pub possible_types: Vec<String>,
}

impl NamedType {
    /// An empty type of the given kind, to be filled in by the caller.
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
            fields: Vec::new(),
            input_fields: Vec::new(),
            enum_values: Vec::new(),
            interfaces: Vec::new(),
            possible_types: Vec::new(),
        }
    }

    /// Whether this type has a member list that can be searched by name.
    ///
    /// Objects and interfaces expose their fields, input objects their
    /// input fields.  Scalars, enums and unions never do, and neither does
    /// an input object that declares no fields.
    pub fn exposes_field_set(&self) -> bool {
        match self.kind {
            TypeKind::Object | TypeKind::Interface => !self.fields.is_empty(),
            TypeKind::InputObject => !self.input_fields.is_empty(),
            TypeKind::Scalar | TypeKind::Enum | TypeKind::Union => false,
        }
    }

    /// Whether this type can be selected into with `{ … }`.
    pub fn is_composite(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::Object | TypeKind::Interface | TypeKind::Union
        )
    }

    pub fn field(&self, name: &str) -> Option<&Arc<FieldInfo>> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// What a navigation entry points at.
///
/// Together with the wrapper variants of [`TypeRef`] this is the closed
/// set of nodes the explorer distinguishes; dispatch is always an
/// exhaustive `match`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definition {
    Type(Arc<NamedType>),
    Field(Arc<FieldInfo>),
    Argument(Arc<InputValueInfo>),
}

impl Definition {
    pub fn name(&self) -> &str {
        match self {
            Definition::Type(t) => &t.name,
            Definition::Field(f) => &f.name,
            Definition::Argument(a) => &a.name,
        }
    }

    pub fn as_type(&self) -> Option<&Arc<NamedType>> {
        match self {
            Definition::Type(t) => Some(t),
            Definition::Field(_) | Definition::Argument(_) => None,
        }
    }
}

/// A loaded schema.  Owned by whoever loaded it and shared read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaGraph {
    pub description: Option<String>,
    pub query_type: Option<String>,
    pub mutation_type: Option<String>,
    pub subscription_type: Option<String>,
    /// All named types keyed by name, introspection types included.
    pub types: BTreeMap<String, Arc<NamedType>>,
}

impl SchemaGraph {
    pub fn get_type(&self, name: &str) -> Option<&Arc<NamedType>> {
        self.types.get(name)
    }

    /// Insert (or replace) a named type.
    pub fn insert_type(&mut self, ty: NamedType) {
        self.types.insert(ty.name.clone(), Arc::new(ty));
    }

    /// The root operation types that exist, labelled by operation keyword.
    pub fn root_types(&self) -> Vec<(&'static str, &Arc<NamedType>)> {
        [
            ("query", &self.query_type),
            ("mutation", &self.mutation_type),
            ("subscription", &self.subscription_type),
        ]
        .into_iter()
        .filter_map(|(op, name)| {
            let ty = self.get_type(name.as_deref()?)?;
            Some((op, ty))
        })
        .collect()
    }

    /// The root type for an operation keyword (`query`, `mutation`,
    /// `subscription`).
    pub fn root_type(&self, operation: &str) -> Option<&Arc<NamedType>> {
        let name = match operation {
            "query" => self.query_type.as_deref(),
            "mutation" => self.mutation_type.as_deref(),
            "subscription" => self.subscription_type.as_deref(),
            _ => None,
        }?;
        self.get_type(name)
    }

    /// Every type a user declared, i.e. excluding `__`-prefixed
    /// introspection types.
    pub fn user_types(&self) -> impl Iterator<Item = &Arc<NamedType>> {
        self.types.values().filter(|t| !t.name.starts_with("__"))
    }
}
