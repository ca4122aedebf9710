//! introspection records
//!
//! shapes returned by the introspection queries in [`super::queries`], plus the
//! [`Schema`] snapshot the generator works from.

use serde::{Deserialize, Serialize};

/// `__TypeKind`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

impl TypeKind {
    /// `LIST` and `NON_NULL`
    pub fn is_wrapper(self) -> bool {
        matches!(self, TypeKind::List | TypeKind::NonNull)
    }

    /// the introspection spelling, e.g. `INPUT_OBJECT`
    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::Scalar => "SCALAR",
            TypeKind::Object => "OBJECT",
            TypeKind::Interface => "INTERFACE",
            TypeKind::Union => "UNION",
            TypeKind::Enum => "ENUM",
            TypeKind::InputObject => "INPUT_OBJECT",
            TypeKind::List => "LIST",
            TypeKind::NonNull => "NON_NULL",
        }
    }
}

/// one link of a type-wrapper chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeRef {
    pub kind: TypeKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "ofType", skip_serializing_if = "Option::is_none")]
    pub of_type: Option<Box<TypeRef>>,
}

impl TypeRef {
    pub fn named(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: Some(name.into()),
            of_type: None,
        }
    }

    pub fn non_null(inner: TypeRef) -> Self {
        Self::wrap(TypeKind::NonNull, inner)
    }

    pub fn list(inner: TypeRef) -> Self {
        Self::wrap(TypeKind::List, inner)
    }

    fn wrap(kind: TypeKind, inner: TypeRef) -> Self {
        Self {
            kind,
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }
}

/// a type name with its kind (list-all entries, `possibleTypes`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedType {
    pub name: String,
    pub kind: TypeKind,
}

/// field of an object or interface, or a root operation field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<InputValueDef>,
}

/// input object field or field argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputValueDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default, rename = "defaultValue")]
    pub default_value: Option<String>,
}

/// object, interface, or union record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDef {
    pub name: String,
    pub kind: TypeKind,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<FieldDef>>,
    #[serde(default, rename = "possibleTypes")]
    pub possible_types: Option<Vec<NamedType>>,
}

impl ObjectDef {
    pub fn fields(&self) -> &[FieldDef] {
        self.fields.as_deref().unwrap_or_default()
    }

    pub fn possible_types(&self) -> &[NamedType] {
        self.possible_types.as_deref().unwrap_or_default()
    }
}

/// input object record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputObjectDef {
    pub name: String,
    pub kind: TypeKind,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "inputFields")]
    pub input_fields: Option<Vec<InputValueDef>>,
}

impl InputObjectDef {
    pub fn input_fields(&self) -> &[InputValueDef] {
        self.input_fields.as_deref().unwrap_or_default()
    }
}

/// enum record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDef {
    pub name: String,
    pub kind: TypeKind,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "enumValues")]
    pub enum_values: Option<Vec<EnumValueDef>>,
}

impl EnumDef {
    pub fn values(&self) -> &[EnumValueDef] {
        self.enum_values.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValueDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// root operation type with its fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootOperation {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<FieldDef>>,
}

impl RootOperation {
    pub fn fields(&self) -> &[FieldDef] {
        self.fields.as_deref().unwrap_or_default()
    }
}

/// `query` or `mutation`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    /// keyword used in operation text
    pub fn keyword(self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
        }
    }

    /// `__schema` field naming the root type
    pub(crate) fn schema_field(self) -> &'static str {
        match self {
            OperationKind::Query => "queryType",
            OperationKind::Mutation => "mutationType",
        }
    }
}

/// every record the generator needs, fetched once per run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub objects: Vec<ObjectDef>,
    #[serde(default)]
    pub interfaces: Vec<ObjectDef>,
    #[serde(default)]
    pub unions: Vec<ObjectDef>,
    #[serde(default)]
    pub inputs: Vec<InputObjectDef>,
    #[serde(default)]
    pub enums: Vec<EnumDef>,
    #[serde(default)]
    pub query: Option<RootOperation>,
    #[serde(default)]
    pub mutation: Option<RootOperation>,
}

impl Schema {
    pub fn object(&self, name: &str) -> Option<&ObjectDef> {
        self.objects.iter().find(|object| object.name == name)
    }

    /// root operation type for a kind
    pub fn root(&self, kind: OperationKind) -> Option<&RootOperation> {
        match kind {
            OperationKind::Query => self.query.as_ref(),
            OperationKind::Mutation => self.mutation.as_ref(),
        }
    }
}
