//! field classification
//!
//! turns introspected fields, input fields, and arguments into
//! [`FieldDescriptor`]s. the [`LanguageType`] picked here drives every later
//! decision: accessor shape, constructor parameters, and variable types.

use crate::error::{Error, Result};
use crate::introspection::{FieldDef, InputValueDef, TypeKind, TypeRef};
use crate::resolve::{resolve, ResolvedType};

/// built-in scalar representations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    String,
    Integer,
    Float,
    Boolean,
    DateTime,
    GenericObject,
    Iterable,
}

impl ScalarType {
    /// classify a scalar by name; custom scalars are carried as generic objects
    pub fn from_name(name: &str) -> Self {
        match name {
            "ID" | "String" => ScalarType::String,
            "Int" => ScalarType::Integer,
            "Float" => ScalarType::Float,
            "Boolean" => ScalarType::Boolean,
            "Date" | "DateTime" => ScalarType::DateTime,
            "JSON" | "JSONObject" => ScalarType::GenericObject,
            "Iterable" => ScalarType::Iterable,
            _ => ScalarType::GenericObject,
        }
    }

    pub fn doc(self) -> &'static str {
        match self {
            ScalarType::String => "string",
            ScalarType::Integer => "int",
            ScalarType::Float => "float",
            ScalarType::Boolean => "bool",
            ScalarType::DateTime => "datetime",
            ScalarType::GenericObject => "object",
            ScalarType::Iterable => "iterable",
        }
    }
}

/// target-neutral representation of a field's value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LanguageType {
    Scalar(ScalarType),
    /// the enum's own generated type
    Enum(String),
    /// generated object, interface, union, or input type
    Composite { kind: TypeKind, name: String },
    Collection {
        element: Box<LanguageType>,
        /// the list may hold `null` entries
        nullable_elements: bool,
    },
}

impl LanguageType {
    pub fn is_collection(&self) -> bool {
        matches!(self, LanguageType::Collection { .. })
    }

    /// the element type for collections, `self` otherwise
    pub fn element(&self) -> &LanguageType {
        match self {
            LanguageType::Collection { element, .. } => element.element(),
            other => other,
        }
    }
}

/// canonical description of one field, input field, or argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub nullable: bool,
    pub is_list: bool,
    pub base_kind: TypeKind,
    pub base_name: String,
    pub language_type: LanguageType,
    pub doc_type: String,
    pub description: Option<String>,
    pub default_value: Option<String>,
}

impl FieldDescriptor {
    /// graphql variable type, e.g. `[ID]!`
    ///
    /// nested lists and element nullability are not represented, so an
    /// argument declared `[ID!]` gets a `[ID]` variable. servers that check
    /// variable usage strictly (graphql-js `VariablesInAllowedPosition`)
    /// reject that pairing.
    pub fn variable_type(&self) -> String {
        let base = if self.is_list {
            format!("[{}]", self.base_name)
        } else {
            self.base_name.clone()
        };
        if self.nullable {
            base
        } else {
            format!("{base}!")
        }
    }

    /// same value representation, ignoring names and docs
    pub fn same_shape(&self, other: &FieldDescriptor) -> bool {
        self.nullable == other.nullable && self.language_type == other.language_type
    }
}

/// an introspected record with a name and a type
pub trait SchemaField {
    fn name(&self) -> &str;
    fn type_ref(&self) -> &TypeRef;
    fn description(&self) -> Option<&str>;
    fn default_value(&self) -> Option<&str> {
        None
    }
}

impl SchemaField for FieldDef {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_ref(&self) -> &TypeRef {
        &self.ty
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl SchemaField for InputValueDef {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_ref(&self) -> &TypeRef {
        &self.ty
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }
}

/// map a resolved type to its language type and doc type
pub fn classify(resolved: &ResolvedType) -> Result<(LanguageType, String)> {
    let name = &resolved.base_name;
    let (single, doc) = match resolved.base_kind {
        TypeKind::Scalar => {
            let scalar = ScalarType::from_name(name);
            (LanguageType::Scalar(scalar), scalar.doc().to_string())
        }
        TypeKind::Enum => (LanguageType::Enum(name.clone()), name.clone()),
        kind @ (TypeKind::Object
        | TypeKind::Interface
        | TypeKind::Union
        | TypeKind::InputObject) => (
            LanguageType::Composite {
                kind,
                name: name.clone(),
            },
            name.clone(),
        ),
        kind @ (TypeKind::List | TypeKind::NonNull) => {
            return Err(Error::Schema(format!(
                "{} is not a base type",
                kind.as_str()
            )))
        }
    };

    if resolved.is_list {
        let collection = LanguageType::Collection {
            element: Box::new(single),
            nullable_elements: resolved.element_nullable,
        };
        Ok((collection, format!("{doc}[]")))
    } else {
        Ok((single, doc))
    }
}

/// classify one field
pub fn convert_field<F: SchemaField + ?Sized>(field: &F) -> Result<FieldDescriptor> {
    let resolved = resolve(field.type_ref())?;
    let (language_type, doc_type) = classify(&resolved)?;
    Ok(FieldDescriptor {
        name: field.name().to_string(),
        nullable: resolved.nullable,
        is_list: resolved.is_list,
        base_kind: resolved.base_kind,
        base_name: resolved.base_name,
        language_type,
        doc_type,
        description: field.description().map(str::to_string),
        default_value: field.default_value().map(str::to_string),
    })
}

/// classify a list of fields, preserving order
pub fn convert_fields<F: SchemaField>(fields: &[F]) -> Result<Vec<FieldDescriptor>> {
    fields.iter().map(convert_field).collect()
}
