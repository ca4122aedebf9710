//! schema introspection
//!
//! runs the five fixed introspection queries through a [`Transport`] and
//! collects the results into a [`Schema`] snapshot. any failure aborts the
//! whole load; nothing is retried.

pub mod queries;
mod schema;

pub use schema::{
    EnumDef, EnumValueDef, FieldDef, InputObjectDef, InputValueDef, NamedType, ObjectDef,
    OperationKind, RootOperation, Schema, TypeKind, TypeRef,
};

use crate::error::{Error, Result};
use crate::runtime::api::expect_data;
use crate::transport::Transport;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, info};

/// every named type the service reports, plus its root type names
#[derive(Debug, Clone, PartialEq)]
pub struct TypeListing {
    pub types: Vec<NamedType>,
    pub query_type: Option<String>,
    pub mutation_type: Option<String>,
}

impl TypeListing {
    /// names of a kind, without introspection types and root types
    pub fn names(&self, kind: TypeKind) -> Vec<String> {
        self.types
            .iter()
            .filter(|ty| ty.kind == kind && self.is_user_type(&ty.name))
            .map(|ty| ty.name.clone())
            .collect()
    }

    fn is_user_type(&self, name: &str) -> bool {
        !name.starts_with("__")
            && name != "Query"
            && name != "Mutation"
            && self.query_type.as_deref() != Some(name)
            && self.mutation_type.as_deref() != Some(name)
    }
}

#[derive(Deserialize)]
struct RootName {
    name: String,
}

#[derive(Deserialize)]
struct RawListing {
    #[serde(default, rename = "queryType")]
    query_type: Option<RootName>,
    #[serde(default, rename = "mutationType")]
    mutation_type: Option<RootName>,
    types: Vec<NamedType>,
}

/// runs introspection queries against a transport
pub struct Introspector<'a, T: ?Sized> {
    transport: &'a T,
}

impl<'a, T: Transport + ?Sized> Introspector<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// list every type of the schema
    pub fn types(&self) -> Result<TypeListing> {
        let data = self.run("list-types", queries::LIST_TYPES, json!({}))?;
        let raw: RawListing = take(data, "__schema", "schema")?;
        Ok(TypeListing {
            types: raw.types,
            query_type: raw.query_type.map(|root| root.name),
            mutation_type: raw.mutation_type.map(|root| root.name),
        })
    }

    /// names of every user type of a kind
    pub fn type_names(&self, kind: TypeKind) -> Result<Vec<String>> {
        Ok(self.types()?.names(kind))
    }

    /// object, interface, or union with its fields and possible types
    pub fn object(&self, name: &str) -> Result<ObjectDef> {
        let data = self.run("object", queries::OBJECT_BY_NAME, json!({ "name": name }))?;
        let object: ObjectDef = take(data, "__type", name)?;
        match object.kind {
            TypeKind::Object | TypeKind::Interface | TypeKind::Union => Ok(object),
            kind => Err(Error::Schema(format!(
                "type `{name}` is {}, expected an object, interface, or union",
                kind.as_str()
            ))),
        }
    }

    /// input object with its input fields
    pub fn input_object(&self, name: &str) -> Result<InputObjectDef> {
        let data = self.run(
            "input-object",
            queries::INPUT_OBJECT_BY_NAME,
            json!({ "name": name }),
        )?;
        let input: InputObjectDef = take(data, "__type", name)?;
        expect_kind(name, input.kind, TypeKind::InputObject)?;
        Ok(input)
    }

    /// enum with its values
    pub fn enum_type(&self, name: &str) -> Result<EnumDef> {
        let data = self.run("enum", queries::ENUM_BY_NAME, json!({ "name": name }))?;
        let enum_def: EnumDef = take(data, "__type", name)?;
        expect_kind(name, enum_def.kind, TypeKind::Enum)?;
        Ok(enum_def)
    }

    /// fields and arguments of the query or mutation root, if the schema has one
    pub fn root_operation(&self, kind: OperationKind) -> Result<Option<RootOperation>> {
        let query = queries::root_fields(kind.schema_field());
        let data = self.run(kind.keyword(), &query, json!({}))?;
        let mut schema: Map<String, Value> = take(data, "__schema", "schema")?;
        match schema.remove(kind.schema_field()) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
        }
    }

    /// load every record the generator needs
    pub fn schema(&self) -> Result<Schema> {
        let listing = self.types()?;

        let mut schema = Schema::default();
        for name in listing.names(TypeKind::Object) {
            schema.objects.push(self.object(&name)?);
        }
        for name in listing.names(TypeKind::Interface) {
            schema.interfaces.push(self.object(&name)?);
        }
        for name in listing.names(TypeKind::Union) {
            schema.unions.push(self.object(&name)?);
        }
        for name in listing.names(TypeKind::InputObject) {
            schema.inputs.push(self.input_object(&name)?);
        }
        for name in listing.names(TypeKind::Enum) {
            schema.enums.push(self.enum_type(&name)?);
        }
        schema.query = self.root_operation(OperationKind::Query)?;
        schema.mutation = self.root_operation(OperationKind::Mutation)?;

        info!(
            objects = schema.objects.len(),
            interfaces = schema.interfaces.len(),
            unions = schema.unions.len(),
            inputs = schema.inputs.len(),
            enums = schema.enums.len(),
            "schema introspected"
        );
        Ok(schema)
    }

    fn run(&self, label: &str, operation: &str, variables: Value) -> Result<Map<String, Value>> {
        debug!(query = label, %variables, "introspection query");
        let response = self.transport.query(operation, &variables)?;
        expect_data(response)
    }
}

fn take<D: DeserializeOwned>(mut data: Map<String, Value>, key: &str, what: &str) -> Result<D> {
    match data.remove(key) {
        None | Some(Value::Null) => Err(Error::Schema(format!(
            "introspection returned no `{key}` for {what}"
        ))),
        Some(value) => Ok(serde_json::from_value(value)?),
    }
}

fn expect_kind(name: &str, actual: TypeKind, expected: TypeKind) -> Result<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(Error::Schema(format!(
            "type `{name}` is {}, expected {}",
            actual.as_str(),
            expected.as_str()
        )))
    }
}
