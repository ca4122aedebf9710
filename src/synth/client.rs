//! request method synthesis
//!
//! one method per root query field, then per root mutation field. arguments
//! are always bound as graphql variables, never interpolated into the text.

use super::{unique_ident, Artifact, ArtifactPath, Definition, SynthContext, TypeExpr};
use crate::convert::{convert_field, convert_fields, FieldDescriptor};
use crate::error::Result;
use crate::introspection::{FieldDef, OperationKind, Schema};
use crate::naming;
use heck::ToPascalCase;
use std::collections::HashSet;
use tracing::debug;

/// name of the generated request-dispatch type
pub const CLIENT_IDENT: &str = "ApiClient";

/// method and parameter names the generated client already uses
const CLIENT_RESERVED: &[&str] = &["new", "base"];
const PARAMETER_RESERVED: &[&str] = &["fields", "variables", "operation", "value"];

/// how a caller passes an argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Passing {
    /// non-null argument
    Required,
    /// nullable argument, absent by default
    Optional,
    /// nullable list argument, empty by default
    DefaultEmpty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    pub ident: String,
    pub ty: TypeExpr,
    pub passing: Passing,
    /// graphql variable type, e.g. `[ID]!`
    pub variable_type: String,
    pub default_value: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub kind: OperationKind,
    /// root field name, also the response key
    pub field: String,
    pub ident: String,
    pub description: Option<String>,
    pub arguments: Vec<Argument>,
    pub returns: TypeExpr,
    pub nullable: bool,
    pub doc_type: String,
    /// `query User($id: ID!)`
    pub header: String,
    /// `user(id: $id)`
    pub field_call: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClientDef {
    pub ident: String,
    pub methods: Vec<Method>,
}

/// the single `ApiClient` artifact
pub fn synthesize(ctx: &mut SynthContext<'_>, schema: &Schema) -> Result<()> {
    let mut seen: HashSet<String> = CLIENT_RESERVED
        .iter()
        .map(|name| name.to_string())
        .collect();
    let mut methods = Vec::new();

    for kind in [OperationKind::Query, OperationKind::Mutation] {
        let Some(root) = schema.root(kind) else {
            continue;
        };
        for field in root.fields() {
            let method = method(ctx, kind, field, &mut seen)?;
            debug!(
                operation = kind.keyword(),
                field = %method.field,
                method = %method.ident,
                "request method"
            );
            methods.push(method);
        }
    }

    ctx.push(Artifact {
        path: ArtifactPath::ApiClient,
        definition: Definition::Client(ApiClientDef {
            ident: CLIENT_IDENT.to_string(),
            methods,
        }),
    });
    Ok(())
}

fn method(
    ctx: &SynthContext<'_>,
    kind: OperationKind,
    field: &FieldDef,
    seen: &mut HashSet<String>,
) -> Result<Method> {
    let descriptor = convert_field(field)?;
    let returns = ctx.type_expr(&descriptor.language_type)?;
    let arguments = arguments(ctx, &convert_fields(&field.args)?)?;

    let ident = method_ident(kind, &field.name, seen);
    let (header, field_call) = operation_parts(kind, &field.name, &arguments);

    Ok(Method {
        kind,
        field: field.name.clone(),
        ident,
        description: field.description.clone(),
        arguments,
        returns,
        nullable: descriptor.nullable,
        doc_type: descriptor.doc_type,
        header,
        field_call,
    })
}

/// snake-cased field name; a mutation clashing with a query gets `_mutation`
fn method_ident(kind: OperationKind, field: &str, seen: &mut HashSet<String>) -> String {
    let ident = naming::field_ident(field);
    if kind == OperationKind::Mutation && seen.contains(&ident) {
        let stem = ident.strip_prefix("r#").unwrap_or(&ident);
        return unique_ident(seen, format!("{stem}_mutation"));
    }
    unique_ident(seen, ident)
}

fn arguments(ctx: &SynthContext<'_>, descriptors: &[FieldDescriptor]) -> Result<Vec<Argument>> {
    let mut seen: HashSet<String> = PARAMETER_RESERVED
        .iter()
        .map(|name| name.to_string())
        .collect();
    descriptors
        .iter()
        .map(|descriptor| {
            let ty = ctx.type_expr(&descriptor.language_type)?;
            let passing = match (descriptor.nullable, ty.is_list()) {
                (false, _) => Passing::Required,
                (true, true) => Passing::DefaultEmpty,
                (true, false) => Passing::Optional,
            };
            Ok(Argument {
                name: descriptor.name.clone(),
                ident: unique_ident(&mut seen, naming::field_ident(&descriptor.name)),
                ty,
                passing,
                variable_type: descriptor.variable_type(),
                default_value: descriptor.default_value.clone(),
                description: descriptor.description.clone(),
            })
        })
        .collect()
}

/// operation header with variable declarations, and the root field call
fn operation_parts(kind: OperationKind, field: &str, arguments: &[Argument]) -> (String, String) {
    let mut header = format!("{} {}", kind.keyword(), field.to_pascal_case());
    let mut field_call = field.to_string();
    if !arguments.is_empty() {
        let declarations = arguments
            .iter()
            .map(|arg| format!("${}: {}", arg.name, arg.variable_type))
            .collect::<Vec<_>>()
            .join(", ");
        let bindings = arguments
            .iter()
            .map(|arg| format!("{}: ${}", arg.name, arg.name))
            .collect::<Vec<_>>()
            .join(", ");
        header.push_str(&format!("({declarations})"));
        field_call.push_str(&format!("({bindings})"));
    }
    (header, field_call)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::convert::ScalarType;
    use crate::introspection::{
        EnumDef, InputObjectDef, InputValueDef, ObjectDef, RootOperation, TypeKind, TypeRef,
    };

    fn arg(name: &str, ty: TypeRef) -> InputValueDef {
        InputValueDef {
            name: name.to_string(),
            description: None,
            ty,
            default_value: None,
        }
    }

    fn root_field(name: &str, ty: TypeRef, args: Vec<InputValueDef>) -> FieldDef {
        FieldDef {
            name: name.to_string(),
            description: None,
            ty,
            args,
        }
    }

    fn schema() -> Schema {
        let user = TypeRef::named(TypeKind::Object, "User");
        let id = TypeRef::named(TypeKind::Scalar, "ID");
        Schema {
            objects: vec![ObjectDef {
                name: "User".to_string(),
                kind: TypeKind::Object,
                description: None,
                fields: Some(vec![]),
                possible_types: None,
            }],
            inputs: vec![InputObjectDef {
                name: "UserFilter".to_string(),
                kind: TypeKind::InputObject,
                description: None,
                input_fields: Some(vec![]),
            }],
            enums: vec![EnumDef {
                name: "Role".to_string(),
                kind: TypeKind::Enum,
                description: None,
                enum_values: Some(vec![]),
            }],
            query: Some(RootOperation {
                name: "Query".to_string(),
                description: None,
                fields: Some(vec![
                    root_field(
                        "user",
                        user.clone(),
                        vec![
                            arg("id", TypeRef::non_null(id.clone())),
                            arg("role", TypeRef::named(TypeKind::Enum, "Role")),
                        ],
                    ),
                    root_field(
                        "users",
                        TypeRef::non_null(TypeRef::list(TypeRef::non_null(user.clone()))),
                        vec![
                            arg("ids", TypeRef::list(TypeRef::non_null(id))),
                            arg(
                                "filter",
                                TypeRef::named(TypeKind::InputObject, "UserFilter"),
                            ),
                            arg("fields", TypeRef::named(TypeKind::Scalar, "String")),
                        ],
                    ),
                    root_field(
                        "version",
                        TypeRef::named(TypeKind::Scalar, "String"),
                        vec![],
                    ),
                ]),
            }),
            mutation: Some(RootOperation {
                name: "Mutation".to_string(),
                description: None,
                fields: Some(vec![
                    root_field("user", user.clone(), vec![]),
                    root_field("createUser", user, vec![]),
                ]),
            }),
            ..Schema::default()
        }
    }

    fn client() -> ApiClientDef {
        let config = GeneratorConfig::new();
        let schema = schema();
        let mut ctx = SynthContext::new(&config, &schema);
        synthesize(&mut ctx, &schema).unwrap();
        match ctx.into_artifacts().pop().map(|artifact| artifact.definition) {
            Some(Definition::Client(client)) => client,
            other => panic!("unexpected artifact: {other:?}"),
        }
    }

    #[test]
    fn test_method_per_root_field() {
        let client = client();
        let idents: Vec<&str> = client.methods.iter().map(|m| m.ident.as_str()).collect();
        assert_eq!(
            idents,
            vec!["user", "users", "version", "user_mutation", "create_user"]
        );
        assert_eq!(client.methods[3].kind, OperationKind::Mutation);
    }

    #[test]
    fn test_argument_passing() {
        let client = client();
        let user = &client.methods[0];
        assert_eq!(user.arguments[0].passing, Passing::Required);
        assert_eq!(user.arguments[1].passing, Passing::Optional);

        let users = &client.methods[1];
        assert_eq!(users.arguments[0].passing, Passing::DefaultEmpty);
        assert_eq!(users.arguments[0].variable_type, "[ID]");
        assert!(matches!(users.arguments[1].ty, TypeExpr::Input(_)));
        assert_eq!(users.arguments[2].ident, "fields_2");
        assert_eq!(users.arguments[2].name, "fields");
    }

    #[test]
    fn test_operation_parts() {
        let client = client();
        let user = &client.methods[0];
        assert_eq!(user.header, "query User($id: ID!, $role: Role)");
        assert_eq!(user.field_call, "user(id: $id, role: $role)");

        let version = &client.methods[2];
        assert_eq!(version.header, "query Version");
        assert_eq!(version.field_call, "version");
        assert_eq!(version.returns, TypeExpr::Scalar(ScalarType::String));
        assert!(version.nullable);

        let create = &client.methods[4];
        assert_eq!(create.header, "mutation CreateUser");
    }

    #[test]
    fn test_return_types() {
        let client = client();
        let users = &client.methods[1];
        assert!(!users.nullable);
        assert!(users.returns.is_list());
        assert_eq!(users.doc_type, "User[]");
    }

    #[test]
    fn test_no_roots_still_emits_client() {
        let config = GeneratorConfig::new();
        let schema = Schema::default();
        let mut ctx = SynthContext::new(&config, &schema);
        synthesize(&mut ctx, &schema).unwrap();
        assert_eq!(ctx.artifacts().len(), 1);
        assert_eq!(ctx.artifacts()[0].path, ArtifactPath::ApiClient);
    }
}
