//! code synthesis
//!
//! turns a [`Schema`] snapshot into target-neutral [`Artifact`]s. every
//! reference to a generated type is resolved through the [`ClassMap`] here,
//! so emitters only format what they are given.
//!
//! generation order is fixed: client, unions, interfaces, models, enums,
//! inputs. unions and interfaces fill the [`InterfaceImplementsIndex`] that
//! model synthesis reads.

pub mod class;
pub mod client;

pub use client::{ApiClientDef, Argument, Method, Passing};

use crate::classmap::{Category, ClassMap, GeneratedType};
use crate::config::GeneratorConfig;
use crate::convert::{FieldDescriptor, LanguageType, ScalarType};
use crate::emit::{Emitter, RustEmitter, SourceTree};
use crate::error::{Error, Result};
use crate::introspection::{Introspector, Schema, TypeKind};
use crate::naming;
use crate::transport::Transport;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use tracing::info;

/// value representation with generated types resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Scalar(ScalarType),
    Enum(GeneratedType),
    /// generated model
    Object(GeneratedType),
    /// generated input
    Input(GeneratedType),
    /// generated union or interface
    Variant(GeneratedType),
    List {
        element: Box<TypeExpr>,
        /// entries may be `null`
        nullable_elements: bool,
    },
}

/// how a response value becomes a typed value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Materialization {
    PassThrough,
    ParseDateTime,
    ValidateEnum,
    /// nested type's factory
    Factory,
    /// `__typename` dispatch
    Dispatch,
}

impl TypeExpr {
    pub fn is_list(&self) -> bool {
        matches!(self, TypeExpr::List { .. })
    }

    /// a list whose entries are never `null`
    pub fn list(element: TypeExpr) -> Self {
        TypeExpr::List {
            element: Box::new(element),
            nullable_elements: false,
        }
    }

    /// the element type for lists, `self` otherwise
    pub fn element(&self) -> &TypeExpr {
        match self {
            TypeExpr::List { element, .. } => element.element(),
            other => other,
        }
    }

    /// materialization of a single element; inputs are never materialized
    pub fn materialization(&self) -> Materialization {
        match self.element() {
            TypeExpr::Scalar(ScalarType::DateTime) => Materialization::ParseDateTime,
            TypeExpr::Scalar(_) | TypeExpr::Input(_) => Materialization::PassThrough,
            TypeExpr::Enum(_) => Materialization::ValidateEnum,
            TypeExpr::Object(_) => Materialization::Factory,
            TypeExpr::Variant(_) => Materialization::Dispatch,
            TypeExpr::List { element, .. } => element.materialization(),
        }
    }
}

/// a field of a model, input, or interface contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// schema name, used as the response and variable key
    pub name: String,
    pub ident: String,
    pub ty: TypeExpr,
    pub nullable: bool,
    pub doc_type: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    pub name: String,
    pub ty: GeneratedType,
    pub description: Option<String>,
    pub members: Vec<Member>,
    /// unions and interfaces this object belongs to
    pub memberships: Vec<Membership>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub name: String,
    pub ty: GeneratedType,
    pub description: Option<String>,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    /// declared literal
    pub value: String,
    pub ident: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumeration {
    pub name: String,
    pub ty: GeneratedType,
    pub description: Option<String>,
    pub values: Vec<EnumValue>,
}

/// one concrete type of a union or interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolymorphicVariant {
    /// `__typename` discriminator
    pub typename: String,
    pub ty: GeneratedType,
}

/// getters every implementor of an interface shares
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contract {
    pub ident: String,
    pub path: String,
    pub members: Vec<Member>,
}

/// union or interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polymorphic {
    pub name: String,
    pub ty: GeneratedType,
    pub description: Option<String>,
    pub variants: Vec<PolymorphicVariant>,
    /// interfaces only
    pub contract: Option<Contract>,
}

/// an object's place in a union or interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub owner: GeneratedType,
    pub contract: Option<Contract>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definition {
    Model(Model),
    Input(Input),
    Enum(Enumeration),
    Polymorphic(Polymorphic),
    Client(ApiClientDef),
}

/// where an artifact belongs, e.g. `Object/Model/User`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ArtifactPath {
    Object { category: Category, name: String },
    ApiClient,
}

impl fmt::Display for ArtifactPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactPath::Object { category, name } => write!(f, "Object/{category}/{name}"),
            ArtifactPath::ApiClient => f.write_str("ApiClient"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: ArtifactPath,
    pub definition: Definition,
}

/// object name to the unions and interfaces listing it in `possibleTypes`
#[derive(Debug, Clone, Default)]
pub struct InterfaceImplementsIndex {
    entries: BTreeMap<String, Vec<Membership>>,
}

impl InterfaceImplementsIndex {
    pub fn record(&mut self, object: &str, membership: Membership) {
        self.entries
            .entry(object.to_string())
            .or_default()
            .push(membership);
    }

    pub fn memberships(&self, object: &str) -> &[Membership] {
        self.entries
            .get(object)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// per-run synthesis state
pub struct SynthContext<'a> {
    config: &'a GeneratorConfig,
    class_map: ClassMap,
    implements: InterfaceImplementsIndex,
    artifacts: Vec<Artifact>,
}

impl<'a> SynthContext<'a> {
    pub fn new(config: &'a GeneratorConfig, schema: &Schema) -> Self {
        Self {
            config,
            class_map: ClassMap::build(config.namespace(), schema),
            implements: InterfaceImplementsIndex::default(),
            artifacts: Vec::new(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        self.config
    }

    pub fn class_map(&self) -> &ClassMap {
        &self.class_map
    }

    pub fn implements(&self) -> &InterfaceImplementsIndex {
        &self.implements
    }

    pub fn implements_mut(&mut self) -> &mut InterfaceImplementsIndex {
        &mut self.implements
    }

    pub fn push(&mut self, artifact: Artifact) {
        self.artifacts.push(artifact);
    }

    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    pub fn into_artifacts(self) -> Vec<Artifact> {
        self.artifacts
    }

    /// resolve a language type through the class map
    pub fn type_expr(&self, language_type: &LanguageType) -> Result<TypeExpr> {
        match language_type {
            LanguageType::Scalar(scalar) => Ok(TypeExpr::Scalar(*scalar)),
            LanguageType::Enum(name) => Ok(TypeExpr::Enum(self.class_map.require(name)?.clone())),
            LanguageType::Composite { kind, name } => {
                let ty = self.class_map.require(name)?.clone();
                match kind {
                    TypeKind::Object => Ok(TypeExpr::Object(ty)),
                    TypeKind::InputObject => Ok(TypeExpr::Input(ty)),
                    TypeKind::Interface | TypeKind::Union => Ok(TypeExpr::Variant(ty)),
                    other => Err(Error::Schema(format!(
                        "`{name}` cannot be a composite of kind {}",
                        other.as_str()
                    ))),
                }
            }
            LanguageType::Collection {
                element,
                nullable_elements,
            } => Ok(TypeExpr::List {
                element: Box::new(self.type_expr(element)?),
                nullable_elements: *nullable_elements,
            }),
        }
    }

    pub fn member(&self, descriptor: &FieldDescriptor) -> Result<Member> {
        Ok(Member {
            name: descriptor.name.clone(),
            ident: naming::field_ident(&descriptor.name),
            ty: self.type_expr(&descriptor.language_type)?,
            nullable: descriptor.nullable,
            doc_type: descriptor.doc_type.clone(),
            description: descriptor.description.clone(),
        })
    }

    /// members with identifiers made unique against `taken`
    pub fn members(&self, descriptors: &[FieldDescriptor], taken: &[&str]) -> Result<Vec<Member>> {
        let mut seen: HashSet<String> = taken.iter().map(|name| name.to_string()).collect();
        descriptors
            .iter()
            .map(|descriptor| {
                let mut member = self.member(descriptor)?;
                member.ident = unique_ident(&mut seen, member.ident);
                Ok(member)
            })
            .collect()
    }
}

/// `ident`, or `ident_2`, `ident_3`, ... when already taken
pub(crate) fn unique_ident(seen: &mut HashSet<String>, ident: String) -> String {
    if seen.insert(ident.clone()) {
        return ident;
    }
    let stem = ident.strip_prefix("r#").unwrap_or(&ident).to_string();
    let mut counter = 2;
    loop {
        let candidate = format!("{stem}_{counter}");
        if seen.insert(candidate.clone()) {
            return candidate;
        }
        counter += 1;
    }
}

/// synthesize every artifact of a schema
pub fn generate(config: &GeneratorConfig, schema: &Schema) -> Result<Vec<Artifact>> {
    config.validate()?;
    let mut ctx = SynthContext::new(config, schema);

    client::synthesize(&mut ctx, schema)?;
    class::unions(&mut ctx, schema)?;
    class::interfaces(&mut ctx, schema)?;
    class::models(&mut ctx, schema)?;
    class::enums(&mut ctx, schema)?;
    class::inputs(&mut ctx, schema)?;

    info!(
        artifacts = ctx.artifacts().len(),
        types = ctx.class_map().len(),
        "synthesis complete"
    );
    Ok(ctx.into_artifacts())
}

/// synthesize and render a schema into rust sources
pub fn generate_sources(config: &GeneratorConfig, schema: &Schema) -> Result<SourceTree> {
    let artifacts = generate(config, schema)?;
    let mut emitter = RustEmitter::new(config.clone());
    for artifact in &artifacts {
        emitter.emit(artifact)?;
    }
    emitter.finish()
}

/// introspect a live service and render its client
///
/// nothing is produced unless every introspection query succeeds.
pub fn run<T: Transport + ?Sized>(transport: &T, config: &GeneratorConfig) -> Result<SourceTree> {
    config.validate()?;
    let schema = Introspector::new(transport).schema()?;
    generate_sources(config, &schema)
}
