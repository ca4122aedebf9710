//! model, input, enum, union, and interface synthesis

use super::{
    Artifact, ArtifactPath, Contract, Definition, EnumValue, Enumeration, Input, Member,
    Membership, Model, Polymorphic, PolymorphicVariant, SynthContext,
};
use crate::classmap::{Category, GeneratedType};
use crate::convert::{convert_fields, FieldDescriptor};
use crate::error::Result;
use crate::introspection::{ObjectDef, Schema};
use crate::naming;
use std::collections::HashSet;
use tracing::{debug, warn};

/// accessor names the generated model already uses
const MODEL_RESERVED: &[&str] = &["from_raw"];

/// one artifact per union; records each possible type's membership
pub fn unions(ctx: &mut SynthContext<'_>, schema: &Schema) -> Result<()> {
    for union in &schema.unions {
        let ty = ctx.class_map().require(&union.name)?.clone();
        let variants = variants(ctx, union);
        for variant in &variants {
            ctx.implements_mut().record(
                &variant.typename,
                Membership {
                    owner: ty.clone(),
                    contract: None,
                },
            );
        }

        debug!(union = %union.name, variants = variants.len(), "union");
        push_polymorphic(ctx, union, ty, variants, None);
    }
    Ok(())
}

/// one artifact per interface, with its capability contract
pub fn interfaces(ctx: &mut SynthContext<'_>, schema: &Schema) -> Result<()> {
    for interface in &schema.interfaces {
        let ty = ctx.class_map().require(&interface.name)?.clone();
        let variants = variants(ctx, interface);

        let own = convert_fields(interface.fields())?;
        let mut implementors = Vec::new();
        for variant in &variants {
            if let Some(object) = schema.object(&variant.typename) {
                implementors.push(convert_fields(object.fields())?);
            }
        }
        let shared: Vec<FieldDescriptor> = own
            .into_iter()
            .filter(|field| {
                let keep = implementors.iter().all(|fields| {
                    fields
                        .iter()
                        .any(|other| other.name == field.name && other.same_shape(field))
                });
                if !keep {
                    debug!(
                        interface = %interface.name,
                        field = %field.name,
                        "field shape differs between implementors, left out of the contract"
                    );
                }
                keep
            })
            .collect();

        let contract = Contract {
            ident: format!("{}Fields", ty.ident),
            path: format!("{}::{}Fields", ty.module_path(), ty.ident),
            members: ctx.members(&shared, MODEL_RESERVED)?,
        };
        for variant in &variants {
            ctx.implements_mut().record(
                &variant.typename,
                Membership {
                    owner: ty.clone(),
                    contract: Some(contract.clone()),
                },
            );
        }

        debug!(interface = %interface.name, variants = variants.len(), "interface");
        push_polymorphic(ctx, interface, ty, variants, Some(contract));
    }
    Ok(())
}

/// one artifact per object type
pub fn models(ctx: &mut SynthContext<'_>, schema: &Schema) -> Result<()> {
    for object in &schema.objects {
        let ty = ctx.class_map().require(&object.name)?.clone();
        let members = ctx.members(&convert_fields(object.fields())?, MODEL_RESERVED)?;
        let memberships = ctx.implements().memberships(&object.name).to_vec();

        debug!(model = %object.name, fields = members.len(), "model");
        ctx.push(Artifact {
            path: object_path(Category::Model, &object.name),
            definition: Definition::Model(Model {
                name: object.name.clone(),
                ty,
                description: object.description.clone(),
                members,
                memberships,
            }),
        });
    }
    Ok(())
}

/// one artifact per enum type
pub fn enums(ctx: &mut SynthContext<'_>, schema: &Schema) -> Result<()> {
    for enum_def in &schema.enums {
        let ty = ctx.class_map().require(&enum_def.name)?.clone();
        let mut seen = HashSet::new();
        let values = enum_def
            .values()
            .iter()
            .map(|value| EnumValue {
                value: value.name.clone(),
                ident: unique_variant(&mut seen, naming::variant_ident(&value.name)),
                description: value.description.clone(),
            })
            .collect::<Vec<_>>();

        debug!(enum_type = %enum_def.name, values = values.len(), "enum");
        ctx.push(Artifact {
            path: object_path(Category::Enum, &enum_def.name),
            definition: Definition::Enum(Enumeration {
                name: enum_def.name.clone(),
                ty,
                description: enum_def.description.clone(),
                values,
            }),
        });
    }
    Ok(())
}

/// one artifact per input object type
pub fn inputs(ctx: &mut SynthContext<'_>, schema: &Schema) -> Result<()> {
    for input in &schema.inputs {
        let ty = ctx.class_map().require(&input.name)?.clone();
        let members = ctx.members(&convert_fields(input.input_fields())?, &[])?;

        debug!(input = %input.name, fields = members.len(), "input");
        ctx.push(Artifact {
            path: object_path(Category::Input, &input.name),
            definition: Definition::Input(Input {
                name: input.name.clone(),
                ty,
                description: input.description.clone(),
                members,
            }),
        });
    }
    Ok(())
}

fn object_path(category: Category, name: &str) -> ArtifactPath {
    ArtifactPath::Object {
        category,
        name: name.to_string(),
    }
}

/// possible types that are generated models
fn variants(ctx: &SynthContext<'_>, owner: &ObjectDef) -> Vec<PolymorphicVariant> {
    owner
        .possible_types()
        .iter()
        .filter_map(|possible| match ctx.class_map().get(&possible.name) {
            Some(ty) if ty.category == Category::Model => Some(PolymorphicVariant {
                typename: possible.name.clone(),
                ty: ty.clone(),
            }),
            _ => {
                warn!(
                    owner = %owner.name,
                    possible_type = %possible.name,
                    "possible type is not a generated object, skipped"
                );
                None
            }
        })
        .collect()
}

fn push_polymorphic(
    ctx: &mut SynthContext<'_>,
    owner: &ObjectDef,
    ty: GeneratedType,
    variants: Vec<PolymorphicVariant>,
    contract: Option<Contract>,
) {
    ctx.push(Artifact {
        path: object_path(ty.category, &owner.name),
        definition: Definition::Polymorphic(Polymorphic {
            name: owner.name.clone(),
            ty,
            description: owner.description.clone(),
            variants,
            contract,
        }),
    });
}

fn unique_variant(seen: &mut HashSet<String>, ident: String) -> String {
    if seen.insert(ident.clone()) {
        return ident;
    }
    let mut counter = 2;
    loop {
        let candidate = format!("{ident}{counter}");
        if seen.insert(candidate.clone()) {
            return candidate;
        }
        counter += 1;
    }
}

/// contract members the model implements, matched by schema name
pub(crate) fn contract_member<'m>(model: &'m Model, member: &Member) -> Option<&'m Member> {
    model.members.iter().find(|own| own.name == member.name)
}
