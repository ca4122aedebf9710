//! rust source rendering
//!
//! every generated file imports the runtime prelude and refers to other
//! generated types by their fully-qualified class map path.

use super::{Emitter, SourceTree};
use crate::classmap::{Category, GeneratedType};
use crate::config::GeneratorConfig;
use crate::convert::ScalarType;
use crate::error::{Error, Result};
use crate::synth::class::contract_member;
use crate::synth::{
    ApiClientDef, Argument, Artifact, Contract, Definition, Enumeration, Input, Materialization,
    Member, Method, Model, Passing, Polymorphic, PolymorphicVariant, TypeExpr,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// generated methods with more parameters than this get a clippy allow
const MAX_PARAMETERS: usize = 7;

/// renders artifacts into a rust crate (or module) layout
#[derive(Debug)]
pub struct RustEmitter {
    config: GeneratorConfig,
    tree: SourceTree,
    /// category -> module -> re-exported identifiers
    modules: BTreeMap<Category, BTreeMap<String, Vec<String>>>,
    client: bool,
}

impl RustEmitter {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            tree: SourceTree::new(),
            modules: BTreeMap::new(),
            client: false,
        }
    }

    /// `src/<relative>` for a crate root, `<relative>` for a nested module
    fn source_path(&self, relative: &str) -> PathBuf {
        if self.config.namespace() == "crate" {
            Path::new("src").join(relative)
        } else {
            PathBuf::from(relative)
        }
    }

    fn header(&self, title: &str) -> String {
        let mut out = String::new();
        out.push_str(&format!("//! {title}, do not edit\n\n"));
        out.push_str(&format!(
            "use {}::runtime::prelude::*;\n\n",
            self.config.runtime_path()
        ));
        out
    }

    fn add_object(&mut self, ty: &GeneratedType, exports: Vec<String>, contents: String) {
        let relative = format!("object/{}/{}.rs", ty.category.module(), ty.module);
        let path = self.source_path(&relative);
        debug!(path = %path.display(), "rendered");
        self.tree.insert(path, contents);
        self.modules
            .entry(ty.category)
            .or_default()
            .insert(ty.module.clone(), exports);
    }

    fn render_model(&self, model: &Model) -> Result<String> {
        let ident = &model.ty.ident;
        let mut out = self.header(&format!("generated from the `{}` object", model.name));

        push_doc(
            &mut out,
            "",
            model.description.as_deref(),
            &format!("`{}` object", model.name),
        );
        out.push_str("#[derive(Debug, Clone, PartialEq)]\n");
        out.push_str(&format!("pub struct {ident} {{\n"));
        for member in &model.members {
            out.push_str(&format!(
                "    {}: Selected<{}>,\n",
                member.ident,
                stored_type(&member.ty)
            ));
        }
        out.push_str("}\n\n");

        out.push_str(&format!("impl {ident} {{\n"));
        out.push_str("    /// materialize from a response object; unselected fields stay unset\n");
        out.push_str("    pub fn from_raw(value: &Value) -> Result<Self> {\n");
        if model.members.is_empty() {
            out.push_str(&format!(
                "        RawObject::new(value, {:?})?;\n",
                model.name
            ));
            out.push_str("        Ok(Self {})\n");
        } else {
            out.push_str(&format!(
                "        let raw = RawObject::new(value, {:?})?;\n",
                model.name
            ));
            out.push_str("        Ok(Self {\n");
            for member in &model.members {
                out.push_str(&format!(
                    "            {}: raw.field({:?}, {})?,\n",
                    member.ident,
                    member.name,
                    field_decoder(&member.ty)?
                ));
            }
            out.push_str("        })\n");
        }
        out.push_str("    }\n");

        for member in &model.members {
            out.push('\n');
            push_doc(&mut out, "    ", member.description.as_deref(), "");
            out.push_str(&format!(
                "    pub fn {}(&self) -> {} {{\n",
                member.ident,
                getter_type(&member.ty, member.nullable)
            ));
            out.push_str(&format!("        {}\n", getter_body(member)));
            out.push_str("    }\n");
        }
        out.push_str("}\n");

        for membership in &model.memberships {
            if let Some(contract) = &membership.contract {
                out.push('\n');
                out.push_str(&format!("impl {} for {ident} {{\n", contract.path));
                for (index, member) in contract.members.iter().enumerate() {
                    let own = contract_member(model, member).ok_or_else(|| {
                        Error::Schema(format!(
                            "`{}` lacks the `{}` field of `{}`",
                            model.name, member.name, contract.ident
                        ))
                    })?;
                    if index > 0 {
                        out.push('\n');
                    }
                    out.push_str(&format!(
                        "    fn {}(&self) -> {} {{\n",
                        member.ident,
                        getter_type(&member.ty, member.nullable)
                    ));
                    out.push_str(&format!("        {ident}::{}(self)\n", own.ident));
                    out.push_str("    }\n");
                }
                out.push_str("}\n");
            }

            out.push('\n');
            out.push_str(&format!(
                "impl From<{ident}> for {} {{\n",
                membership.owner.path
            ));
            out.push_str(&format!("    fn from(value: {ident}) -> Self {{\n"));
            out.push_str(&format!("        Self::{ident}(value)\n"));
            out.push_str("    }\n");
            out.push_str("}\n");
        }

        Ok(out)
    }

    fn render_polymorphic(&self, def: &Polymorphic) -> String {
        let ident = &def.ty.ident;
        let kind = if def.contract.is_some() { "interface" } else { "union" };
        let mut out = self.header(&format!("generated from the `{}` {kind}", def.name));

        push_doc(
            &mut out,
            "",
            def.description.as_deref(),
            &format!("`{}` {kind}", def.name),
        );
        out.push_str("#[derive(Debug, Clone, PartialEq)]\n");
        out.push_str(&format!("pub enum {ident} {{\n"));
        for variant in &def.variants {
            out.push_str(&format!("    {}({}),\n", variant.ty.ident, variant.ty.path));
        }
        out.push_str("}\n\n");

        for variant in &def.variants {
            out.push_str(&format!(
                "fn decode_{}(value: &Value) -> Result<{ident}> {{\n",
                variant.ty.module
            ));
            out.push_str(&format!(
                "    {}::from_raw(value).map({ident}::{})\n",
                variant.ty.path, variant.ty.ident
            ));
            out.push_str("}\n\n");
        }

        out.push_str(&format!("impl Polymorphic for {ident} {{\n"));
        out.push_str(&format!("    const NAME: &'static str = {:?};\n", def.name));
        if def.variants.is_empty() {
            out.push_str("    const REGISTRY: &'static [Variant<Self>] = &[];\n\n");
        } else {
            out.push_str("    const REGISTRY: &'static [Variant<Self>] = &[\n");
            for variant in &def.variants {
                out.push_str("        Variant {\n");
                out.push_str(&format!("            typename: {:?},\n", variant.typename));
                out.push_str(&format!(
                    "            decode: decode_{},\n",
                    variant.ty.module
                ));
                out.push_str("        },\n");
            }
            out.push_str("    ];\n\n");
        }
        out.push_str("    fn typename(&self) -> &'static str {\n");
        push_match(&mut out, "        ", def, "_", |variant| format!("{:?}", variant.typename));
        out.push_str("    }\n");
        out.push_str("}\n");

        if let Some(contract) = &def.contract {
            out.push('\n');
            out.push_str(&self.render_contract(def, contract));
        }
        out
    }

    fn render_contract(&self, def: &Polymorphic, contract: &Contract) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "/// getters every `{}` implementation shares\n",
            def.name
        ));
        out.push_str(&format!("pub trait {} {{\n", contract.ident));
        for member in &contract.members {
            push_doc(&mut out, "    ", member.description.as_deref(), "");
            out.push_str(&format!(
                "    fn {}(&self) -> {};\n",
                member.ident,
                getter_type(&member.ty, member.nullable)
            ));
        }
        out.push_str("}\n\n");

        out.push_str(&format!(
            "impl {} for {} {{\n",
            contract.ident, def.ty.ident
        ));
        for (index, member) in contract.members.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&format!(
                "    fn {}(&self) -> {} {{\n",
                member.ident,
                getter_type(&member.ty, member.nullable)
            ));
            push_match(&mut out, "        ", def, "inner", |_| {
                format!("{}::{}(inner)", contract.ident, member.ident)
            });
            out.push_str("    }\n");
        }
        out.push_str("}\n");
        out
    }

    fn render_enum(&self, def: &Enumeration) -> String {
        let ident = &def.ty.ident;
        let mut out = self.header(&format!("generated from the `{}` enum", def.name));

        push_doc(
            &mut out,
            "",
            def.description.as_deref(),
            &format!("`{}` enum", def.name),
        );
        out.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]\n");
        out.push_str(&format!("pub enum {ident} {{\n"));
        for value in &def.values {
            push_doc(&mut out, "    ", value.description.as_deref(), "");
            out.push_str(&format!("    {},\n", value.ident));
        }
        out.push_str("}\n\n");

        out.push_str(&format!("impl {ident} {{\n"));
        out.push_str("    /// validated construction from a declared value\n");
        out.push_str("    pub fn new(value: &str) -> Result<Self> {\n");
        out.push_str("        <Self as GraphQlEnum>::try_new(value)\n");
        out.push_str("    }\n");
        out.push_str("}\n\n");

        out.push_str(&format!("impl GraphQlEnum for {ident} {{\n"));
        out.push_str(&format!("    const NAME: &'static str = {:?};\n", def.name));
        let variants = def
            .values
            .iter()
            .map(|value| format!("Self::{}", value.ident))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "    const VARIANTS: &'static [Self] = &[{variants}];\n\n"
        ));
        out.push_str("    fn value(&self) -> &'static str {\n");
        if def.values.is_empty() {
            out.push_str("        match *self {}\n");
        } else {
            out.push_str("        match self {\n");
            for value in &def.values {
                out.push_str(&format!(
                    "            Self::{} => {:?},\n",
                    value.ident, value.value
                ));
            }
            out.push_str("        }\n");
        }
        out.push_str("    }\n");
        out.push_str("}\n\n");

        out.push_str(&format!("impl Lower for {ident} {{\n"));
        out.push_str("    fn lower(&self) -> Value {\n");
        out.push_str("        Value::String(self.value().to_string())\n");
        out.push_str("    }\n");
        out.push_str("}\n\n");

        out.push_str(&format!("impl std::fmt::Display for {ident} {{\n"));
        out.push_str("    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {\n");
        out.push_str("        f.write_str(self.value())\n");
        out.push_str("    }\n");
        out.push_str("}\n");
        out
    }

    fn render_input(&self, def: &Input) -> String {
        let ident = &def.ty.ident;
        let mut out = self.header(&format!("generated from the `{}` input", def.name));

        push_doc(
            &mut out,
            "",
            def.description.as_deref(),
            &format!("`{}` input", def.name),
        );
        out.push_str("#[derive(Debug, Clone, PartialEq)]\n");
        out.push_str(&format!("pub struct {ident} {{\n"));
        for member in &def.members {
            push_doc(&mut out, "    ", member.description.as_deref(), "");
            out.push_str(&format!(
                "    pub {}: {},\n",
                member.ident,
                optional_type(input_stored_type(&member.ty), member.nullable)
            ));
        }
        out.push_str("}\n\n");

        let params = def
            .members
            .iter()
            .map(|member| {
                format!(
                    "{}: {}",
                    member.ident,
                    optional_type(outbound_type(&member.ty), member.nullable)
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("impl {ident} {{\n"));
        if def.members.len() > MAX_PARAMETERS {
            out.push_str("    #[allow(clippy::too_many_arguments)]\n");
        }
        out.push_str(&format!("    pub fn new({params}) -> Self {{\n"));
        out.push_str("        Self {\n");
        for member in &def.members {
            let boxed = matches!(member.ty, TypeExpr::Input(_));
            match (boxed, member.nullable) {
                (false, _) => out.push_str(&format!("            {},\n", member.ident)),
                (true, false) => out.push_str(&format!(
                    "            {0}: Box::new({0}),\n",
                    member.ident
                )),
                (true, true) => out.push_str(&format!(
                    "            {0}: {0}.map(Box::new),\n",
                    member.ident
                )),
            }
        }
        out.push_str("        }\n");
        out.push_str("    }\n");
        out.push_str("}\n\n");

        out.push_str(&format!("impl Lower for {ident} {{\n"));
        out.push_str("    fn lower(&self) -> Value {\n");
        if def.members.is_empty() {
            out.push_str("        Value::Object(Map::new())\n");
        } else {
            out.push_str("        let mut map = Map::new();\n");
            for member in &def.members {
                if member.nullable {
                    out.push_str(&format!(
                        "        if let Some(value) = &self.{} {{\n",
                        member.ident
                    ));
                    out.push_str(&format!(
                        "            map.insert({:?}.to_string(), value.lower());\n",
                        member.name
                    ));
                    out.push_str("        }\n");
                } else {
                    out.push_str(&format!(
                        "        map.insert({:?}.to_string(), self.{}.lower());\n",
                        member.name, member.ident
                    ));
                }
            }
            out.push_str("        Value::Object(map)\n");
        }
        out.push_str("    }\n");
        out.push_str("}\n");
        out
    }

    fn render_client(&self, def: &ApiClientDef) -> Result<String> {
        let ident = &def.ident;
        let mut out = self.header("generated api client");

        out.push_str("/// one request method per root operation field\n");
        out.push_str("#[derive(Debug, Clone)]\n");
        out.push_str(&format!("pub struct {ident}<T> {{\n"));
        out.push_str("    base: BaseApiClient<T>,\n");
        out.push_str("}\n\n");

        out.push_str(&format!("impl<T: Transport> {ident}<T> {{\n"));
        out.push_str("    pub fn new(transport: T) -> Self {\n");
        out.push_str("        Self {\n");
        out.push_str("            base: BaseApiClient::new(transport),\n");
        out.push_str("        }\n");
        out.push_str("    }\n\n");
        out.push_str("    pub fn base(&self) -> &BaseApiClient<T> {\n");
        out.push_str("        &self.base\n");
        out.push_str("    }\n");

        for method in &def.methods {
            out.push('\n');
            out.push_str(&render_method(method)?);
        }
        out.push_str("}\n");
        Ok(out)
    }

    fn render_category_mod(
        &self,
        category: Category,
        modules: &BTreeMap<String, Vec<String>>,
    ) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "//! generated {} types, do not edit\n\n",
            category.module()
        ));
        for module in modules.keys() {
            out.push_str(&format!("pub mod {module};\n"));
        }
        out.push('\n');
        for (module, exports) in modules {
            match exports.as_slice() {
                [single] => out.push_str(&format!("pub use {module}::{single};\n")),
                many => out.push_str(&format!("pub use {module}::{{{}}};\n", many.join(", "))),
            }
        }
        out
    }

    fn render_root(&self) -> String {
        let mut out = String::new();
        out.push_str("//! generated graphql client, do not edit\n\n");
        if self.client {
            out.push_str("pub mod api_client;\n");
        }
        if !self.modules.is_empty() {
            out.push_str("pub mod object;\n");
        }
        if self.client {
            out.push_str("\npub use api_client::ApiClient;\n");
        }
        out
    }

    fn render_manifest(&self, crate_name: &str) -> String {
        let mut cargo = String::new();
        cargo.push_str("[package]\n");
        cargo.push_str(&format!("name = \"{crate_name}\"\n"));
        cargo.push_str("version = \"0.1.0\"\n");
        cargo.push_str("edition = \"2021\"\n\n");
        cargo.push_str("[dependencies]\n");

        let runtime = self.config.runtime_path();
        let runtime = runtime.strip_prefix("::").unwrap_or(runtime);
        let dependency = runtime.split("::").next().unwrap_or(runtime);
        if dependency != "crate" {
            let spec = match self.config.runtime_dependency() {
                Some(spec) => spec.to_string(),
                None => format!("\"{}\"", env!("CARGO_PKG_VERSION")),
            };
            cargo.push_str(&format!("{dependency} = {spec}\n"));
        }
        cargo
    }
}

impl Emitter for RustEmitter {
    type Output = SourceTree;

    fn emit(&mut self, artifact: &Artifact) -> Result<()> {
        match &artifact.definition {
            Definition::Model(model) => {
                let contents = self.render_model(model)?;
                self.add_object(&model.ty, vec![model.ty.ident.clone()], contents);
            }
            Definition::Input(input) => {
                let contents = self.render_input(input);
                self.add_object(&input.ty, vec![input.ty.ident.clone()], contents);
            }
            Definition::Enum(enumeration) => {
                let contents = self.render_enum(enumeration);
                self.add_object(
                    &enumeration.ty,
                    vec![enumeration.ty.ident.clone()],
                    contents,
                );
            }
            Definition::Polymorphic(def) => {
                let contents = self.render_polymorphic(def);
                let mut exports = vec![def.ty.ident.clone()];
                if let Some(contract) = &def.contract {
                    exports.push(contract.ident.clone());
                }
                self.add_object(&def.ty, exports, contents);
            }
            Definition::Client(client) => {
                let contents = self.render_client(client)?;
                let path = self.source_path("api_client.rs");
                self.tree.insert(path, contents);
                self.client = true;
            }
        }
        Ok(())
    }

    fn finish(mut self) -> Result<SourceTree> {
        if !self.modules.is_empty() {
            let mut object_mod = String::from("//! generated schema types, do not edit\n\n");
            for (category, modules) in &self.modules {
                object_mod.push_str(&format!("pub mod {};\n", category.module()));
                let relative = format!("object/{}/mod.rs", category.module());
                let contents = self.render_category_mod(*category, modules);
                let path = self.source_path(&relative);
                self.tree.insert(path, contents);
            }
            let path = self.source_path("object/mod.rs");
            self.tree.insert(path, object_mod);
        }

        let root = if self.config.namespace() == "crate" {
            "lib.rs"
        } else {
            "mod.rs"
        };
        let path = self.source_path(root);
        let contents = self.render_root();
        self.tree.insert(path, contents);

        if let Some(crate_name) = self.config.crate_name() {
            let manifest = self.render_manifest(crate_name);
            self.tree.insert("Cargo.toml", manifest);
        }

        info!(files = self.tree.len(), "rust sources rendered");
        Ok(self.tree)
    }
}

fn render_method(method: &Method) -> Result<String> {
    let mut out = String::new();
    push_doc(&mut out, "    ", method.description.as_deref(), "");
    if method.description.is_some() {
        out.push_str("    ///\n");
    }
    out.push_str(&format!(
        "    /// `{}` returning `{}`\n",
        method.header, method.doc_type
    ));
    push_argument_docs(&mut out, &method.arguments);

    if method.arguments.len() + 2 > MAX_PARAMETERS {
        out.push_str("    #[allow(clippy::too_many_arguments)]\n");
    }
    let mut params = vec!["&self".to_string(), "fields: &Selection".to_string()];
    params.extend(
        method
            .arguments
            .iter()
            .map(|arg| format!("{}: {}", arg.ident, parameter_type(arg))),
    );
    let returns = optional_type(value_type(&method.returns), method.nullable);
    out.push_str(&format!(
        "    pub fn {}({}) -> Result<{returns}> {{\n",
        method.ident,
        params.join(", ")
    ));

    if method.arguments.is_empty() {
        out.push_str("        let variables = Map::new();\n");
    } else {
        out.push_str("        let mut variables = Map::new();\n");
        for arg in &method.arguments {
            out.push_str(&format!(
                "        set_variable(&mut variables, {:?}, &{});\n",
                arg.name, arg.ident
            ));
        }
    }
    out.push_str(&format!(
        "        let operation = operation_text({:?}, {:?}, fields);\n",
        method.header, method.field_call
    ));
    out.push_str(&format!(
        "        let value = self.base.request(&operation, variables, {:?})?;\n",
        method.field
    ));
    let wrapper = if method.nullable { "optional" } else { "required" };
    out.push_str(&format!(
        "        {wrapper}(&value, {})\n",
        root_decoder(&method.returns)?
    ));
    out.push_str("    }\n");
    Ok(out)
}

fn push_argument_docs(out: &mut String, arguments: &[Argument]) {
    let documented: Vec<&Argument> = arguments
        .iter()
        .filter(|arg| arg.description.is_some() || arg.default_value.is_some())
        .collect();
    if documented.is_empty() {
        return;
    }
    out.push_str("    ///\n");
    for arg in documented {
        let mut line = format!("    /// - `{}`", arg.ident);
        if let Some(description) = &arg.description {
            line.push_str(&format!(": {}", first_line(description)));
        }
        if let Some(default) = &arg.default_value {
            line.push_str(&format!(" (server default `{default}`)"));
        }
        out.push_str(&line);
        out.push('\n');
    }
}

fn first_line(text: &str) -> &str {
    text.trim().lines().next().unwrap_or_default()
}

fn push_doc(out: &mut String, indent: &str, text: Option<&str>, fallback: &str) {
    let text = text
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .unwrap_or(fallback);
    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            out.push_str(&format!("{indent}///\n"));
        } else {
            out.push_str(&format!("{indent}/// {line}\n"));
        }
    }
}

/// `match self { Self::A(inner) => <arm>, ... }`, or `match *self {}` without variants
fn push_match(
    out: &mut String,
    indent: &str,
    def: &Polymorphic,
    binding: &str,
    arm: impl Fn(&PolymorphicVariant) -> String,
) {
    if def.variants.is_empty() {
        out.push_str(&format!("{indent}match *self {{}}\n"));
        return;
    }
    out.push_str(&format!("{indent}match self {{\n"));
    for variant in &def.variants {
        out.push_str(&format!(
            "{indent}    Self::{}({binding}) => {},\n",
            variant.ty.ident,
            arm(variant)
        ));
    }
    out.push_str(&format!("{indent}}}\n"));
}

fn scalar_type(scalar: ScalarType) -> &'static str {
    match scalar {
        ScalarType::String => "String",
        ScalarType::Integer => "i64",
        ScalarType::Float => "f64",
        ScalarType::Boolean => "bool",
        ScalarType::DateTime => "DateTime<FixedOffset>",
        ScalarType::GenericObject | ScalarType::Iterable => "Value",
    }
}

/// owned rust type of a response value
fn value_type(ty: &TypeExpr) -> String {
    if ty.is_list() {
        format!("Vec<{}>", entry_type(ty))
    } else {
        outbound_type(ty)
    }
}

/// rust type of one entry of a response list
fn entry_type(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::List {
            element,
            nullable_elements,
        } => optional_type(value_type(element), *nullable_elements),
        other => value_type(other),
    }
}

/// owned rust type of an argument or input field; lists never carry `null`
fn outbound_type(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::Scalar(scalar) => scalar_type(*scalar).to_string(),
        TypeExpr::Enum(generated)
        | TypeExpr::Object(generated)
        | TypeExpr::Input(generated)
        | TypeExpr::Variant(generated) => generated.path.clone(),
        TypeExpr::List { element, .. } => format!("Vec<{}>", outbound_type(element)),
    }
}

fn optional_type(ty: String, nullable: bool) -> String {
    if nullable {
        format!("Option<{ty}>")
    } else {
        ty
    }
}

/// model field storage; singular nested objects are boxed
fn stored_type(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::Object(generated) | TypeExpr::Variant(generated) => {
            format!("Box<{}>", generated.path)
        }
        other => value_type(other),
    }
}

/// input field storage; singular nested inputs are boxed
fn input_stored_type(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::Input(generated) => format!("Box<{}>", generated.path),
        other => outbound_type(other),
    }
}

fn parameter_type(arg: &Argument) -> String {
    match arg.passing {
        Passing::Required | Passing::DefaultEmpty => outbound_type(&arg.ty),
        Passing::Optional => format!("Option<{}>", outbound_type(&arg.ty)),
    }
}

fn target(ty: &TypeExpr) -> Option<&GeneratedType> {
    match ty.element() {
        TypeExpr::Enum(generated)
        | TypeExpr::Object(generated)
        | TypeExpr::Input(generated)
        | TypeExpr::Variant(generated) => Some(generated),
        TypeExpr::Scalar(_) | TypeExpr::List { .. } => None,
    }
}

/// decoder for one element of `ty`
fn element_decoder(ty: &TypeExpr) -> Result<String> {
    if let TypeExpr::Input(input) = ty.element() {
        return Err(Error::Schema(format!(
            "input type `{}` cannot appear in a response",
            input.ident
        )));
    }
    let path = target(ty).map(|generated| generated.path.as_str());
    match (ty.materialization(), path) {
        (Materialization::ParseDateTime, _) => Ok("datetime".to_string()),
        (Materialization::PassThrough, _) => Ok("scalar".to_string()),
        (Materialization::ValidateEnum, Some(path)) => Ok(format!("{path}::decode")),
        (Materialization::Factory, Some(path)) => Ok(format!("{path}::from_raw")),
        (Materialization::Dispatch, Some(path)) => Ok(format!("{path}::dispatch")),
        (materialization, None) => Err(Error::Schema(format!(
            "{materialization:?} needs a generated type"
        ))),
    }
}

fn field_decoder(ty: &TypeExpr) -> Result<String> {
    match ty {
        TypeExpr::Object(_) | TypeExpr::Variant(_) => {
            Ok(format!("|value| {}(value).map(Box::new)", element_decoder(ty)?))
        }
        _ => root_decoder(ty),
    }
}

fn root_decoder(ty: &TypeExpr) -> Result<String> {
    let element = element_decoder(ty)?;
    Ok(match ty {
        TypeExpr::List {
            nullable_elements: true,
            ..
        } => format!("|value| each_nullable(value, {element})"),
        TypeExpr::List { .. } => format!("|value| each(value, {element})"),
        _ => element,
    })
}

/// how a model getter hands out its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Copied,
    Str,
    Borrowed,
    Slice,
    Unboxed,
}

fn access(ty: &TypeExpr) -> Access {
    match ty {
        TypeExpr::List { .. } => Access::Slice,
        TypeExpr::Scalar(ScalarType::String) => Access::Str,
        TypeExpr::Scalar(ScalarType::GenericObject | ScalarType::Iterable) => Access::Borrowed,
        TypeExpr::Scalar(_) | TypeExpr::Enum(_) => Access::Copied,
        TypeExpr::Object(_) | TypeExpr::Variant(_) => Access::Unboxed,
        TypeExpr::Input(_) => Access::Borrowed,
    }
}

fn getter_type(ty: &TypeExpr, nullable: bool) -> String {
    let inner = match access(ty) {
        Access::Copied => value_type(ty),
        Access::Str => "&str".to_string(),
        Access::Slice => format!("&[{}]", entry_type(ty)),
        Access::Borrowed | Access::Unboxed => format!("&{}", value_type(ty)),
    };
    format!("Result<{}>", optional_type(inner, nullable))
}

fn getter_body(member: &Member) -> String {
    let field = format!("self.{}", member.ident);
    let name = format!("{:?}", member.name);
    match (access(&member.ty), member.nullable) {
        (Access::Copied, false) => format!("{field}.require({name}).copied()"),
        (Access::Copied, true) => format!("{field}.get({name}).map(|value| value.copied())"),
        (Access::Str, false) => format!("{field}.require({name}).map(String::as_str)"),
        (Access::Str, true) => {
            format!("{field}.get({name}).map(|value| value.map(String::as_str))")
        }
        (Access::Borrowed, false) => format!("{field}.require({name})"),
        (Access::Borrowed, true) => format!("{field}.get({name})"),
        (Access::Slice, false) => format!("{field}.require({name}).map(Vec::as_slice)"),
        (Access::Slice, true) => {
            format!("{field}.get({name}).map(|value| value.map(Vec::as_slice))")
        }
        (Access::Unboxed, false) => format!("{field}.require({name}).map(|value| &**value)"),
        (Access::Unboxed, true) => {
            format!("{field}.get({name}).map(|value| value.map(|inner| &**inner))")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated(category: Category, ident: &str, module: &str) -> GeneratedType {
        GeneratedType {
            category,
            ident: ident.to_string(),
            module: module.to_string(),
            path: format!("crate::object::{}::{module}::{ident}", category.module()),
        }
    }

    fn member(name: &str, ty: TypeExpr, nullable: bool) -> Member {
        Member {
            name: name.to_string(),
            ident: crate::naming::field_ident(name),
            ty,
            nullable,
            doc_type: String::new(),
            description: None,
        }
    }

    #[test]
    fn test_getter_shapes() {
        let user = TypeExpr::Object(generated(Category::Model, "User", "user"));
        assert_eq!(
            getter_type(&TypeExpr::Scalar(ScalarType::String), false),
            "Result<&str>"
        );
        assert_eq!(
            getter_type(&TypeExpr::Scalar(ScalarType::Integer), true),
            "Result<Option<i64>>"
        );
        assert_eq!(
            getter_type(&TypeExpr::list(user.clone()), false),
            "Result<&[crate::object::model::user::User]>"
        );
        let friends = TypeExpr::List {
            element: Box::new(user.clone()),
            nullable_elements: true,
        };
        assert_eq!(
            getter_type(&friends, true),
            "Result<Option<&[Option<crate::object::model::user::User>]>>"
        );
        assert_eq!(
            stored_type(&friends),
            "Vec<Option<crate::object::model::user::User>>"
        );
        assert_eq!(
            getter_type(&user, true),
            "Result<Option<&crate::object::model::user::User>>"
        );
        assert_eq!(
            getter_body(&member("bestFriend", user, true)),
            "self.best_friend.get(\"bestFriend\").map(|value| value.map(|inner| &**inner))"
        );
    }

    #[test]
    fn test_decoders() {
        let role = TypeExpr::Enum(generated(Category::Enum, "Role", "role"));
        let search = TypeExpr::Variant(generated(Category::Union, "SearchResult", "search_result"));
        assert_eq!(
            field_decoder(&role).unwrap(),
            "crate::object::enums::role::Role::decode"
        );
        assert_eq!(
            field_decoder(&search).unwrap(),
            "|value| crate::object::union::search_result::SearchResult::dispatch(value)\
             .map(Box::new)"
        );
        let dates = TypeExpr::list(TypeExpr::Scalar(ScalarType::DateTime));
        assert_eq!(
            root_decoder(&dates).unwrap(),
            "|value| each(value, datetime)"
        );
        let results = TypeExpr::List {
            element: Box::new(search),
            nullable_elements: true,
        };
        assert_eq!(
            field_decoder(&results).unwrap(),
            "|value| each_nullable(value, \
             crate::object::union::search_result::SearchResult::dispatch)"
        );
        let filter = TypeExpr::Input(generated(Category::Input, "UserFilter", "user_filter"));
        assert!(matches!(field_decoder(&filter), Err(Error::Schema(_))));
    }

    #[test]
    fn test_nested_module_layout() {
        let config = GeneratorConfig::new().with_namespace("crate::api");
        let emitter = RustEmitter::new(config);
        assert_eq!(
            emitter.source_path("object/mod.rs"),
            PathBuf::from("object/mod.rs")
        );
        assert_eq!(
            RustEmitter::new(GeneratorConfig::new()).source_path("lib.rs"),
            PathBuf::from("src/lib.rs")
        );
    }

    #[test]
    fn test_manifest() {
        let config = GeneratorConfig::new()
            .with_crate_name("acme-client")
            .with_runtime_dependency("{ path = \"../synthql\" }");
        let manifest = RustEmitter::new(config).render_manifest("acme-client");
        assert!(manifest.contains("name = \"acme-client\""));
        assert!(manifest.contains("synthql = { path = \"../synthql\" }"));
    }
}
