//! schema type name to generated identifier
//!
//! built in one pass over the whole schema before any synthesis runs, so
//! generated types can refer to each other regardless of declaration order.

use crate::error::{Error, Result};
use crate::introspection::Schema;
use crate::naming;
use std::collections::BTreeMap;
use std::fmt;

/// where a generated type lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Model,
    Input,
    Enum,
    Union,
    Interfaces,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Model,
        Category::Input,
        Category::Enum,
        Category::Union,
        Category::Interfaces,
    ];

    /// artifact path segment, e.g. `Model`
    pub fn dir(self) -> &'static str {
        match self {
            Category::Model => "Model",
            Category::Input => "Input",
            Category::Enum => "Enum",
            Category::Union => "Union",
            Category::Interfaces => "Interfaces",
        }
    }

    /// rust module name under `object`
    pub fn module(self) -> &'static str {
        match self {
            Category::Model => "model",
            Category::Input => "input",
            Category::Enum => "enums",
            Category::Union => "union",
            Category::Interfaces => "interfaces",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir())
    }
}

/// identifier assigned to one schema type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedType {
    pub category: Category,
    /// rust type identifier
    pub ident: String,
    /// module file name
    pub module: String,
    /// fully-qualified path, e.g. `crate::object::model::User`
    pub path: String,
}

impl GeneratedType {
    /// path of the module holding the type
    pub fn module_path(&self) -> &str {
        self.path
            .rsplit_once("::")
            .map(|(module, _)| module)
            .unwrap_or(&self.path)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClassMap {
    entries: BTreeMap<String, GeneratedType>,
}

impl ClassMap {
    /// map every object, union, interface, input, and enum of the schema
    pub fn build(namespace: &str, schema: &Schema) -> Self {
        let mut map = Self::default();
        let groups = [
            (Category::Model, names(&schema.objects, |o| &o.name)),
            (Category::Union, names(&schema.unions, |o| &o.name)),
            (Category::Interfaces, names(&schema.interfaces, |o| &o.name)),
            (Category::Input, names(&schema.inputs, |o| &o.name)),
            (Category::Enum, names(&schema.enums, |o| &o.name)),
        ];
        for (category, type_names) in groups {
            for name in type_names {
                map.insert(namespace, category, name);
            }
        }
        map
    }

    fn insert(&mut self, namespace: &str, category: Category, name: &str) {
        let ident = naming::type_ident(name);
        let module = naming::module_ident(name);
        let path = format!(
            "{namespace}::object::{}::{module}::{ident}",
            category.module()
        );
        self.entries.insert(
            name.to_string(),
            GeneratedType {
                category,
                ident,
                module,
                path,
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&GeneratedType> {
        self.entries.get(name)
    }

    /// lookup that fails for names outside the schema
    pub fn require(&self, name: &str) -> Result<&GeneratedType> {
        self.get(name)
            .ok_or_else(|| Error::Schema(format!("type `{name}` is not part of the schema")))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// entries of one category, ordered by schema name
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = (&str, &GeneratedType)> {
        self.entries
            .iter()
            .filter(move |(_, ty)| ty.category == category)
            .map(|(name, ty)| (name.as_str(), ty))
    }
}

fn names<T>(items: &[T], name: impl Fn(&T) -> &String) -> Vec<&str> {
    items.iter().map(|item| name(item).as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::introspection::{EnumDef, InputObjectDef, ObjectDef, TypeKind};

    fn object(name: &str, kind: TypeKind) -> ObjectDef {
        ObjectDef {
            name: name.to_string(),
            kind,
            description: None,
            fields: None,
            possible_types: None,
        }
    }

    fn schema() -> Schema {
        Schema {
            objects: vec![
                object("User", TypeKind::Object),
                object("Result", TypeKind::Object),
            ],
            interfaces: vec![object("Node", TypeKind::Interface)],
            unions: vec![object("SearchResult", TypeKind::Union)],
            inputs: vec![InputObjectDef {
                name: "UserFilter".to_string(),
                kind: TypeKind::InputObject,
                description: None,
                input_fields: None,
            }],
            enums: vec![EnumDef {
                name: "Role".to_string(),
                kind: TypeKind::Enum,
                description: None,
                enum_values: None,
            }],
            query: None,
            mutation: None,
        }
    }

    #[test]
    fn test_build_maps_every_category() {
        let map = ClassMap::build("crate", &schema());
        assert_eq!(map.len(), 6);
        assert_eq!(
            map.require("User").unwrap().path,
            "crate::object::model::user::User"
        );
        assert_eq!(
            map.require("SearchResult").unwrap().path,
            "crate::object::union::search_result::SearchResult"
        );
        assert_eq!(map.require("Node").unwrap().category, Category::Interfaces);
        assert_eq!(map.require("UserFilter").unwrap().category, Category::Input);
        assert_eq!(
            map.require("Role").unwrap().path,
            "crate::object::enums::role::Role"
        );
    }

    #[test]
    fn test_colliding_names_are_renamed() {
        let map = ClassMap::build("crate::api", &schema());
        let result = map.require("Result").unwrap();
        assert_eq!(result.ident, "ResultType");
        assert_eq!(
            result.path,
            "crate::api::object::model::result_type::ResultType"
        );
        assert_eq!(
            result.module_path(),
            "crate::api::object::model::result_type"
        );
    }

    #[test]
    fn test_unknown_type() {
        let map = ClassMap::build("crate", &schema());
        assert!(matches!(map.require("Missing"), Err(Error::Schema(_))));
    }

    #[test]
    fn test_in_category() {
        let map = ClassMap::build("crate", &schema());
        let models: Vec<&str> = map
            .in_category(Category::Model)
            .map(|(name, _)| name)
            .collect();
        assert_eq!(models, vec!["Result", "User"]);
    }
}
