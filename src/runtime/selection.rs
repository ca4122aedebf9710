//! field selection trees
//!
//! a [`Selection`] says which fields a generated request method asks for.
//! it can be built with the typed builder or parsed from a json value:
//!
//! ```
//! use synthql::runtime::Selection;
//! use serde_json::json;
//!
//! let selection = Selection::from_value(&json!({
//!     "user": {"id": true, "name": true, "__parameters": {"active": true}}
//! }))
//! .unwrap();
//! assert_eq!(selection.render(), "user(active:true){id name}");
//! ```
//!
//! in the json form `__parameters` holds the call arguments of the enclosing
//! field and any other `__`-prefixed key (except `__typename`) is a
//! type-conditional fragment on the named type.

use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// key holding call arguments of the enclosing field
pub const PARAMETERS_KEY: &str = "__parameters";
/// prefix marking a type-conditional fragment
pub const FRAGMENT_PREFIX: &str = "__";
/// discriminator field, always selected inside fragments
pub const TYPENAME: &str = "__typename";

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionItem {
    /// scalar selection
    Field(String),
    /// `name(args){...}`
    Nested {
        name: String,
        arguments: Vec<(String, Value)>,
        selection: Selection,
    },
    /// `... on Type { __typename ... }`
    Fragment { on: String, selection: Selection },
}

/// ordered field selection tree
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    items: Vec<SelectionItem>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// select scalar fields
    pub fn fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items
            .extend(names.into_iter().map(|name| SelectionItem::Field(name.into())));
        self
    }

    /// select one scalar field
    pub fn field(self, name: impl Into<String>) -> Self {
        self.fields([name])
    }

    /// select a nested object
    pub fn nested(self, name: impl Into<String>, selection: Selection) -> Self {
        self.nested_with_args(name, Vec::<(String, Value)>::new(), selection)
    }

    /// select a nested object with call arguments
    pub fn nested_with_args<I, K, V>(
        mut self,
        name: impl Into<String>,
        arguments: I,
        selection: Selection,
    ) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.items.push(SelectionItem::Nested {
            name: name.into(),
            arguments: arguments
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
            selection,
        });
        self
    }

    /// select fields of one concrete type of a union or interface
    pub fn on(mut self, type_name: impl Into<String>, selection: Selection) -> Self {
        self.items.push(SelectionItem::Fragment {
            on: type_name.into(),
            selection,
        });
        self
    }

    pub fn items(&self) -> &[SelectionItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// parse the json form of a selection tree
    pub fn from_value(value: &Value) -> Result<Self> {
        let (selection, arguments) = parse_level(value)?;
        if !arguments.is_empty() {
            return Err(Error::Selection(format!(
                "`{PARAMETERS_KEY}` needs an enclosing field"
            )));
        }
        Ok(selection)
    }

    /// graphql text of the selection, without surrounding braces
    pub fn render(&self) -> String {
        self.items
            .iter()
            .map(render_item)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `{ ... }` block, or nothing for an empty selection
    pub fn block(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!("{{ {} }}", self.render())
        }
    }
}

fn render_item(item: &SelectionItem) -> String {
    match item {
        SelectionItem::Field(name) => name.clone(),
        SelectionItem::Nested {
            name,
            arguments,
            selection,
        } => {
            let mut out = name.clone();
            if !arguments.is_empty() {
                out.push('(');
                out.push_str(&render_arguments(arguments));
                out.push(')');
            }
            out.push('{');
            out.push_str(&selection.render());
            out.push('}');
            out
        }
        SelectionItem::Fragment { on, selection } => {
            let inner = selection.render();
            if inner.is_empty() {
                format!("... on {on} {{ {TYPENAME} }}")
            } else {
                format!("... on {on} {{ {TYPENAME} {inner} }}")
            }
        }
    }
}

/// integers unquoted, everything else json-encoded
fn render_arguments(arguments: &[(String, Value)]) -> String {
    arguments
        .iter()
        .map(|(name, value)| {
            let rendered = match value {
                Value::Number(number) if number.is_i64() || number.is_u64() => number.to_string(),
                other => other.to_string(),
            };
            format!("{name}:{rendered}")
        })
        .collect::<Vec<_>>()
        .join(",")
}

type Arguments = Vec<(String, Value)>;

fn parse_level(value: &Value) -> Result<(Selection, Arguments)> {
    let mut selection = Selection::new();
    let mut arguments = Vec::new();
    collect(value, &mut selection, &mut arguments)?;
    Ok((selection, arguments))
}

fn collect(value: &Value, selection: &mut Selection, arguments: &mut Arguments) -> Result<()> {
    match value {
        Value::String(name) => {
            selection.items.push(SelectionItem::Field(name.clone()));
            Ok(())
        }
        Value::Array(items) => {
            for item in items {
                collect(item, selection, arguments)?;
            }
            Ok(())
        }
        Value::Object(map) => collect_map(map, selection, arguments),
        other => Err(Error::Selection(format!(
            "unexpected value in selection: {other}"
        ))),
    }
}

fn collect_map(
    map: &Map<String, Value>,
    selection: &mut Selection,
    arguments: &mut Arguments,
) -> Result<()> {
    for (key, value) in map {
        if key == PARAMETERS_KEY {
            let Value::Object(params) = value else {
                return Err(Error::Selection(format!(
                    "`{PARAMETERS_KEY}` must map argument names to values"
                )));
            };
            arguments.extend(params.iter().map(|(name, value)| (name.clone(), value.clone())));
            continue;
        }

        match value {
            Value::Bool(true) | Value::Null => {
                selection.items.push(SelectionItem::Field(key.clone()));
            }
            Value::Bool(false) => {}
            Value::String(_) | Value::Array(_) | Value::Object(_) => {
                let (inner, inner_args) = parse_level(value)?;
                match key.strip_prefix(FRAGMENT_PREFIX) {
                    Some(type_name) if key != TYPENAME => {
                        if !inner_args.is_empty() {
                            return Err(Error::Selection(format!(
                                "fragment `{key}` cannot take `{PARAMETERS_KEY}`"
                            )));
                        }
                        selection.items.push(SelectionItem::Fragment {
                            on: type_name.to_string(),
                            selection: inner,
                        });
                    }
                    _ => selection.items.push(SelectionItem::Nested {
                        name: key.clone(),
                        arguments: inner_args,
                        selection: inner,
                    }),
                }
            }
            Value::Number(_) => {
                return Err(Error::Selection(format!(
                    "unexpected number for `{key}` in selection"
                )))
            }
        }
    }
    Ok(())
}
