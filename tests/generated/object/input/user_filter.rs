//! generated from the `UserFilter` input, do not edit

use synthql::runtime::prelude::*;

/// `UserFilter` input
#[derive(Debug, Clone, PartialEq)]
pub struct UserFilter {
    pub role: Option<crate::generated::object::enums::role::Role>,
    pub ids: Vec<String>,
    pub parent: Option<Box<crate::generated::object::input::user_filter::UserFilter>>,
}

impl UserFilter {
    pub fn new(role: Option<crate::generated::object::enums::role::Role>, ids: Vec<String>, parent: Option<crate::generated::object::input::user_filter::UserFilter>) -> Self {
        Self {
            role,
            ids,
            parent: parent.map(Box::new),
        }
    }
}

impl Lower for UserFilter {
    fn lower(&self) -> Value {
        let mut map = Map::new();
        if let Some(value) = &self.role {
            map.insert("role".to_string(), value.lower());
        }
        map.insert("ids".to_string(), self.ids.lower());
        if let Some(value) = &self.parent {
            map.insert("parent".to_string(), value.lower());
        }
        Value::Object(map)
    }
}
