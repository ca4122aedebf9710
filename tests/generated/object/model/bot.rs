//! generated from the `Bot` object, do not edit

use synthql::runtime::prelude::*;

/// `Bot` object
#[derive(Debug, Clone, PartialEq)]
pub struct Bot {
    id: Selected<String>,
}

impl Bot {
    /// materialize from a response object; unselected fields stay unset
    pub fn from_raw(value: &Value) -> Result<Self> {
        let raw = RawObject::new(value, "Bot")?;
        Ok(Self {
            id: raw.field("id", scalar)?,
        })
    }

    pub fn id(&self) -> Result<&str> {
        self.id.require("id").map(String::as_str)
    }
}

impl From<Bot> for crate::generated::object::union::search_result::SearchResult {
    fn from(value: Bot) -> Self {
        Self::Bot(value)
    }
}

impl crate::generated::object::interfaces::node::NodeFields for Bot {
    fn id(&self) -> Result<&str> {
        Bot::id(self)
    }
}

impl From<Bot> for crate::generated::object::interfaces::node::Node {
    fn from(value: Bot) -> Self {
        Self::Bot(value)
    }
}
