//! generated from the `User` object, do not edit

use synthql::runtime::prelude::*;

/// a registered account
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: Selected<String>,
    name: Selected<String>,
    role: Selected<crate::generated::object::enums::role::Role>,
    created_at: Selected<DateTime<FixedOffset>>,
    best_friend: Selected<Box<crate::generated::object::model::user::User>>,
    friends: Selected<Vec<Option<crate::generated::object::model::user::User>>>,
}

impl User {
    /// materialize from a response object; unselected fields stay unset
    pub fn from_raw(value: &Value) -> Result<Self> {
        let raw = RawObject::new(value, "User")?;
        Ok(Self {
            id: raw.field("id", scalar)?,
            name: raw.field("name", scalar)?,
            role: raw.field("role", crate::generated::object::enums::role::Role::decode)?,
            created_at: raw.field("createdAt", datetime)?,
            best_friend: raw.field("bestFriend", |value| crate::generated::object::model::user::User::from_raw(value).map(Box::new))?,
            friends: raw.field("friends", |value| each_nullable(value, crate::generated::object::model::user::User::from_raw))?,
        })
    }

    pub fn id(&self) -> Result<&str> {
        self.id.require("id").map(String::as_str)
    }

    pub fn name(&self) -> Result<Option<&str>> {
        self.name.get("name").map(|value| value.map(String::as_str))
    }

    pub fn role(&self) -> Result<crate::generated::object::enums::role::Role> {
        self.role.require("role").copied()
    }

    pub fn created_at(&self) -> Result<Option<DateTime<FixedOffset>>> {
        self.created_at.get("createdAt").map(|value| value.copied())
    }

    pub fn best_friend(&self) -> Result<Option<&crate::generated::object::model::user::User>> {
        self.best_friend.get("bestFriend").map(|value| value.map(|inner| &**inner))
    }

    pub fn friends(&self) -> Result<Option<&[Option<crate::generated::object::model::user::User>]>> {
        self.friends.get("friends").map(|value| value.map(Vec::as_slice))
    }
}

impl From<User> for crate::generated::object::union::search_result::SearchResult {
    fn from(value: User) -> Self {
        Self::User(value)
    }
}

impl crate::generated::object::interfaces::node::NodeFields for User {
    fn id(&self) -> Result<&str> {
        User::id(self)
    }
}

impl From<User> for crate::generated::object::interfaces::node::Node {
    fn from(value: User) -> Self {
        Self::User(value)
    }
}
