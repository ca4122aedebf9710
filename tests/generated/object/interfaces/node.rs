//! generated from the `Node` interface, do not edit

use synthql::runtime::prelude::*;

/// `Node` interface
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Bot(crate::generated::object::model::bot::Bot),
    User(crate::generated::object::model::user::User),
}

fn decode_bot(value: &Value) -> Result<Node> {
    crate::generated::object::model::bot::Bot::from_raw(value).map(Node::Bot)
}

fn decode_user(value: &Value) -> Result<Node> {
    crate::generated::object::model::user::User::from_raw(value).map(Node::User)
}

impl Polymorphic for Node {
    const NAME: &'static str = "Node";
    const REGISTRY: &'static [Variant<Self>] = &[
        Variant {
            typename: "Bot",
            decode: decode_bot,
        },
        Variant {
            typename: "User",
            decode: decode_user,
        },
    ];

    fn typename(&self) -> &'static str {
        match self {
            Self::Bot(_) => "Bot",
            Self::User(_) => "User",
        }
    }
}

/// getters every `Node` implementation shares
pub trait NodeFields {
    fn id(&self) -> Result<&str>;
}

impl NodeFields for Node {
    fn id(&self) -> Result<&str> {
        match self {
            Self::Bot(inner) => NodeFields::id(inner),
            Self::User(inner) => NodeFields::id(inner),
        }
    }
}
