//! generated from the `SearchResult` union, do not edit

use synthql::runtime::prelude::*;

/// `SearchResult` union
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
    User(crate::generated::object::model::user::User),
    Bot(crate::generated::object::model::bot::Bot),
}

fn decode_user(value: &Value) -> Result<SearchResult> {
    crate::generated::object::model::user::User::from_raw(value).map(SearchResult::User)
}

fn decode_bot(value: &Value) -> Result<SearchResult> {
    crate::generated::object::model::bot::Bot::from_raw(value).map(SearchResult::Bot)
}

impl Polymorphic for SearchResult {
    const NAME: &'static str = "SearchResult";
    const REGISTRY: &'static [Variant<Self>] = &[
        Variant {
            typename: "User",
            decode: decode_user,
        },
        Variant {
            typename: "Bot",
            decode: decode_bot,
        },
    ];

    fn typename(&self) -> &'static str {
        match self {
            Self::User(_) => "User",
            Self::Bot(_) => "Bot",
        }
    }
}
