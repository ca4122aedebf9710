//! generated api client, do not edit

use synthql::runtime::prelude::*;

/// one request method per root operation field
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    base: BaseApiClient<T>,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            base: BaseApiClient::new(transport),
        }
    }

    pub fn base(&self) -> &BaseApiClient<T> {
        &self.base
    }

    /// look up one user
    ///
    /// `query User($id: ID!)` returning `User`
    pub fn user(&self, fields: &Selection, id: String) -> Result<Option<crate::generated::object::model::user::User>> {
        let mut variables = Map::new();
        set_variable(&mut variables, "id", &id);
        let operation = operation_text("query User($id: ID!)", "user(id: $id)", fields);
        let value = self.base.request(&operation, variables, "user")?;
        optional(&value, crate::generated::object::model::user::User::from_raw)
    }

    /// `query Users($filter: UserFilter, $role: Role)` returning `User[]`
    pub fn users(&self, fields: &Selection, filter: Option<crate::generated::object::input::user_filter::UserFilter>, role: Option<crate::generated::object::enums::role::Role>) -> Result<Vec<crate::generated::object::model::user::User>> {
        let mut variables = Map::new();
        set_variable(&mut variables, "filter", &filter);
        set_variable(&mut variables, "role", &role);
        let operation = operation_text("query Users($filter: UserFilter, $role: Role)", "users(filter: $filter, role: $role)", fields);
        let value = self.base.request(&operation, variables, "users")?;
        required(&value, |value| each(value, crate::generated::object::model::user::User::from_raw))
    }

    /// `query Nodes` returning `Node[]`
    pub fn nodes(&self, fields: &Selection) -> Result<Vec<crate::generated::object::interfaces::node::Node>> {
        let variables = Map::new();
        let operation = operation_text("query Nodes", "nodes", fields);
        let value = self.base.request(&operation, variables, "nodes")?;
        required(&value, |value| each(value, crate::generated::object::interfaces::node::Node::dispatch))
    }

    /// `query Search($term: String!)` returning `SearchResult[]`
    ///
    /// - `term`: text to match
    pub fn search(&self, fields: &Selection, term: String) -> Result<Option<Vec<Option<crate::generated::object::union::search_result::SearchResult>>>> {
        let mut variables = Map::new();
        set_variable(&mut variables, "term", &term);
        let operation = operation_text("query Search($term: String!)", "search(term: $term)", fields);
        let value = self.base.request(&operation, variables, "search")?;
        optional(&value, |value| each_nullable(value, crate::generated::object::union::search_result::SearchResult::dispatch))
    }

    /// `query DefaultRole` returning `Role`
    pub fn default_role(&self, fields: &Selection) -> Result<crate::generated::object::enums::role::Role> {
        let variables = Map::new();
        let operation = operation_text("query DefaultRole", "defaultRole", fields);
        let value = self.base.request(&operation, variables, "defaultRole")?;
        required(&value, crate::generated::object::enums::role::Role::decode)
    }
}
