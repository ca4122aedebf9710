//! generated from the `Role` enum, do not edit

use synthql::runtime::prelude::*;

/// `Role` enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// full access
    Admin,
    Guest,
}

impl Role {
    /// validated construction from a declared value
    pub fn new(value: &str) -> Result<Self> {
        <Self as GraphQlEnum>::try_new(value)
    }
}

impl GraphQlEnum for Role {
    const NAME: &'static str = "Role";
    const VARIANTS: &'static [Self] = &[Self::Admin, Self::Guest];

    fn value(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Guest => "GUEST",
        }
    }
}

impl Lower for Role {
    fn lower(&self) -> Value {
        Value::String(self.value().to_string())
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.value())
    }
}
