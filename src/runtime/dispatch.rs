//! `__typename` dispatch for unions and interfaces

use super::selection::TYPENAME;
use super::value::kind_of;
use crate::error::{Error, Result};
use serde_json::Value;

/// factory for one concrete type of a polymorphic value
pub type DecodeFn<T> = fn(&Value) -> Result<T>;

/// registry entry: discriminator and the matching factory
pub struct Variant<T> {
    pub typename: &'static str,
    pub decode: DecodeFn<T>,
}

/// decode `value` with the factory registered for its `__typename`
pub fn dispatch<T>(value: &Value, type_name: &str, registry: &[Variant<T>]) -> Result<T> {
    let Value::Object(fields) = value else {
        return Err(Error::Decode(format!(
            "expected an object for {type_name}, got {}",
            kind_of(value)
        )));
    };
    let typename = fields
        .get(TYPENAME)
        .and_then(Value::as_str)
        .ok_or_else(|| {
            Error::Decode(format!(
                "{type_name} value has no `{TYPENAME}`, select it to decode polymorphic fields"
            ))
        })?;

    let variant = registry
        .iter()
        .find(|variant| variant.typename == typename)
        .ok_or_else(|| {
            Error::Decode(format!("`{typename}` is not a known variant of {type_name}"))
        })?;
    (variant.decode)(value)
}

/// a generated union or interface
pub trait Polymorphic: Sized + 'static {
    /// schema name of the union or interface
    const NAME: &'static str;
    const REGISTRY: &'static [Variant<Self>];

    /// discriminator of the held variant
    fn typename(&self) -> &'static str;

    /// decode by `__typename`
    fn dispatch(value: &Value) -> Result<Self> {
        dispatch(value, Self::NAME, Self::REGISTRY)
    }
}
