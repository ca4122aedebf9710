//! materialized field values
//!
//! generated models keep one [`Selected`] per schema field so that "never
//! requested" and "requested but null" stay distinguishable.

use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::{Map, Value};

/// provenance of one field in a response object
#[derive(Debug, Clone, PartialEq)]
pub enum Selected<T> {
    /// the key was absent from the response
    NotSelected,
    /// the key was present with `null`
    Null,
    Present(T),
}

impl<T> Selected<T> {
    pub fn is_selected(&self) -> bool {
        !matches!(self, Selected::NotSelected)
    }

    /// value of a nullable field
    pub fn get(&self, field: &str) -> Result<Option<&T>> {
        match self {
            Selected::NotSelected => Err(not_selected(field)),
            Selected::Null => Ok(None),
            Selected::Present(value) => Ok(Some(value)),
        }
    }

    /// value of a non-null field
    pub fn require(&self, field: &str) -> Result<&T> {
        match self {
            Selected::NotSelected => Err(not_selected(field)),
            Selected::Null => Err(Error::Decode(format!(
                "field `{field}` is non-null but the response contained null"
            ))),
            Selected::Present(value) => Ok(value),
        }
    }

    pub fn as_ref(&self) -> Selected<&T> {
        match self {
            Selected::NotSelected => Selected::NotSelected,
            Selected::Null => Selected::Null,
            Selected::Present(value) => Selected::Present(value),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Selected<U> {
        match self {
            Selected::NotSelected => Selected::NotSelected,
            Selected::Null => Selected::Null,
            Selected::Present(value) => Selected::Present(f(value)),
        }
    }
}

impl<T> Default for Selected<T> {
    fn default() -> Self {
        Selected::NotSelected
    }
}

fn not_selected(field: &str) -> Error {
    Error::FieldNotSelected {
        field: field.to_string(),
    }
}

/// a response object being materialized
#[derive(Debug, Clone, Copy)]
pub struct RawObject<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> RawObject<'a> {
    /// wrap a json object; `type_name` only shapes the error message
    pub fn new(value: &'a Value, type_name: &str) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(Error::Decode(format!(
                "expected an object for {type_name}, got {}",
                kind_of(other)
            ))),
        }
    }

    /// decode one field, recording whether it was selected
    pub fn field<T>(
        &self,
        name: &str,
        decode: impl FnOnce(&'a Value) -> Result<T>,
    ) -> Result<Selected<T>> {
        match self.fields.get(name) {
            None => Ok(Selected::NotSelected),
            Some(Value::Null) => Ok(Selected::Null),
            Some(value) => decode(value).map(Selected::Present),
        }
    }

    /// the `__typename` discriminator, when selected
    pub fn typename(&self) -> Option<&'a str> {
        self.fields.get("__typename").and_then(Value::as_str)
    }
}

/// pass-through decode through serde
pub fn scalar<'a, T: Deserialize<'a>>(value: &'a Value) -> Result<T> {
    T::deserialize(value).map_err(|err| Error::Decode(err.to_string()))
}

/// `Date` and `DateTime` values: rfc 3339, plain dates, or naive timestamps (utc)
pub fn datetime(value: &Value) -> Result<DateTime<FixedOffset>> {
    let text = value
        .as_str()
        .ok_or_else(|| Error::Decode(format!("expected a date string, got {}", kind_of(value))))?;

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(parsed);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Ok(naive.and_utc().fixed_offset());
    }
    if let Some(midnight) = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc().fixed_offset());
    }
    Err(Error::Decode(format!("unrecognized date `{text}`")))
}

/// element-wise decode of a list whose entries are never `null`
///
/// nested lists are flattened.
pub fn each<'a, T>(value: &'a Value, decode: impl Fn(&'a Value) -> Result<T>) -> Result<Vec<T>> {
    collect(value, &|item| required(item, &decode))
}

/// element-wise decode of a list that may hold `null` entries
///
/// nested lists are flattened; a `null` anywhere inside becomes `None`.
pub fn each_nullable<'a, T>(
    value: &'a Value,
    decode: impl Fn(&'a Value) -> Result<T>,
) -> Result<Vec<Option<T>>> {
    collect(value, &|item| optional(item, &decode))
}

fn collect<'a, T>(value: &'a Value, decode: &impl Fn(&'a Value) -> Result<T>) -> Result<Vec<T>> {
    let Value::Array(items) = value else {
        return Err(Error::Decode(format!(
            "expected a list, got {}",
            kind_of(value)
        )));
    };
    let mut out = Vec::with_capacity(items.len());
    flatten_into(items, decode, &mut out)?;
    Ok(out)
}

fn flatten_into<'a, T>(
    items: &'a [Value],
    decode: &impl Fn(&'a Value) -> Result<T>,
    out: &mut Vec<T>,
) -> Result<()> {
    for item in items {
        match item {
            Value::Array(inner) => flatten_into(inner, decode, out)?,
            other => out.push(decode(other)?),
        }
    }
    Ok(())
}

/// `null` becomes `None`
pub fn optional<'a, T>(
    value: &'a Value,
    decode: impl FnOnce(&'a Value) -> Result<T>,
) -> Result<Option<T>> {
    match value {
        Value::Null => Ok(None),
        other => decode(other).map(Some),
    }
}

/// `null` is rejected
pub fn required<'a, T>(value: &'a Value, decode: impl FnOnce(&'a Value) -> Result<T>) -> Result<T> {
    match value {
        Value::Null => Err(Error::Decode("unexpected null".to_string())),
        other => decode(other),
    }
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// conversion of outbound values into plain json
pub trait Lower {
    fn lower(&self) -> Value;
}

impl Lower for String {
    fn lower(&self) -> Value {
        Value::String(self.clone())
    }
}

impl Lower for str {
    fn lower(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl Lower for i64 {
    fn lower(&self) -> Value {
        Value::from(*self)
    }
}

impl Lower for i32 {
    fn lower(&self) -> Value {
        Value::from(*self)
    }
}

impl Lower for f64 {
    fn lower(&self) -> Value {
        Value::from(*self)
    }
}

impl Lower for bool {
    fn lower(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Lower for Value {
    fn lower(&self) -> Value {
        self.clone()
    }
}

impl Lower for DateTime<FixedOffset> {
    fn lower(&self) -> Value {
        Value::String(self.to_rfc3339())
    }
}

impl<T: Lower> Lower for Option<T> {
    fn lower(&self) -> Value {
        match self {
            Some(value) => value.lower(),
            None => Value::Null,
        }
    }
}

impl<T: Lower> Lower for Vec<T> {
    fn lower(&self) -> Value {
        Value::Array(self.iter().map(Lower::lower).collect())
    }
}

impl<T: Lower + ?Sized> Lower for Box<T> {
    fn lower(&self) -> Value {
        (**self).lower()
    }
}

impl<T: Lower + ?Sized> Lower for &T {
    fn lower(&self) -> Value {
        (**self).lower()
    }
}
