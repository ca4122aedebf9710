//! closed enum value sets

use super::value::kind_of;
use crate::error::{Error, Result};
use serde_json::Value;

/// a generated graphql enum
///
/// every variant maps to exactly one declared literal; construction from
/// anything outside [`GraphQlEnum::VARIANTS`] fails with
/// [`Error::InvalidEnumValue`].
pub trait GraphQlEnum: Sized + Copy + 'static {
    /// schema name of the enum
    const NAME: &'static str;
    /// every variant, in declaration order
    const VARIANTS: &'static [Self];

    /// the declared literal
    fn value(&self) -> &'static str;

    /// validated construction from a literal
    fn try_new(value: &str) -> Result<Self> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|variant| variant.value() == value)
            .ok_or_else(|| Error::InvalidEnumValue {
                enum_name: Self::NAME.to_string(),
                value: value.to_string(),
                allowed: Self::values().into_iter().map(str::to_string).collect(),
            })
    }

    /// validated construction from a response value
    fn decode(value: &Value) -> Result<Self> {
        match value {
            Value::String(text) => Self::try_new(text),
            other => Err(Error::Decode(format!(
                "expected a {} literal, got {}",
                Self::NAME,
                kind_of(other)
            ))),
        }
    }

    /// declared literals, in declaration order
    fn values() -> Vec<&'static str> {
        Self::VARIANTS.iter().map(GraphQlEnum::value).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Status {
        Open,
        InProgress,
    }

    impl GraphQlEnum for Status {
        const NAME: &'static str = "Status";
        const VARIANTS: &'static [Self] = &[Status::Open, Status::InProgress];

        fn value(&self) -> &'static str {
            match self {
                Status::Open => "OPEN",
                Status::InProgress => "IN_PROGRESS",
            }
        }
    }

    #[test]
    fn test_declared_values_round_trip() {
        for literal in Status::values() {
            assert_eq!(Status::try_new(literal).unwrap().value(), literal);
        }
    }

    #[test]
    fn test_undeclared_value_rejected() {
        match Status::try_new("open").unwrap_err() {
            Error::InvalidEnumValue {
                enum_name,
                value,
                allowed,
            } => {
                assert_eq!(enum_name, "Status");
                assert_eq!(value, "open");
                assert_eq!(allowed, vec!["OPEN", "IN_PROGRESS"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode() {
        assert_eq!(
            Status::decode(&json!("IN_PROGRESS")).unwrap(),
            Status::InProgress
        );
        assert!(matches!(Status::decode(&json!(1)), Err(Error::Decode(_))));
        assert!(matches!(
            Status::decode(&json!("CLOSED")),
            Err(Error::InvalidEnumValue { .. })
        ));
    }
}
