//! Coercion rules shared by the request schemas.
//!
//! Numeric fields arrive either as JSON numbers or as numeric strings, the
//! privacy flag as a boolean or the literal strings "true"/"false", and the
//! feature list as any JSON value of which only arrays count.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ValidationError;
use crate::models::Entity;

/// A numeric field as received on the wire, before coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum IntLike {
    Int(i64),
    Text(String),
}

impl IntLike {
    /// Coerce to an integer, reporting `field` on failure.
    pub fn resolve(&self, field: &'static str) -> Result<i64, ValidationError> {
        match self {
            IntLike::Int(value) => Ok(*value),
            IntLike::Text(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| ValidationError::InvalidNumber {
                    field,
                    raw: raw.clone(),
                }),
        }
    }
}

impl From<i64> for IntLike {
    fn from(value: i64) -> Self {
        IntLike::Int(value)
    }
}

impl From<&str> for IntLike {
    fn from(value: &str) -> Self {
        IntLike::Text(value.to_string())
    }
}

impl<'de> Deserialize<'de> for IntLike {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        use std::fmt;

        struct IntLikeVisitor;

        impl<'de> Visitor<'de> for IntLikeVisitor {
            type Value = IntLike;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an integer or a numeric string")
            }

            fn visit_i64<E>(self, value: i64) -> Result<IntLike, E>
            where
                E: de::Error,
            {
                Ok(IntLike::Int(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<IntLike, E>
            where
                E: de::Error,
            {
                Ok(i64::try_from(value)
                    .map(IntLike::Int)
                    .unwrap_or_else(|_| IntLike::Text(value.to_string())))
            }

            fn visit_f64<E>(self, value: f64) -> Result<IntLike, E>
            where
                E: de::Error,
            {
                // Integral floats such as 450.0 are accepted; 450.5 is not.
                if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
                    Ok(IntLike::Int(value as i64))
                } else {
                    Ok(IntLike::Text(value.to_string()))
                }
            }

            fn visit_bool<E>(self, value: bool) -> Result<IntLike, E>
            where
                E: de::Error,
            {
                Ok(IntLike::Text(value.to_string()))
            }

            fn visit_str<E>(self, value: &str) -> Result<IntLike, E>
            where
                E: de::Error,
            {
                Ok(IntLike::Text(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<IntLike, E>
            where
                E: de::Error,
            {
                Ok(IntLike::Text(value))
            }
        }

        deserializer.deserialize_any(IntLikeVisitor)
    }
}

/// Coerce the privacy flag: `true` or `"true"` is private, anything else is not.
pub fn coerce_flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => text == "true",
        _ => false,
    }
}

/// Coerce a feature list. Returns `None` unless the value is list-shaped.
///
/// String items are kept verbatim; other scalars are stringified so that
/// `[4, "AWD"]` becomes `["4", "AWD"]`.
pub fn coerce_features(value: Option<&Value>) -> Option<Vec<String>> {
    match value {
        Some(Value::Array(items)) => Some(
            items
                .iter()
                .map(|item| match item {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                })
                .collect(),
        ),
        _ => None,
    }
}

/// Parse a path identifier.
///
/// Accepts an optionally signed decimal integer with surrounding whitespace;
/// anything else ("abc", "1.5", "12abc", "") is a validation failure.
pub fn parse_id(raw: &str, entity: Entity) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidId {
            entity,
            raw: raw.to_string(),
        })
}
