//! JSON request payloads and their validation into domain types.

use serde::{Deserialize, Deserializer};
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::pricing::Money;

pub mod auth;
pub mod cart;
pub mod categories;
pub mod enquiries;
pub mod offers;
pub mod orders;
pub mod products;
pub mod profile;

/// Result type returned by the form helpers.
pub type FormResult<T> = Result<T, FormError>;

/// Errors that can occur while processing request payloads.
#[derive(Debug, Error)]
pub enum FormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// Payload rejected with a message shown to the client as is.
    #[error("{0}")]
    Invalid(String),
}

impl FormError {
    pub fn invalid(message: impl Into<String>) -> Self {
        FormError::Invalid(message.into())
    }
}

/// Scalar JSON value accepted where clients send either numbers or text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl FieldValue {
    /// Trimmed text form of the value.
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Int(value) => value.to_string(),
            FieldValue::Float(value) => value.to_string(),
            FieldValue::Bool(value) => value.to_string(),
            FieldValue::Text(value) => value.trim().to_string(),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, FieldValue::Text(value) if value.trim().is_empty())
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            FieldValue::Int(value) => i32::try_from(*value).ok(),
            FieldValue::Text(value) => value.trim().parse().ok(),
            FieldValue::Float(_) | FieldValue::Bool(_) => None,
        }
    }

    pub fn as_money(&self) -> Option<Money> {
        match self {
            FieldValue::Bool(_) => None,
            other => Money::parse(&other.as_text()),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(value) => Some(*value),
            FieldValue::Int(value) => Some(*value != 0),
            FieldValue::Text(value) => match value.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Some(true),
                "false" | "0" | "no" | "off" => Some(false),
                _ => None,
            },
            FieldValue::Float(_) => None,
        }
    }
}

/// Positive identifier from an optional field.
pub(crate) fn parse_id(value: Option<&FieldValue>) -> Option<i32> {
    value.and_then(FieldValue::as_i32).filter(|id| *id > 0)
}

/// Quantity defaulting to 1; missing, non-numeric and non-positive values
/// are all treated as 1.
pub(crate) fn clamp_quantity(value: Option<&FieldValue>) -> i32 {
    value.and_then(FieldValue::as_i32).filter(|qty| *qty >= 1).unwrap_or(1)
}

/// Non-blank sanitized text from an optional field.
pub(crate) fn required_text(value: Option<&FieldValue>) -> Option<String> {
    value
        .map(|value| sanitize_inline_text(&value.as_text()))
        .filter(|value| !value.is_empty())
}

/// Deserialize a field that may be present with `null`, keeping it apart
/// from a missing field. Use with `#[serde(default)]`.
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

pub(crate) fn sanitize_multiline_text(input: &str) -> String {
    let mut lines: Vec<String> = input.lines().map(sanitize_inline_text).collect();

    while matches!(lines.first(), Some(line) if line.is_empty()) {
        lines.remove(0);
    }

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    if lines.is_empty() {
        return String::new();
    }

    let mut result = Vec::with_capacity(lines.len());
    let mut previous_empty = false;
    for line in lines {
        let is_empty = line.is_empty();
        if is_empty {
            if previous_empty {
                continue;
            }
            previous_empty = true;
            result.push(String::new());
        } else {
            previous_empty = false;
            result.push(line);
        }
    }

    result.join("\n")
}
