// src/suggest/schema.rs
//! Parse-or-fail checks for everything crossing the suggestion boundary.
//!
//! `validate_request` guards what we send to the model, `validate_response`
//! guards what comes back. Both are pure.

use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::models::{
    Complexity, SuggestionInput, SuggestionRequest, SuggestionResult, MAX_PASSWORD_LENGTH,
    MIN_PASSWORD_LENGTH,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Min {min} characters")]
    LengthTooShort { length: i64, min: u16 },

    #[error("Max {max} characters")]
    LengthTooLong { length: i64, max: u16 },

    #[error("Unknown complexity '{0}', expected low, medium or high")]
    UnknownComplexity(String),

    #[error("Model output is not a JSON object")]
    NotAnObject,

    #[error("Model output is missing '{0}'")]
    MissingField(&'static str),

    #[error("Model output field '{0}' is not a string")]
    NotAString(&'static str),

    #[error("Model output contains an empty password")]
    EmptyPassword,
}

impl ValidationError {
    /// Name of the field the error belongs to, for display next to it.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::LengthTooShort { .. } | ValidationError::LengthTooLong { .. } => "length",
            ValidationError::UnknownComplexity(_) => "complexity",
            ValidationError::NotAnObject => "output",
            ValidationError::MissingField(field) | ValidationError::NotAString(field) => *field,
            ValidationError::EmptyPassword => "password",
        }
    }
}

pub fn validate_request(input: &SuggestionInput) -> Result<SuggestionRequest, ValidationError> {
    if input.length < i64::from(MIN_PASSWORD_LENGTH) {
        return Err(ValidationError::LengthTooShort {
            length: input.length,
            min: MIN_PASSWORD_LENGTH,
        });
    }
    if input.length > i64::from(MAX_PASSWORD_LENGTH) {
        return Err(ValidationError::LengthTooLong {
            length: input.length,
            max: MAX_PASSWORD_LENGTH,
        });
    }

    let complexity: Complexity = input
        .complexity
        .parse()
        .map_err(ValidationError::UnknownComplexity)?;

    Ok(SuggestionRequest {
        // In range, checked above
        length: input.length as u16,
        complexity,
        keywords: input.keywords.clone(),
    })
}

pub fn validate_response(raw: &Value) -> Result<SuggestionResult, ValidationError> {
    let object = raw.as_object().ok_or(ValidationError::NotAnObject)?;

    let password = required_string(object, "password")?;
    if password.is_empty() {
        return Err(ValidationError::EmptyPassword);
    }
    let strength = required_string(object, "strength")?;

    let reason = match object.get("reason") {
        None | Some(Value::Null) => None,
        Some(Value::String(reason)) => Some(reason.clone()),
        Some(_) => return Err(ValidationError::NotAString("reason")),
    };

    Ok(SuggestionResult {
        password: password.to_string(),
        strength: strength.to_string(),
        reason,
    })
}

fn required_string<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(ValidationError::MissingField(field)),
        Some(Value::String(value)) => Ok(value.as_str()),
        Some(_) => Err(ValidationError::NotAString(field)),
    }
}

/// JSON Schema describing `SuggestionResult`, handed to the provider.
pub fn output_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "password": {
                "type": "string",
                "description": "The generated password suggestion."
            },
            "strength": {
                "type": "string",
                "description": "The strength of the generated password."
            },
            "reason": {
                "type": "string",
                "description": "The reason behind the strength."
            }
        },
        "required": ["password", "strength"],
        "additionalProperties": false
    })
}
