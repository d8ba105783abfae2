// src/api/types.rs
use serde::{Serialize, Deserialize};
use utoipa::ToSchema;

use crate::models::SuggestionResult;
use crate::presentation::StrengthIndicator;

// Password suggestion types
#[derive(Serialize, ToSchema)]
pub struct SuggestionResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// Suggested password
    pub password: Option<String>,
    /// Strength label as reported by the model
    pub strength: Option<String>,
    /// Why the model gave this rating
    pub reason: Option<String>,
    /// Normalized strength for display
    pub strength_level: Option<StrengthIndicator>,
    /// Form field the error refers to (validation failures only)
    pub field: Option<String>,
    /// Error message (if operation failed)
    pub error: Option<String>,
}

impl SuggestionResponse {
    pub fn ok(result: SuggestionResult) -> Self {
        let strength_level = StrengthIndicator::from(result.strength.as_str());
        Self {
            success: true,
            password: Some(result.password),
            strength: Some(result.strength),
            reason: result.reason,
            strength_level: Some(strength_level),
            field: None,
            error: None,
        }
    }

    pub fn failed(field: Option<&str>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            password: None,
            strength: None,
            reason: None,
            strength_level: None,
            field: field.map(String::from),
            error: Some(error.into()),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// Application version
    pub version: String,
    /// Model used for suggestions
    pub model: String,
}
