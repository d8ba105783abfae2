// src/models.rs
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Shortest password the service will ask the model for.
pub const MIN_PASSWORD_LENGTH: u16 = 8;
/// Longest password accepted from direct (API / command line) requests.
pub const MAX_PASSWORD_LENGTH: u16 = 128;
/// Upper bound offered by the interactive form.
pub const INTERACTIVE_MAX_PASSWORD_LENGTH: u16 = 64;

pub const DEFAULT_PASSWORD_LENGTH: u16 = 16;

// Qualitative hint to the model about character-class richness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    #[default]
    Medium,
    High,
}

impl Complexity {
    pub const ALL: [Complexity; 3] = [Complexity::Low, Complexity::Medium, Complexity::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Low => "low",
            Complexity::Medium => "medium",
            Complexity::High => "high",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Complexity {
    type Err = String;

    // Exact match only: "High" or " high" are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Complexity::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Unvalidated suggestion parameters as they arrive from a form, a JSON body
/// or command line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SuggestionInput {
    /// Desired password length (8-128)
    pub length: i64,
    /// Desired complexity ("low", "medium" or "high")
    pub complexity: String,
    /// Optional keywords to make the password more memorable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
}

/// A request that passed validation. Only built by `validate_request`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionRequest {
    pub(crate) length: u16,
    pub(crate) complexity: Complexity,
    pub(crate) keywords: Option<String>,
}

impl SuggestionRequest {
    pub fn length(&self) -> u16 {
        self.length
    }

    pub fn complexity(&self) -> Complexity {
        self.complexity
    }

    /// Keywords exactly as supplied, including an empty string.
    pub fn keywords(&self) -> Option<&str> {
        self.keywords.as_deref()
    }

    /// Keywords that should actually be passed on as a hint.
    pub fn keyword_hint(&self) -> Option<&str> {
        self.keywords().filter(|k| !k.is_empty())
    }
}

impl From<&SuggestionRequest> for SuggestionInput {
    fn from(request: &SuggestionRequest) -> Self {
        Self {
            length: i64::from(request.length),
            complexity: request.complexity.to_string(),
            keywords: request.keywords.clone(),
        }
    }
}

/// A model suggestion that passed `validate_response`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SuggestionResult {
    /// The generated password suggestion
    pub password: String,
    /// Strength label reported by the model (usually weak, medium or strong)
    pub strength: String,
    /// Why the model rated the password this way
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
