// src/presentation/strength.rs
use console::{style, StyledObject};
use serde::Serialize;
use utoipa::ToSchema;

const BAR_WIDTH: usize = 30;

/// Display bucket for the model's strength label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLevel {
    Weak,
    Medium,
    Strong,
    Unknown,
}

impl StrengthLevel {
    /// Case-insensitive; anything unrecognized is `Unknown`, never an error.
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "weak" => StrengthLevel::Weak,
            "medium" => StrengthLevel::Medium,
            "strong" => StrengthLevel::Strong,
            _ => StrengthLevel::Unknown,
        }
    }

    /// Fill of the strength bar, 0-100.
    pub fn progress(&self) -> u8 {
        match self {
            StrengthLevel::Weak => 33,
            StrengthLevel::Medium => 66,
            StrengthLevel::Strong => 100,
            StrengthLevel::Unknown => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StrengthLevel::Weak => "Weak",
            StrengthLevel::Medium => "Medium",
            StrengthLevel::Strong => "Strong",
            StrengthLevel::Unknown => "Unknown",
        }
    }

    fn paint<D>(&self, value: D) -> StyledObject<D> {
        match self {
            StrengthLevel::Weak => style(value).red(),
            StrengthLevel::Medium => style(value).yellow(),
            StrengthLevel::Strong => style(value).green(),
            StrengthLevel::Unknown => style(value).dim(),
        }
    }

    /// `Strength: [██████░░░░] Medium` for the terminal.
    pub fn render_bar(&self) -> String {
        let filled = BAR_WIDTH * usize::from(self.progress()) / 100;
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));
        format!(
            "Strength: [{}] {}",
            self.paint(bar),
            self.paint(self.label()).bold()
        )
    }
}

/// Serializable view of the indicator for API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StrengthIndicator {
    /// Normalized level
    pub level: StrengthLevel,
    /// Human readable label
    pub label: String,
    /// Progress value from 0 to 100
    pub progress: u8,
}

impl From<&str> for StrengthIndicator {
    fn from(label: &str) -> Self {
        let level = StrengthLevel::from_label(label);
        Self {
            level,
            label: level.label().to_string(),
            progress: level.progress(),
        }
    }
}
