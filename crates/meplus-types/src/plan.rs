//! Subscription plan types

use serde::{Deserialize, Serialize};

/// Subscription plan levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    /// Base plan - free, metered task generation, free categories only
    Base,
    /// Pro plan - every category, every gated feature, unmetered usage
    Pro,
}

impl Plan {
    /// Get the gated features enabled for this plan
    pub const fn features(&self) -> &'static [&'static str] {
        match self {
            Self::Base => &[],
            Self::Pro => &[
                "voice_input",
                "prompt_optimization",
                "rich_text_editing",
                "version_history",
                "brand_asset_export",
                "presentation_export",
            ],
        }
    }

    /// Whether usage quotas apply to this plan.
    ///
    /// Pro is unmetered by definition, not by a large numeric limit.
    pub const fn is_metered(&self) -> bool {
        matches!(self, Self::Base)
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Base => write!(f, "base"),
            Self::Pro => write!(f, "pro"),
        }
    }
}

impl std::str::FromStr for Plan {
    type Err = PlanParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "base" | "free" => Ok(Self::Base),
            "pro" | "professional" => Ok(Self::Pro),
            _ => Err(PlanParseError(s.to_string())),
        }
    }
}

/// Error parsing a plan string
#[derive(Debug, Clone)]
pub struct PlanParseError(pub String);

impl std::fmt::Display for PlanParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid plan: {}", self.0)
    }
}

impl std::error::Error for PlanParseError {}
