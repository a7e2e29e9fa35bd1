//! Gated feature flags

use serde::{Deserialize, Serialize};

use crate::Plan;

/// Plan-gated capabilities in the product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Dictate a task description instead of typing it
    VoiceInput,
    /// Server-side prompt rewriting before generation
    PromptOptimization,
    /// Rich-text editing of generated output
    RichTextEditing,
    /// Saved revisions of a task's generated output
    VersionHistory,
    /// Export with brand assets applied
    BrandAssetExport,
    /// Export to presentation formats
    PresentationExport,
}

impl Feature {
    /// Get the feature's wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VoiceInput => "voice_input",
            Self::PromptOptimization => "prompt_optimization",
            Self::RichTextEditing => "rich_text_editing",
            Self::VersionHistory => "version_history",
            Self::BrandAssetExport => "brand_asset_export",
            Self::PresentationExport => "presentation_export",
        }
    }

    /// Get the minimum plan required for this feature.
    ///
    /// Every gated feature resolves to exactly one plan; there is no
    /// per-user override.
    pub fn min_plan(&self) -> Plan {
        match self {
            Self::VoiceInput
            | Self::PromptOptimization
            | Self::RichTextEditing
            | Self::VersionHistory
            | Self::BrandAssetExport
            | Self::PresentationExport => Plan::Pro,
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Feature; 6] = [
        Feature::VoiceInput,
        Feature::PromptOptimization,
        Feature::RichTextEditing,
        Feature::VersionHistory,
        Feature::BrandAssetExport,
        Feature::PresentationExport,
    ];

    #[test]
    fn test_min_plan_matches_plan_feature_table() {
        for feature in ALL {
            let listed = Plan::Pro.features().contains(&feature.as_str());
            assert!(listed, "feature {feature} missing from Pro table");
            let free = Plan::Base.features().contains(&feature.as_str());
            assert_eq!(free, feature.min_plan() == Plan::Base);
        }
    }

    #[test]
    fn test_wire_names_are_snake_case() {
        for feature in ALL {
            let name = feature.as_str();
            assert!(name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c == '_'));
        }
    }
}
