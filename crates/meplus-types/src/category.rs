//! Task categories
//!
//! The category list is a fixed ordered set; the order matters only because
//! the first [`Category::FREE_COUNT`] entries are available on every plan.

use serde::{Deserialize, Serialize};

/// Task categories offered by the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Day-to-day planning and routines
    Planning,
    /// Work and professional projects
    Work,
    /// Courses, study plans, skill building
    Learning,
    /// Health and wellness routines
    Wellness,
    /// Household chores and maintenance
    Home,
    /// Creative writing and design briefs
    Creative,
    /// Budgets and financial checklists
    Finance,
    /// Trip itineraries and packing lists
    Travel,
    /// Social plans and outreach
    Social,
    /// Event preparation and follow-up
    Events,
}

impl Category {
    /// Canonical ordered list of all categories.
    pub const ALL: [Category; 10] = [
        Self::Planning,
        Self::Work,
        Self::Learning,
        Self::Wellness,
        Self::Home,
        Self::Creative,
        Self::Finance,
        Self::Travel,
        Self::Social,
        Self::Events,
    ];

    /// Number of leading categories available on every plan.
    pub const FREE_COUNT: usize = 5;

    /// Get the category's wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Work => "work",
            Self::Learning => "learning",
            Self::Wellness => "wellness",
            Self::Home => "home",
            Self::Creative => "creative",
            Self::Finance => "finance",
            Self::Travel => "travel",
            Self::Social => "social",
            Self::Events => "events",
        }
    }

    /// Position in the canonical list.
    pub fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|c| c == self)
            .unwrap_or(Self::ALL.len())
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}

/// Error parsing a category string
#[derive(Debug, Clone)]
pub struct CategoryParseError(pub String);

impl std::fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown category: {}", self.0)
    }
}

impl std::error::Error for CategoryParseError {}
