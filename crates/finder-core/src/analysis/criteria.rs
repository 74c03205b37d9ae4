use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A fixed scoring rubric applied by the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Low risk, lower reward: proven teams, audits, stable rewards
    Safest,
    /// Balanced: a real product and visible activity
    #[default]
    Moderate,
    /// High risk, high reward: unknown and underexposed
    Risky,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Safest, RiskLevel::Moderate, RiskLevel::Risky];

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Safest => "Safest",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::Risky => "Risky",
        }
    }

    /// Highest total the rubric can award.
    pub fn max_score(self) -> u32 {
        match self {
            RiskLevel::Safest => 28,
            RiskLevel::Moderate => 25,
            RiskLevel::Risky => 27,
        }
    }

    /// A total strictly above this earns the positive verdict.
    pub fn pass_threshold(self) -> u32 {
        match self {
            RiskLevel::Safest => 21,
            RiskLevel::Moderate | RiskLevel::Risky => 17,
        }
    }

    /// Verdict label for a total above the threshold.
    pub fn pass_label(self) -> &'static str {
        match self {
            RiskLevel::Safest => "Stable & Reliable Project",
            RiskLevel::Moderate => "Solid Mid-risk Opportunity",
            RiskLevel::Risky => "High Potential Gem",
        }
    }

    /// Verdict label for any other total.
    pub fn fail_label(self) -> &'static str {
        match self {
            RiskLevel::Safest => "Solid, but monitor",
            RiskLevel::Moderate => "Needs more observation",
            RiskLevel::Risky => "Watch closely",
        }
    }

    pub fn next(self) -> Self {
        match self {
            RiskLevel::Safest => RiskLevel::Moderate,
            RiskLevel::Moderate => RiskLevel::Risky,
            RiskLevel::Risky => RiskLevel::Safest,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            RiskLevel::Safest => RiskLevel::Risky,
            RiskLevel::Moderate => RiskLevel::Safest,
            RiskLevel::Risky => RiskLevel::Moderate,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "safest" | "safe" => Ok(RiskLevel::Safest),
            "moderate" => Ok(RiskLevel::Moderate),
            "risky" => Ok(RiskLevel::Risky),
            other => Err(format!(
                "unknown risk level '{other}' (expected safest, moderate or risky)"
            )),
        }
    }
}

/// Whether the search uses a risk profile or a user-built filter list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterMode {
    #[default]
    Default,
    Custom,
}

impl FilterMode {
    pub fn label(self) -> &'static str {
        match self {
            FilterMode::Default => "Default Profile",
            FilterMode::Custom => "Custom Filters",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            FilterMode::Default => FilterMode::Custom,
            FilterMode::Custom => FilterMode::Default,
        }
    }
}

/// What a single analysis request is evaluated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criteria {
    Profile(RiskLevel),
    Custom(Vec<String>),
}

impl Criteria {
    pub fn mode(&self) -> FilterMode {
        match self {
            Criteria::Profile(_) => FilterMode::Default,
            Criteria::Custom(_) => FilterMode::Custom,
        }
    }

    /// Short description for logs and status lines.
    pub fn describe(&self) -> String {
        match self {
            Criteria::Profile(level) => format!("{level} profile"),
            Criteria::Custom(filters) => format!("{} custom filters", filters.len()),
        }
    }
}

impl From<RiskLevel> for Criteria {
    fn from(level: RiskLevel) -> Self {
        Criteria::Profile(level)
    }
}
