use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::{HIGH_SCORE_THRESHOLD, MEDIUM_SCORE_THRESHOLD};

/// The structured report produced by one analysis.
///
/// Created once from a parsed service response and never mutated afterwards;
/// the favorites store keeps its own copies. `project_name` is the identity
/// used for favorites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Official project name
    pub project_name: String,
    /// Project's X/Twitter profile
    pub twitter_url: String,
    /// Direct link to the project logo
    pub icon_url: String,
    /// Normalized score, 0 to 100
    pub overall_score: u8,
    /// Quick verdict
    pub score_rationale: String,
    pub founders: Vec<Founder>,
    pub filter_analysis: Vec<FilterAnalysis>,
    pub airdrop_tasks: Vec<String>,
    /// Web pages the service cited while answering
    #[serde(default)]
    pub grounding_attribution: Vec<GroundingSource>,
    /// The one notable public mention of the project
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prime_source: Option<GroundingSource>,
}

impl AnalysisResult {
    /// Creates an empty result for the given project.
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            twitter_url: String::new(),
            icon_url: String::new(),
            overall_score: 0,
            score_rationale: String::new(),
            founders: Vec::new(),
            filter_analysis: Vec::new(),
            airdrop_tasks: Vec::new(),
            grounding_attribution: Vec::new(),
            prime_source: None,
        }
    }

    pub fn score_tier(&self) -> ScoreTier {
        ScoreTier::from_score(self.overall_score)
    }
}

/// The payload the service is asked to return: an [`AnalysisResult`]
/// without the cited sources, which arrive out of band.
///
/// Every field is optional on the wire. Missing fields decode to empty
/// values so that rendering never has to deal with holes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisPayload {
    pub project_name: String,
    pub twitter_url: String,
    pub icon_url: String,
    #[serde(deserialize_with = "deserialize_score")]
    pub overall_score: u8,
    pub score_rationale: String,
    pub founders: Vec<Founder>,
    pub filter_analysis: Vec<FilterAnalysis>,
    pub airdrop_tasks: Vec<String>,
    pub prime_source: Option<GroundingSource>,
}

impl AnalysisPayload {
    /// Attaches the cited sources, producing the final result.
    pub fn into_result(self, sources: Vec<GroundingSource>) -> AnalysisResult {
        AnalysisResult {
            project_name: self.project_name,
            twitter_url: self.twitter_url,
            icon_url: self.icon_url,
            overall_score: self.overall_score,
            score_rationale: self.score_rationale,
            founders: self.founders,
            filter_analysis: self.filter_analysis,
            airdrop_tasks: self.airdrop_tasks,
            grounding_attribution: sources,
            prime_source: self.prime_source,
        }
    }
}

/// A project founder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Founder {
    pub name: String,
    pub achievements: String,
    pub image_url: String,
    /// Main X or LinkedIn profile, empty when unknown
    pub profile_url: String,
}

impl Founder {
    /// Up to two upper-cased initials, used when the image is unavailable.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .take(2)
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Analysis of the project against one filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterAnalysis {
    pub filter_name: String,
    pub description: String,
    pub verdict: Verdict,
    /// Short label such as "High" or "< $10M"
    pub level: String,
}

/// Outcome of a single filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Verdict {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Positive => "Positive",
            Verdict::Negative => "Negative",
            Verdict::Neutral => "Neutral",
        }
    }

    /// Lenient parse. The templates quote the allowed values, so models
    /// sometimes echo the quotes back. Anything unrecognised is neutral.
    pub fn parse_lenient(s: &str) -> Self {
        let cleaned = s.trim().trim_matches(|c| c == '\'' || c == '"').trim();
        match cleaned.to_ascii_lowercase().as_str() {
            "positive" => Verdict::Positive,
            "negative" => Verdict::Negative,
            _ => Verdict::Neutral,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Verdict {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Verdict::parse_lenient).unwrap_or_default())
    }
}

/// A web page cited by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}

impl GroundingSource {
    pub fn new(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            uri: uri.into(),
        }
    }
}

/// Coarse bucket of the overall score, used for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    High,
    Medium,
    Low,
}

impl ScoreTier {
    pub fn from_score(score: u8) -> Self {
        if score >= HIGH_SCORE_THRESHOLD {
            ScoreTier::High
        } else if score >= MEDIUM_SCORE_THRESHOLD {
            ScoreTier::Medium
        } else {
            ScoreTier::Low
        }
    }
}

/// Accepts a number or a numeric string and clamps it into 0..=100.
fn deserialize_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    use serde::de::Error;

    let value = serde_json::Value::deserialize(deserializer)?;
    let score = match &value {
        serde_json::Value::Null => return Ok(0),
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };

    match score {
        Some(s) if s.is_finite() => Ok(s.round().clamp(0.0, 100.0) as u8),
        _ => Err(D::Error::custom(format!("invalid overallScore: {value}"))),
    }
}
