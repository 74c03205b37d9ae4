//! Prompt templates for the analysis request.
//!
//! There are four templates: one per [`RiskLevel`] and one for a custom
//! filter list. They all share the recency rule, the prime-source rule and
//! the output schema; only the persona and the rubric differ.

use super::criteria::{Criteria, RiskLevel};
use super::error::AnalysisError;

/// JSON field names the extractor relies on. Every template mentions all of them.
pub const SCHEMA_FIELDS: &[&str] = &[
    "projectName",
    "twitterUrl",
    "iconUrl",
    "overallScore",
    "scoreRationale",
    "founders",
    "filterAnalysis",
    "airdropTasks",
    "primeSource",
];

const RECENCY_RULE: &str = "Your task is to find and analyze a token-less crypto project. \
A critical, non-negotiable constraint is that your analysis MUST be based only on information, \
announcements, and project activity from the last 4 weeks. Any project that has launched its \
token, or whose primary information is older than 4 weeks, must be disqualified.";

const SEARCH_RULE: &str = "Use Google Search to find ONE suitable project that meets these strict \
recency criteria, then analyze it against the following scoring matrix. Calculate a total score \
based on the weights.";

const PRIME_SOURCE_RULE: &str = "From your search results, find a tweet about the project from a \
prominent and respected figure in the crypto space (e.g., a well-known analyst, VC, or founder). \
This tweet will be the \"primeSource\". The title should be a summary of the tweet's content, and \
the uri must be the direct URL to the tweet.";

const OUTPUT_RULE: &str = "Return your analysis as a single JSON object with the exact structure \
specified below. Do not include any text or markdown formatting before or after the JSON.";

/// One weighted line of a rubric.
struct Criterion {
    name: &'static str,
    guidance: &'static str,
}

const fn criterion(name: &'static str, guidance: &'static str) -> Criterion {
    Criterion { name, guidance }
}

const RISKY_RUBRIC: &[Criterion] = &[
    criterion("VC Funding", "None or < $10M (+2 points)"),
    criterion("Revenue Generation", "Not necessary yet (0 points)"),
    criterion("Usefulness / Product", "Even MVP stage is fine if concept is strong (+1 if idea unique)"),
    criterion("UI/UX", "Can be raw/prototype (0 or +1, not a dealbreaker)"),
    criterion("Barrier to Entry", "High, requires technical effort or multiple steps (+3, less competition)"),
    criterion("Team Transparency", "Partially anon acceptable if consistent (+1 if building actively)"),
    criterion("Team Vocality on Airdrops", "Should not talk much about airdrops (+2 if silent)"),
    criterion("Community Type", "Small and early-stage is fine (+1 if genuine interactions)"),
    criterion("Audit / Security", "Optional in this phase (0 if missing, +1 if partial audit)"),
    criterion("Narrative Alignment", "Strongly tied to rising narratives such as AI or RWAs (+3 if relevant)"),
    criterion("Airdrop Type", "Retroactive or hidden (+3 if no official points system)"),
    criterion("Replication Difficulty", "Complex, unique on-chain tasks (+2)"),
    criterion("Founders' Track Record", "New founders okay (0 points)"),
    criterion("Community Size / Activity", "Low but authentic (+1)"),
    criterion("Token Status", "Tokenless project (+3)"),
];

const MODERATE_RUBRIC: &[Criterion] = &[
    criterion("VC Funding", "<$80M (+2)"),
    criterion("Revenue Generation", "Some early income proof on Dune/DefiLlama (+2)"),
    criterion("Usefulness / Product", "Real use-case beyond airdrops (+2)"),
    criterion("UI/UX", "Functional and visually decent (+1)"),
    criterion("Barrier to Entry", "Medium, some gas and effort required (+1)"),
    criterion("Team Transparency", "Semi-doxxed or known contributors (+2)"),
    criterion("Team Vocality on Airdrops", "Occasional mention, not heavy (0)"),
    criterion("Community Type", "Active and mixed audience (+1)"),
    criterion("Audit / Security", "Partial or upcoming (+1)"),
    criterion("Narrative Alignment", "Fitting a trending but stable theme (+2)"),
    criterion("Airdrop Type", "Retroactive or mixed, points plus quests (+2)"),
    criterion("Replication Difficulty", "Moderate (+1)"),
    criterion("Founders' Track Record", "At least 1 experienced founder (+1)"),
    criterion("Community Size / Activity", "Medium, growing base (+1)"),
    criterion("Token Status", "Tokenless or unlaunched token (+2)"),
];

const SAFEST_RUBRIC: &[Criterion] = &[
    criterion("VC Funding", "<$150M but diversified investor set (+2)"),
    criterion("Revenue Generation", "Stable income stream above $100k/mo (+3)"),
    criterion("Usefulness / Product", "Established real users (+3)"),
    criterion("UI/UX", "Polished, professional-grade (+2)"),
    criterion("Barrier to Entry", "Easy onboarding (0)"),
    criterion("Team Transparency", "Fully doxxed with strong history (+3)"),
    criterion("Team Vocality on Airdrops", "Announces clear, structured campaigns (+1)"),
    criterion("Community Type", "Large, organic, helpful (+2)"),
    criterion("Audit / Security", "Audited and open source (+3)"),
    criterion("Narrative Alignment", "Aligns with a sustainable trend such as DeFi infra, L2 or RWA (+2)"),
    criterion("Airdrop Type", "Official campaigns or early points (+2)"),
    criterion("Replication Difficulty", "Easy is fine (0)"),
    criterion("Founders' Track Record", "Proven success (+2)"),
    criterion("Community Size / Activity", "Very active and stable (+2)"),
    criterion("Token Status", "Token upcoming or announced (+1)"),
];

/// Persona, goal, rubric and level examples for one risk profile.
struct Profile {
    persona: &'static str,
    goal: &'static str,
    rubric: &'static [Criterion],
    level_examples: &'static str,
}

fn profile(level: RiskLevel) -> Profile {
    match level {
        RiskLevel::Risky => Profile {
            persona: "a \"High-Risk, High-Reward Hunter\"",
            goal: "Find an unknown, early, underexposed, token-less project before the crowd.",
            rubric: RISKY_RUBRIC,
            level_examples: "'None', '< $10M', 'High'",
        },
        RiskLevel::Moderate => Profile {
            persona: "a \"Balanced Risk / Reward\" investor",
            goal: "Find a token-less project with a real product and visible activity, early but with substance.",
            rubric: MODERATE_RUBRIC,
            level_examples: "'<$80M', 'Functional', 'Medium'",
        },
        RiskLevel::Safest => Profile {
            persona: "a \"Low Risk / Lower Reward\" investor",
            goal: "Find a dependable, token-less project with a proven team, audits, and stable reward expectations.",
            rubric: SAFEST_RUBRIC,
            level_examples: "'Polished', 'Fully Doxxed', 'Audited'",
        },
    }
}

/// Builds the instruction for the given criteria.
///
/// A custom filter list must contain at least one non-blank name.
pub fn build_prompt(criteria: &Criteria) -> Result<String, AnalysisError> {
    match criteria {
        Criteria::Profile(level) => Ok(build_profile_prompt(*level)),
        Criteria::Custom(filters) => build_custom_prompt(filters),
    }
}

/// Builds the template for one of the fixed risk profiles.
pub fn build_profile_prompt(level: RiskLevel) -> String {
    let profile = profile(level);

    let rubric = profile
        .rubric
        .iter()
        .map(|c| format!("- {}: {}", c.name, c.guidance))
        .collect::<Vec<_>>()
        .join("\n");

    let threshold = format!(
        "After analyzing, determine the final verdict. If the total score is above {} \
(out of a maximum of {}), the verdict is \"{}\". Otherwise, it is \"{}\".",
        level.pass_threshold(),
        level.max_score(),
        level.pass_label(),
        level.fail_label(),
    );

    let schema = output_schema(
        "A normalized numerical score from 0 to 100 based on the total points.",
        &format!(
            "The final verdict, e.g., '{}' or '{}'.",
            level.pass_label(),
            level.fail_label()
        ),
        "Name of the filter used",
        profile.level_examples,
    );

    format!(
        "Your role is an expert crypto project analyst for {persona}.\n\
Goal: {goal}\n\
{RECENCY_RULE} {SEARCH_RULE}\n\n\
Scoring Matrix:\n{rubric}\n\n\
{threshold}\n\
{PRIME_SOURCE_RULE}\n\n\
{OUTPUT_RULE}\n\
{schema}\n",
        persona = profile.persona,
        goal = profile.goal,
    )
}

/// Builds the generic template for a user-defined filter list.
pub fn build_custom_prompt(filters: &[String]) -> Result<String, AnalysisError> {
    let filters: Vec<&str> = filters
        .iter()
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .collect();

    if filters.is_empty() {
        return Err(AnalysisError::EmptyFilters);
    }

    let filter_list = filters
        .iter()
        .map(|f| format!("- {f}"))
        .collect::<Vec<_>>()
        .join("\n");

    let schema = output_schema(
        "A normalized numerical score from 0 to 100 based on your holistic analysis.",
        "A quick verdict summarizing your findings.",
        "The user-defined filter name",
        "'High', 'Present', 'Anon'",
    );

    Ok(format!(
        "Your role is an expert crypto project analyst.\n\
Goal: Find ONE promising, token-less project that seems interesting.\n\
{RECENCY_RULE}\n\
Use Google Search, then analyze that single project against the following user-defined filters:\n\
{filter_list}\n\n\
For each filter, provide a detailed analysis, a verdict ('Positive', 'Negative', or 'Neutral'), \
and a short level summary.\n\
Also, find information on founders, any publicly known airdrop tasks, and generate an overall \
score from 0-100 based on your findings, along with a quick verdict (scoreRationale).\n\
{PRIME_SOURCE_RULE}\n\n\
{OUTPUT_RULE}\n\
{schema}\n"
    ))
}

fn output_schema(score_hint: &str, rationale_hint: &str, filter_hint: &str, level_examples: &str) -> String {
    format!(
        r#"{{
  "projectName": "The project's official name",
  "twitterUrl": "The full URL to the project's official Twitter/X profile.",
  "iconUrl": "A direct URL to the project's logo or icon.",
  "overallScore": "{score_hint}",
  "scoreRationale": "{rationale_hint}",
  "founders": [ {{ "name": "Founder's Name", "achievements": "Summary of achievements.", "imageUrl": "URL to profile picture.", "profileUrl": "Full URL to their main X or LinkedIn profile. Return empty string if not found." }} ],
  "filterAnalysis": [ {{ "filterName": "{filter_hint}", "description": "Your detailed analysis for this filter.", "verdict": "'Positive', 'Negative', or 'Neutral'.", "level": "A short summary word like {level_examples}." }} ],
  "airdropTasks": ["A list of publicly known airdrop tasks."],
  "primeSource": {{ "title": "A summary of the prominent figure's tweet content", "uri": "The full direct URL to the tweet" }}
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_prompt_mentions_rubric_and_threshold() {
        let prompt = build_profile_prompt(RiskLevel::Risky);
        assert!(prompt.contains("High-Risk, High-Reward Hunter"));
        assert!(prompt.contains("- Token Status: Tokenless project (+3)"));
        assert!(prompt.contains("above 17 (out of a maximum of 27)"));
        assert!(prompt.contains("\"High Potential Gem\""));
    }

    #[test]
    fn test_rubrics_have_fifteen_criteria() {
        for level in RiskLevel::ALL {
            assert_eq!(profile(level).rubric.len(), 15, "{level}");
        }
    }

    #[test]
    fn test_custom_prompt_lists_filters_in_order() {
        let filters = vec!["Team Transparency".to_string(), " VC Funding ".to_string()];
        let prompt = build_custom_prompt(&filters).unwrap();
        let team = prompt.find("- Team Transparency").unwrap();
        let vc = prompt.find("- VC Funding").unwrap();
        assert!(team < vc);
    }

    #[test]
    fn test_custom_prompt_rejects_blank_filters() {
        let filters = vec!["   ".to_string()];
        assert!(matches!(
            build_custom_prompt(&filters),
            Err(AnalysisError::EmptyFilters)
        ));
    }
}
