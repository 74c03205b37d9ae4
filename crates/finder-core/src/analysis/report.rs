use crate::config::NO_AIRDROP_TASKS_MESSAGE;

use super::model::AnalysisResult;

impl AnalysisResult {
    /// Converts the analysis to a markdown report.
    ///
    /// Every section tolerates empty fields, since the payload is trusted
    /// as returned by the service.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        let name = if self.project_name.is_empty() {
            "Unnamed project"
        } else {
            &self.project_name
        };
        md.push_str(&format!("# {}\n\n", name));

        if !self.twitter_url.is_empty() {
            md.push_str(&format!("{}\n\n", self.twitter_url));
        }

        md.push_str(&format!("**Score: {}/100**\n\n", self.overall_score));
        if !self.score_rationale.is_empty() {
            md.push_str(&format!("Quick verdict: {}\n\n", self.score_rationale));
        }

        if let Some(source) = &self.prime_source {
            md.push_str("## Prime Source\n\n");
            md.push_str(&format!("> {}\n\n{}\n\n", source.title, source.uri));
        }

        if !self.founders.is_empty() {
            md.push_str("## Founders\n\n");
            for founder in &self.founders {
                md.push_str(&format!("### {}\n\n", founder.name));
                if !founder.profile_url.is_empty() {
                    md.push_str(&format!("{}\n\n", founder.profile_url));
                }
                md.push_str(&founder.achievements);
                md.push_str("\n\n");
            }
        }

        if !self.filter_analysis.is_empty() {
            md.push_str("## Filter Analysis\n\n");
            for filter in &self.filter_analysis {
                md.push_str(&format!(
                    "### {} ({} - {})\n\n",
                    filter.filter_name, filter.verdict, filter.level
                ));
                md.push_str(&filter.description);
                md.push_str("\n\n");
            }
        }

        md.push_str("## Airdrop Tasks\n\n");
        if self.airdrop_tasks.is_empty() {
            md.push_str(NO_AIRDROP_TASKS_MESSAGE);
            md.push('\n');
        } else {
            for (i, task) in self.airdrop_tasks.iter().enumerate() {
                md.push_str(&format!("{}. {}\n", i + 1, task));
            }
        }
        md.push('\n');

        if !self.grounding_attribution.is_empty() {
            md.push_str("## Sources\n\n");
            for source in &self.grounding_attribution {
                md.push_str(&format!("- [{}]({})\n", source.title, source.uri));
            }
        }

        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{FilterAnalysis, GroundingSource, Verdict};

    #[test]
    fn test_markdown_sections() {
        let mut result = AnalysisResult::new("Foo Protocol");
        result.overall_score = 81;
        result.score_rationale = "High Potential Gem".to_string();
        result.filter_analysis.push(FilterAnalysis {
            filter_name: "VC Funding".to_string(),
            description: "Bootstrapped.".to_string(),
            verdict: Verdict::Positive,
            level: "None".to_string(),
        });
        result.airdrop_tasks.push("Bridge to testnet".to_string());
        result
            .grounding_attribution
            .push(GroundingSource::new("Blog", "https://foo.example/blog"));

        let md = result.to_markdown();
        assert!(md.starts_with("# Foo Protocol\n"));
        assert!(md.contains("**Score: 81/100**"));
        assert!(md.contains("### VC Funding (Positive - None)"));
        assert!(md.contains("1. Bridge to testnet"));
        assert!(md.contains("- [Blog](https://foo.example/blog)"));
        assert!(!md.contains("## Prime Source"));
    }

    #[test]
    fn test_markdown_without_tasks() {
        let md = AnalysisResult::new("").to_markdown();
        assert!(md.contains("# Unnamed project"));
        assert!(md.contains(NO_AIRDROP_TASKS_MESSAGE));
    }
}
