use tokio::sync::mpsc;

use crate::config::LLMConfig;
use crate::llm::{GeminiClient, LLM};

use super::criteria::Criteria;
use super::error::AnalysisError;
use super::extract::parse_payload;
use super::model::AnalysisResult;
use super::prompts::build_prompt;

/// Progress updates emitted while an analysis runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisProgress {
    Started,
    BuildingPrompt,
    CallingService,
    ParsingResponse { sources: usize },
    Complete,
    Error(String),
}

/// Runs one analysis: build the prompt, call the service once, extract the
/// payload and attach the cited sources.
pub struct AnalysisRunner<L: LLM> {
    llm: L,
}

impl AnalysisRunner<GeminiClient> {
    /// Creates a runner backed by Gemini, as configured.
    pub fn from_config(config: &LLMConfig) -> Result<Self, AnalysisError> {
        Ok(Self::new(GeminiClient::from_config(config)?))
    }
}

impl<L: LLM> AnalysisRunner<L> {
    pub fn new(llm: L) -> Self {
        Self { llm }
    }

    /// Runs the analysis for the given criteria.
    pub async fn run(&self, criteria: &Criteria) -> Result<AnalysisResult, AnalysisError> {
        let (tx, _rx) = mpsc::unbounded_channel();
        self.run_with_progress(criteria, tx).await
    }

    /// Runs the analysis, reporting each step through `progress`.
    ///
    /// Exactly one request is sent; there is no retry.
    pub async fn run_with_progress(
        &self,
        criteria: &Criteria,
        progress: mpsc::UnboundedSender<AnalysisProgress>,
    ) -> Result<AnalysisResult, AnalysisError> {
        let _ = progress.send(AnalysisProgress::Started);

        let result = self.execute(criteria, &progress).await;

        match &result {
            Ok(analysis) => {
                tracing::info!(
                    project = %analysis.project_name,
                    score = analysis.overall_score,
                    "analysis complete"
                );
                let _ = progress.send(AnalysisProgress::Complete);
            }
            Err(e) => {
                tracing::error!(criteria = %criteria.describe(), "analysis failed: {}", e.detail());
                let _ = progress.send(AnalysisProgress::Error(e.to_string()));
            }
        }

        result
    }

    async fn execute(
        &self,
        criteria: &Criteria,
        progress: &mpsc::UnboundedSender<AnalysisProgress>,
    ) -> Result<AnalysisResult, AnalysisError> {
        let _ = progress.send(AnalysisProgress::BuildingPrompt);
        let prompt = build_prompt(criteria)?;

        let _ = progress.send(AnalysisProgress::CallingService);
        tracing::info!(criteria = %criteria.describe(), "requesting analysis");
        let response = self.llm.search(&prompt).await?;

        let _ = progress.send(AnalysisProgress::ParsingResponse {
            sources: response.sources.len(),
        });
        let payload = parse_payload(&response.text)?;

        Ok(payload.into_result(response.sources))
    }
}
