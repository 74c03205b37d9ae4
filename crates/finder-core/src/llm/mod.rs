mod error;
mod gemini;

pub use error::LLMError;
pub use gemini::GeminiClient;

use async_trait::async_trait;

use crate::analysis::GroundingSource;

/// Raw answer from a search-grounded completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroundedResponse {
    /// Free-form model output.
    pub text: String,
    /// Web pages the model cited, in the order the service listed them.
    pub sources: Vec<GroundingSource>,
}

impl GroundedResponse {
    pub fn new(text: impl Into<String>, sources: Vec<GroundingSource>) -> Self {
        Self {
            text: text.into(),
            sources,
        }
    }
}

/// Trait for generative AI services that can answer with live web search.
///
/// The analysis runner only depends on this trait, so tests and alternative
/// backends can stand in for the real service.
///
/// # Example
///
/// ```ignore
/// use finder_core::llm::{GeminiClient, LLM};
///
/// let llm = GeminiClient::from_config(&config.llm)?;
/// let response = llm.search("Find a token-less project...").await?;
/// println!("{} ({} sources)", response.text, response.sources.len());
/// ```
#[async_trait]
pub trait LLM: Send + Sync {
    /// Run one prompt with search grounding and return text plus citations.
    async fn search(&self, prompt: &str) -> Result<GroundedResponse, LLMError>;
}

/// Blanket implementation for boxed trait objects.
#[async_trait]
impl LLM for Box<dyn LLM> {
    async fn search(&self, prompt: &str) -> Result<GroundedResponse, LLMError> {
        (**self).search(prompt).await
    }
}
