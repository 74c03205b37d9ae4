use thiserror::Error;

use crate::llm::LLMError;

/// Errors that end an analysis request.
///
/// The display text of each variant is what the user sees in the error
/// banner; the underlying detail is kept for logs.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("API key is not configured.")]
    Config,

    #[error("An error occurred while communicating with the AI. Please try again.")]
    Communication(#[source] LLMError),

    #[error("Failed to parse the analysis from the AI. The format was unexpected.")]
    Parse(#[source] serde_json::Error),

    #[error("Select at least one filter before searching.")]
    EmptyFilters,
}

impl AnalysisError {
    /// Longer description including the underlying cause, for logs.
    pub fn detail(&self) -> String {
        match self {
            AnalysisError::Communication(e) => format!("{self} ({e})"),
            AnalysisError::Parse(e) => format!("{self} ({e})"),
            _ => self.to_string(),
        }
    }
}

impl From<LLMError> for AnalysisError {
    fn from(err: LLMError) -> Self {
        match err {
            LLMError::MissingApiKey => AnalysisError::Config,
            other => AnalysisError::Communication(other),
        }
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::Parse(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_config_error() {
        let err: AnalysisError = LLMError::MissingApiKey.into();
        assert!(matches!(err, AnalysisError::Config));
        assert_eq!(err.to_string(), "API key is not configured.");
    }

    #[test]
    fn test_other_llm_errors_are_communication() {
        let err: AnalysisError = LLMError::RateLimited.into();
        assert!(matches!(err, AnalysisError::Communication(_)));
        assert!(err.detail().contains("Rate limited"));
    }
}
