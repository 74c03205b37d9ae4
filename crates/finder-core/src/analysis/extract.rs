//! Pulls the JSON payload out of free-form model output.

use super::error::AnalysisError;
use super::model::AnalysisPayload;

/// Locates the JSON object inside a model response.
///
/// Takes everything from the first `{` to the last `}`. When there is no
/// such pair, falls back to peeling a leading ```` ```json ```` and a
/// trailing ```` ``` ```` marker off the trimmed text.
///
/// Unrelated braces in surrounding prose widen the span and will make the
/// parse fail; that is accepted.
pub fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if end > start {
            return &trimmed[start..=end];
        }
    }

    let without_open = trimmed.strip_prefix("```json").unwrap_or(trimmed);
    without_open.strip_suffix("```").unwrap_or(without_open)
}

/// Extracts and decodes the analysis payload from a model response.
pub fn parse_payload(response: &str) -> Result<AnalysisPayload, AnalysisError> {
    let json_str = extract_json(response);
    Ok(serde_json::from_str(json_str)?)
}
