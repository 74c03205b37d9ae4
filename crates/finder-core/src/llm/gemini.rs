use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{GroundedResponse, LLMError, LLM};
use crate::analysis::GroundingSource;
use crate::config::{
    LLMConfig, DEFAULT_GEMINI_MODEL, DEFAULT_GEMINI_URL, DEFAULT_SOURCE_TITLE, DEFAULT_TEMPERATURE,
};

/// Google Gemini `generateContent` client with the Google Search tool.
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    search_enabled: bool,
    client: Client,
}

impl GeminiClient {
    /// Creates a new client with the given API key and default settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_GEMINI_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            search_enabled: true,
            client: Client::new(),
        }
    }

    /// Creates a client from configuration.
    ///
    /// Fails with [`LLMError::MissingApiKey`] when no non-blank key is set.
    pub fn from_config(config: &LLMConfig) -> Result<Self, LLMError> {
        let api_key = config.api_key().ok_or(LLMError::MissingApiKey)?;

        let mut client = Self::new(api_key)
            .with_model(config.model_or_default())
            .with_base_url(config.base_url_or_default())
            .with_temperature(config.temperature)
            .with_search(config.search_enabled);

        if let Some(secs) = config.timeout_secs {
            client = client.with_timeout(Duration::from_secs(secs))?;
        }

        Ok(client)
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the API base URL (for proxies or tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Enables or disables the Google Search tool.
    pub fn with_search(mut self, enabled: bool) -> Self {
        self.search_enabled = enabled;
        self
    }

    /// Sets a whole-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, LLMError> {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LLMError::RequestFailed(e.to_string()))?;
        Ok(self)
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    async fn send_request(&self, request: &GenerateRequest) -> Result<GroundedResponse, LLMError> {
        tracing::debug!(model = %self.model, search = self.search_enabled, "sending generateContent request");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();

        if status == 429 {
            return Err(LLMError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LLMError::ApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| LLMError::ParseError(e.to_string()))?;

        let grounded = body.into_grounded();
        tracing::debug!(
            chars = grounded.text.len(),
            sources = grounded.sources.len(),
            "received generateContent response"
        );

        Ok(grounded)
    }
}

#[async_trait]
impl LLM for GeminiClient {
    async fn search(&self, prompt: &str) -> Result<GroundedResponse, LLMError> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            tools: if self.search_enabled {
                Some(vec![Tool {
                    google_search: GoogleSearch {},
                }])
            } else {
                None
            },
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        self.send_request(&request).await
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct GroundingMetadata {
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WebChunk {
    uri: Option<String>,
    title: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate plus its usable web citations.
    fn into_grounded(self) -> GroundedResponse {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return GroundedResponse::default();
        };

        let text = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let sources = candidate
            .grounding_metadata
            .map(|m| {
                m.grounding_chunks
                    .into_iter()
                    .filter_map(|chunk| chunk.web)
                    .filter_map(|web| {
                        let uri = web.uri.filter(|u| !u.trim().is_empty())?;
                        let title = web
                            .title
                            .filter(|t| !t.trim().is_empty())
                            .unwrap_or_else(|| DEFAULT_SOURCE_TITLE.to_string());
                        Some(GroundingSource { title, uri })
                    })
                    .collect()
            })
            .unwrap_or_default();

        GroundedResponse { text, sources }
    }
}
