use finder_core::{
    AnalysisError, AnalysisRunner, GeminiClient, GroundingSource, LLMConfig, LLMError, RiskLevel,
    LLM,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/models/gemini-test:generateContent";

fn client(server: &MockServer) -> GeminiClient {
    GeminiClient::new("test-key")
        .with_base_url(server.uri())
        .with_model("gemini-test")
}

fn candidate(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "groundingMetadata": {
                "groundingChunks": [
                    { "web": { "uri": "https://news.example/foo", "title": "Foo raises seed" } },
                    { "web": { "uri": "https://x.example/status/1" } },
                    { "web": { "title": "dangling" } }
                ]
            }
        }]
    })
}

mod gemini {
    use super::*;

    #[tokio::test]
    async fn test_request_carries_key_search_tool_and_temperature() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "contents": [{ "role": "user", "parts": [{ "text": "find one" }] }],
                "tools": [{ "google_search": {} }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate("{}")))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server).search("find one").await.unwrap();
        assert_eq!(response.text, "{}");

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let temperature = body["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.1).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_search_disabled_omits_tools() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate("{}")))
            .mount(&server)
            .await;

        client(&server).with_search(false).search("p").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert!(body.get("tools").is_none());
    }

    #[tokio::test]
    async fn test_sources_are_cleaned() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate("text")))
            .mount(&server)
            .await;

        let response = client(&server).search("p").await.unwrap();
        assert_eq!(
            response.sources,
            vec![
                GroundingSource::new("Foo raises seed", "https://news.example/foo"),
                GroundingSource::new("Source", "https://x.example/status/1"),
            ]
        );
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let result = client(&server).search("p").await;
        assert!(matches!(result, Err(LLMError::RateLimited)));
    }

    #[tokio::test]
    async fn test_api_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
            .expect(1)
            .mount(&server)
            .await;

        let result = client(&server).search("p").await;
        match result {
            Err(LLMError::ApiError { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "backend exploded");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_garbled_envelope_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let result = client(&server).search("p").await;
        assert!(matches!(result, Err(LLMError::ParseError(_))));
    }

    #[test]
    fn test_from_config_without_key() {
        let config = LLMConfig {
            api_key: None,
            ..Default::default()
        };
        assert!(matches!(
            GeminiClient::from_config(&config),
            Err(LLMError::MissingApiKey)
        ));
    }
}

mod runner {
    use super::*;

    #[tokio::test]
    async fn test_end_to_end_analysis() {
        let server = MockServer::start().await;
        let text = r#"Here is the analysis:
```json
{
  "projectName": "Foo Protocol",
  "twitterUrl": "https://x.com/foo",
  "iconUrl": "https://foo.example/icon.png",
  "overallScore": 78,
  "scoreRationale": "High Potential Gem",
  "founders": [{"name": "Ada Lovelace", "achievements": "Built things", "imageUrl": "", "profileUrl": ""}],
  "filterAnalysis": [{"filterName": "VC Funding", "description": "None raised", "verdict": "Positive", "level": "None"}],
  "airdropTasks": ["Use the testnet"],
  "primeSource": {"title": "Analyst likes Foo", "uri": "https://x.com/analyst/status/9"}
}
```"#;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate(text)))
            .mount(&server)
            .await;

        let runner = AnalysisRunner::new(client(&server));
        let result = runner.run(&RiskLevel::Risky.into()).await.unwrap();

        assert_eq!(result.project_name, "Foo Protocol");
        assert_eq!(result.overall_score, 78);
        assert_eq!(result.founders[0].initials(), "AL");
        assert_eq!(result.airdrop_tasks, vec!["Use the testnet".to_string()]);
        assert_eq!(result.grounding_attribution.len(), 2);
        assert_eq!(
            result.prime_source,
            Some(GroundingSource::new(
                "Analyst likes Foo",
                "https://x.com/analyst/status/9"
            ))
        );
    }

    #[tokio::test]
    async fn test_server_error_maps_to_communication() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let runner = AnalysisRunner::new(client(&server));
        let err = runner.run(&RiskLevel::Safest.into()).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Communication(_)));
        assert_eq!(
            err.to_string(),
            "An error occurred while communicating with the AI. Please try again."
        );
    }

    #[test]
    fn test_from_config_without_key_is_config_error() {
        let result = AnalysisRunner::from_config(&LLMConfig::default());
        assert!(matches!(result, Err(AnalysisError::Config)));
    }
}
