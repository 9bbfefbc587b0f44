use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use nb_core::{AnalysisResult, Error, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{parse_analysis, AnalysisModel, BIAS_PLACEHOLDER, SUMMARY_PLACEHOLDER};
use crate::Config;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const MODEL_ID: &str = "gemini-1.5-flash";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_OUTPUT_TOKENS: u32 = 300;
const TEMPERATURE: f32 = 0.7;
const MAX_DIAGNOSTIC_CHARS: usize = 200;

const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
    #[serde(rename = "safetySettings")]
    safety_settings: Vec<SafetySetting>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct SafetySetting {
    category: String,
    threshold: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

pub struct GeminiModel {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl GeminiModel {
    /// The credential is checked per call, not here, so a keyless process
    /// still starts and reports the configuration error per request.
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key: config.api_key.filter(|key| !key.is_empty()),
            base_url: config
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }

    fn build_prompt(text: &str) -> String {
        format!(
            "You are an expert news analyst. Analyze this article content and provide:\n\n\
             1) A 2-3 sentence summary\n\
             2) Political bias assessment (Left-Leaning/Neutral/Right-Leaning/Conservative) with brief explanation\n\n\
             Format your response exactly as:\n\
             SUMMARY: [your summary here]\n\
             BIAS: [bias assessment and explanation]\n\n\
             Article content: {text}"
        )
    }
}

impl fmt::Debug for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl AnalysisModel for GeminiModel {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn analyze(&self, text: &str) -> Result<AnalysisResult> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Configuration("Gemini API key not configured".to_string()))?;

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Self::build_prompt(text),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: MAX_OUTPUT_TOKENS,
                temperature: TEMPERATURE,
            },
            safety_settings: SAFETY_CATEGORIES
                .iter()
                .map(|category| SafetySetting {
                    category: category.to_string(),
                    threshold: "BLOCK_MEDIUM_AND_ABOVE".to_string(),
                })
                .collect(),
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, MODEL_ID);
        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Gemini API returned an error");
            return Err(Error::Upstream {
                status: status.as_u16(),
                body: body.chars().take(MAX_DIAGNOSTIC_CHARS).collect(),
            });
        }

        let payload: GenerateResponse = response.json().await?;
        match candidate_text(payload) {
            Ok(reply) => {
                debug!(length = reply.len(), "received analysis reply");
                Ok(parse_analysis(&reply))
            }
            Err(e) => {
                warn!(error = %e, "recovering from malformed AI reply");
                Ok(AnalysisResult {
                    summary: SUMMARY_PLACEHOLDER.to_string(),
                    bias: BIAS_PLACEHOLDER.to_string(),
                })
            }
        }
    }
}

fn candidate_text(payload: GenerateResponse) -> Result<String> {
    payload
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .map(|part| part.text)
        .ok_or_else(|| Error::MalformedResponse("no candidate text".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::{Json, Router};
    use std::collections::HashMap;

    fn model_for(base_url: &str, api_key: Option<&str>) -> GeminiModel {
        GeminiModel::new(Config {
            api_key: api_key.map(str::to_string),
            model_name: None,
            base_url: Some(base_url.to_string()),
        })
        .unwrap()
    }

    async fn spawn_upstream(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn reply_with(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": text}]}}]
        })
    }

    #[tokio::test]
    async fn parses_labeled_reply_from_upstream() {
        let app = Router::new().fallback(
            |Query(params): Query<HashMap<String, String>>| async move {
                if params.get("key").map(String::as_str) != Some("test-key") {
                    return Err(StatusCode::UNAUTHORIZED);
                }
                Ok(Json(reply_with(
                    "SUMMARY: Test summary.\nBIAS: Neutral, balanced reporting.",
                )))
            },
        );
        let base = spawn_upstream(app).await;

        let model = model_for(&base, Some("test-key"));
        let result = model.analyze("Some article text.").await.unwrap();

        assert_eq!(result.summary, "Test summary.");
        assert_eq!(result.bias, "Neutral, balanced reporting.");
    }

    #[tokio::test]
    async fn reply_missing_bias_section_gets_placeholder() {
        let app = Router::new()
            .fallback(|| async { Json(reply_with("SUMMARY: Just the summary.")) });
        let base = spawn_upstream(app).await;

        let model = model_for(&base, Some("test-key"));
        let result = model.analyze("Some article text.").await.unwrap();

        assert_eq!(result.summary, "Just the summary.");
        assert_eq!(result.bias, BIAS_PLACEHOLDER);
    }

    #[tokio::test]
    async fn upstream_429_surfaces_status_and_excerpt() {
        let long_body = "rate limited ".repeat(100);
        let app = Router::new().fallback(move || {
            let body = long_body.clone();
            async move { (StatusCode::TOO_MANY_REQUESTS, body) }
        });
        let base = spawn_upstream(app).await;

        let model = model_for(&base, Some("test-key"));
        let err = model.analyze("Some article text.").await.unwrap_err();

        match &err {
            Error::Upstream { status, body } => {
                assert_eq!(*status, 429);
                assert!(body.chars().count() <= MAX_DIAGNOSTIC_CHARS);
                assert!(body.starts_with("rate limited"));
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
        assert!(err.to_string().contains("429"));
    }

    #[tokio::test]
    async fn reply_without_candidates_recovers_to_placeholders() {
        let app = Router::new()
            .fallback(|| async { Json(serde_json::json!({"candidates": []})) });
        let base = spawn_upstream(app).await;

        let model = model_for(&base, Some("test-key"));
        let result = model.analyze("Some article text.").await.unwrap();

        assert_eq!(result.summary, SUMMARY_PLACEHOLDER);
        assert_eq!(result.bias, BIAS_PLACEHOLDER);
    }

    #[tokio::test]
    async fn missing_api_key_is_a_configuration_error() {
        // Closed port: a configuration failure must precede any request.
        let model = model_for("http://127.0.0.1:1", None);
        let err = model.analyze("Some article text.").await.unwrap_err();

        assert!(matches!(err, Error::Configuration(_)));
        assert_eq!(err.to_string(), "Gemini API key not configured");
    }

    #[tokio::test]
    async fn empty_api_key_is_a_configuration_error() {
        let model = model_for("http://127.0.0.1:1", Some(""));
        let err = model.analyze("Some article text.").await.unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn debug_redacts_the_api_key() {
        let model = model_for("http://localhost", Some("super-secret"));
        let rendered = format!("{model:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn prompt_embeds_the_article_text() {
        let prompt = GeminiModel::build_prompt("The extracted article body.");
        assert!(prompt.ends_with("Article content: The extracted article body."));
        assert!(prompt.contains("SUMMARY: [your summary here]"));
        assert!(prompt.contains("BIAS: [bias assessment and explanation]"));
    }
}
