//! Google Gemini remote classifier implementation.

use std::time::Duration;

use async_trait::async_trait;
use backon::Retryable;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use oped_core::error::{OpedError, OpedResult};
use oped_core::traits::{ClassifierConfig, RemoteClassifier};
use oped_core::types::Judgment;

use crate::prompt::classification_prompt;
use crate::response::parse_judgment;

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Gemini classifier over the generateContent endpoint in JSON mode.
///
/// Transport failures, including non-2xx statuses, are retried under the
/// configured policy. A delivered-but-garbled payload is not retried; it
/// surfaces as a parse error for the caller's keyword fallback.
pub struct GeminiClassifier {
    client: Client,
    config: ClassifierConfig,
    base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

impl GeminiClassifier {
    /// Create a new Gemini classifier.
    pub fn new(config: ClassifierConfig) -> OpedResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .ok_or_else(|| {
                OpedError::config("Gemini API key not found. Set GEMINI_API_KEY environment variable or provide api_key in config.")
            })?;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            api_key
                .parse()
                .map_err(|_| OpedError::config("Invalid API key format"))?,
        );
        headers.insert(
            "content-type",
            "application/json"
                .parse()
                .map_err(|_| OpedError::config("Invalid content type"))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OpedError::config(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| GEMINI_API_URL.to_string());

        let mut config = config;
        if config.model.is_empty() {
            config.model = DEFAULT_MODEL.to_string();
        }

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    /// One generateContent round trip. Every failure mode here is transport:
    /// connect errors, timeouts, unreadable bodies, and non-2xx statuses.
    async fn fetch_raw(&self, prompt: &str) -> OpedResult<String> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.config.model
            ))
            .json(&request)
            .send()
            .await
            .map_err(|e| OpedError::transport(format!("Gemini API request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| OpedError::transport(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            let error: Result<GeminiError, _> = serde_json::from_str(&body);
            let message = error
                .map(|e| e.error.message)
                .unwrap_or_else(|_| body.clone());
            return Err(OpedError::transport(format!(
                "Gemini API error ({}): {}",
                status, message
            )));
        }

        Ok(body)
    }

    /// Pull the first candidate's text out of the response envelope.
    fn candidate_text(body: &str) -> OpedResult<String> {
        let response: GeminiResponse = serde_json::from_str(body).map_err(|e| {
            OpedError::response_parse(format!("Malformed response envelope: {}", e))
        })?;

        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|text| !text.is_empty())
            .ok_or_else(|| OpedError::response_parse("Response carried no candidate text"))
    }
}

#[async_trait]
impl RemoteClassifier for GeminiClassifier {
    async fn classify(&self, text: &str) -> OpedResult<Judgment> {
        let prompt = classification_prompt(text, self.config.prompt_budget);

        let fetch = || async { self.fetch_raw(&prompt).await };
        let body = fetch
            .retry(self.config.retry.backoff())
            .when(|e| e.is_transport())
            .notify(|err, dur| {
                warn!(
                    "Gemini call with model {} failed, retrying in {:?}: {}",
                    self.config.model, dur, err
                );
            })
            .await?;

        let answer = Self::candidate_text(&body)?;
        parse_judgment(&answer)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
