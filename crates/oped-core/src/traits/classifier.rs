//! Remote classifier trait and configuration.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::OpedResult;
use crate::retry::RetryPolicy;
use crate::types::Judgment;

/// Remote page classifier - all LLM providers implement this.
///
/// `classify` resolves to a structured [`Judgment`] or to one of two error
/// classes: a transport failure (after the provider's own retries are
/// exhausted) or an unparseable payload. Callers treat both as a signal to
/// fall back, never as a reason to abort.
#[async_trait]
pub trait RemoteClassifier: Send + Sync {
    /// Classify one page of text.
    async fn classify(&self, text: &str) -> OpedResult<Judgment>;

    /// Get the model name.
    fn model_name(&self) -> &str;
}

/// Remote classifier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Model name/identifier. Empty means the provider default.
    #[serde(default)]
    pub model: String,
    /// API key (if not using environment variable).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL for API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Maximum number of page-text chars embedded in the prompt.
    #[serde(default = "default_prompt_budget")]
    pub prompt_budget: usize,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Retry policy for transport failures.
    #[serde(default)]
    pub retry: RetryPolicy,
}

fn default_prompt_budget() -> usize {
    10_000
}

fn default_timeout() -> u64 {
    30
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model: String::new(),
            api_key: None,
            base_url: None,
            prompt_budget: default_prompt_budget(),
            timeout_secs: default_timeout(),
            retry: RetryPolicy::default(),
        }
    }
}
