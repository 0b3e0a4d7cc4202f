/// LLM Client — the single point of entry for the Anthropic API call made by
/// the keyword extractor.
///
/// ARCHITECTURAL RULE: no other module may call the Anthropic API directly.
///
/// The client makes exactly one request per `complete` call. Retry policy
/// lives with the caller (the extractor changes the prompt on its one retry,
/// so a generic retry loop here would be wrong).
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::JdAnalysisError;

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// Intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 2048;
/// Hard deadline for the extraction call. The request is abandoned (not
/// merely ignored) when it expires, freeing the connection.
const REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct LlmResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

impl LlmResponse {
    fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

/// Thin wrapper over the Anthropic Messages API.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LlmClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, JdAnalysisError> {
        Self::with_base_url(api_key, ANTHROPIC_API_URL)
    }

    /// Points the client at an alternate endpoint (a proxy, or a local stub
    /// server in tests).
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, JdAnalysisError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }

    /// Sends one user message under the given system instruction and returns
    /// the first text block of the response. Fails on timeout, non-2xx
    /// status, or a response with no text content.
    pub async fn complete(&self, prompt: &str, system: &str) -> Result<String, JdAnalysisError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.base_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JdAnalysisError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let llm_response: LlmResponse = response
            .json()
            .await
            .map_err(JdAnalysisError::Http)?;

        let text = llm_response.text().ok_or(JdAnalysisError::EmptyContent)?;
        debug!("LLM call succeeded ({} chars)", text.len());
        Ok(text.to_string())
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
