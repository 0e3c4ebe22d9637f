//! Anthropic Claude Backend
//!
//! Implementation of the TextGenerationBackend trait for Anthropic's
//! Claude messages API.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use codesense_core::GenerationContext;

use super::backend::{missing_api_key_error, parse_http_error, TextGenerationBackend};
use super::types::{BackendConfig, GenerationOutput, LlmError, LlmResult, UsageStats};

/// Default Anthropic API endpoint
const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Current API version
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Claude backend
pub struct ClaudeBackend {
    config: BackendConfig,
    client: reqwest::Client,
}

impl ClaudeBackend {
    /// Create a new Claude backend with the given configuration
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Get the API base URL
    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(ANTHROPIC_API_URL)
    }

    /// Build the request body for the API
    fn build_request_body(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        code: &str,
        context: &GenerationContext,
    ) -> serde_json::Value {
        let user_content = format!(
            "**Code Context:**\n```{}\n{}\n```\n\n**User Request:** {}",
            context.language, code, user_prompt
        );

        serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "system": system_prompt,
            "messages": [{ "role": "user", "content": user_content }]
        })
    }
}

#[async_trait]
impl TextGenerationBackend for ClaudeBackend {
    fn name(&self) -> &'static str {
        "claude"
    }

    fn label(&self) -> String {
        "Anthropic Claude".to_string()
    }

    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        code: &str,
        context: &GenerationContext,
    ) -> LlmResult<GenerationOutput> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| missing_api_key_error("claude"))?;

        let body = self.build_request_body(system_prompt, user_prompt, code, context);

        debug!(model = %self.config.model, "POST {}", self.base_url());
        let response = self
            .client
            .post(self.base_url())
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::NetworkError {
                message: format!("Claude API request failed: {}", e),
            })?;

        let status = response.status().as_u16();
        let body_text = response.text().await.map_err(|e| LlmError::NetworkError {
            message: e.to_string(),
        })?;

        if status != 200 {
            return Err(parse_http_error(status, &body_text, "claude"));
        }

        let parsed: ClaudeResponse =
            serde_json::from_str(&body_text).map_err(|e| LlmError::ParseError {
                message: format!("Failed to parse Claude response: {}", e),
            })?;

        if let Some(error) = parsed.error {
            return Err(LlmError::ServerError {
                message: error.message,
                status: None,
            });
        }

        let content = parsed
            .content
            .into_iter()
            .find_map(|block| block.text)
            .ok_or_else(|| LlmError::ParseError {
                message: "Claude response contained no text block".to_string(),
            })?;

        Ok(GenerationOutput {
            content,
            provider: self.label(),
            usage: parsed.usage.map(|u| UsageStats {
                input_tokens: u.input_tokens,
                output_tokens: u.output_tokens,
            }),
        })
    }

    async fn health_check(&self) -> LlmResult<()> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| missing_api_key_error("claude"))?;

        // Minimal request to verify the API key
        let body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": 1,
            "messages": [{ "role": "user", "content": "Hi" }]
        });

        let response = self
            .client
            .post(self.base_url())
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            let body_text = response.text().await.unwrap_or_default();
            return Err(parse_http_error(status, &body_text, "claude"));
        }

        Ok(())
    }
}

/// Response body for `/v1/messages` (subset).
#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    #[serde(default)]
    content: Vec<ClaudeContentBlock>,
    #[serde(default)]
    usage: Option<ClaudeUsage>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ClaudeContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClaudeUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}
