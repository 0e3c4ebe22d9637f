//! OpenAI Backend
//!
//! Implementation of the TextGenerationBackend trait for OpenAI's chat
//! completions API.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use codesense_core::GenerationContext;

use super::backend::{missing_api_key_error, parse_http_error, TextGenerationBackend};
use super::types::{BackendConfig, GenerationOutput, LlmError, LlmResult, UsageStats};

/// Default OpenAI API endpoint
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI backend
pub struct OpenAiBackend {
    config: BackendConfig,
    client: reqwest::Client,
}

impl OpenAiBackend {
    /// Create a new OpenAI backend with the given configuration
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Get the API base URL
    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(OPENAI_API_URL)
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
            "**Code to analyze:**\n```{}\n{}\n```\n\n**User Request:** {}\n\nPlease provide your response with clear explanations and properly formatted code.",
            context.language, code, user_prompt
        );

        serde_json::json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_content }
            ],
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "presence_penalty": 0.1,
            "frequency_penalty": 0.1
        })
    }
}

#[async_trait]
impl TextGenerationBackend for OpenAiBackend {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn label(&self) -> String {
        if self.config.model.starts_with("gpt-4") {
            "OpenAI GPT-4".to_string()
        } else {
            "OpenAI GPT-3.5".to_string()
        }
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
            .ok_or_else(|| missing_api_key_error("openai"))?;

        let body = self.build_request_body(system_prompt, user_prompt, code, context);

        debug!(model = %self.config.model, "POST {}", self.base_url());
        let response = self
            .client
            .post(self.base_url())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::NetworkError {
                message: format!("OpenAI API request failed: {}", e),
            })?;

        let status = response.status().as_u16();
        let body_text = response.text().await.map_err(|e| LlmError::NetworkError {
            message: e.to_string(),
        })?;

        if status != 200 {
            return Err(parse_http_error(status, &body_text, "openai"));
        }

        let parsed: ChatCompletionResponse =
            serde_json::from_str(&body_text).map_err(|e| LlmError::ParseError {
                message: format!("Failed to parse OpenAI response: {}", e),
            })?;

        if let Some(error) = parsed.error {
            return Err(LlmError::ServerError {
                message: error.message,
                status: None,
            });
        }

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmError::ParseError {
                message: "OpenAI response contained no choices".to_string(),
            })?;

        Ok(GenerationOutput {
            content,
            provider: self.label(),
            usage: parsed.usage.map(|u| UsageStats {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            }),
        })
    }

    async fn health_check(&self) -> LlmResult<()> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| missing_api_key_error("openai"))?;

        let body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": 1,
            "messages": [{ "role": "user", "content": "Hi" }]
        });

        let response = self
            .client
            .post(self.base_url())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            let body_text = response.text().await.unwrap_or_default();
            return Err(parse_http_error(status, &body_text, "openai"));
        }

        Ok(())
    }
}

/// Response body for `/v1/chat/completions` (non-streaming, subset).
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}
