//! Ollama Backend
//!
//! Thin client for local Ollama inference over the non-streaming
//! `POST {endpoint}/api/generate` route. No API key is required; the
//! backend is "unavailable" rather than "unauthenticated" when the local
//! server is not running.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use codesense_core::GenerationContext;

use super::backend::{parse_http_error, snippet, TextGenerationBackend};
use super::types::{BackendConfig, GenerationOutput, LlmError, LlmResult, UsageStats};

/// Default Ollama API endpoint
const OLLAMA_DEFAULT_URL: &str = "http://localhost:11434";

/// Token budget for local generation
const OLLAMA_NUM_PREDICT: u32 = 1000;

/// Ollama backend for local inference
pub struct OllamaBackend {
    config: BackendConfig,
    client: reqwest::Client,
}

impl OllamaBackend {
    /// Create a new Ollama backend with the given configuration
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Get the base URL for the Ollama server
    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(OLLAMA_DEFAULT_URL)
    }

    /// URL of the generate route
    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url().trim_end_matches('/'))
    }

    /// Build the single combined prompt for `/api/generate`
    fn build_prompt(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        code: &str,
        context: &GenerationContext,
    ) -> String {
        format!(
            "{}\n\nCode Context ({}):\n```\n{}\n```\n\nUser Request: {}\n\nResponse:",
            system_prompt, context.language, code, user_prompt
        )
    }
}

#[async_trait]
impl TextGenerationBackend for OllamaBackend {
    fn name(&self) -> &'static str {
        "ollama"
    }

    fn label(&self) -> String {
        "Ollama (Local)".to_string()
    }

    fn requires_api_key(&self) -> bool {
        false
    }

    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        code: &str,
        context: &GenerationContext,
    ) -> LlmResult<GenerationOutput> {
        let body = OllamaGenerateRequest {
            model: &self.config.model,
            prompt: self.build_prompt(system_prompt, user_prompt, code, context),
            stream: false,
            options: OllamaOptions {
                temperature: self.config.temperature,
                num_predict: OLLAMA_NUM_PREDICT,
            },
        };

        let url = self.generate_url();
        debug!(model = %self.config.model, "POST {}", url);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ProviderUnavailable {
                message: format!(
                    "Ollama connection failed. Make sure Ollama is running locally: {}",
                    e
                ),
            })?;

        let status = response.status().as_u16();
        let body_text = response.text().await.map_err(|e| LlmError::NetworkError {
            message: e.to_string(),
        })?;

        if status != 200 {
            return Err(parse_http_error(status, &snippet(&body_text), "ollama"));
        }

        let parsed: OllamaGenerateResponse =
            serde_json::from_str(&body_text).map_err(|e| LlmError::ParseError {
                message: format!("Failed to parse Ollama response: {}", e),
            })?;

        if let Some(error) = parsed.error {
            return Err(LlmError::ServerError {
                message: error,
                status: None,
            });
        }

        let usage = match (parsed.prompt_eval_count, parsed.eval_count) {
            (Some(input), Some(output)) => Some(UsageStats {
                input_tokens: input,
                output_tokens: output,
            }),
            _ => None,
        };

        Ok(GenerationOutput {
            content: parsed.response.unwrap_or_default(),
            provider: self.label(),
            usage,
        })
    }

    async fn health_check(&self) -> LlmResult<()> {
        let url = format!("{}/api/tags", self.base_url().trim_end_matches('/'));

        let response =
            self.client
                .get(&url)
                .send()
                .await
                .map_err(|e| LlmError::ProviderUnavailable {
                    message: format!(
                        "Ollama connection failed. Make sure Ollama is running locally: {}",
                        e
                    ),
                })?;

        let status = response.status().as_u16();
        if status != 200 {
            let body_text = response.text().await.unwrap_or_default();
            return Err(parse_http_error(status, &snippet(&body_text), "ollama"));
        }

        Ok(())
    }
}

/// Request body for `/api/generate` (non-streaming).
#[derive(Debug, Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    options: OllamaOptions,
}

/// Subset of Ollama `options`.
#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

/// Response body for `/api/generate` (subset).
#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    prompt_eval_count: Option<u32>,
    #[serde(default)]
    eval_count: Option<u32>,
}
