//! Google Gemini Backend
//!
//! Implementation of the TextGenerationBackend trait for the Gemini
//! generateContent API. Gemini takes a single combined text part rather
//! than separate system/user messages, so the prompts and code context are
//! folded into one block.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use codesense_core::GenerationContext;

use super::backend::{missing_api_key_error, parse_http_error, TextGenerationBackend};
use super::types::{BackendConfig, GenerationOutput, LlmError, LlmResult};

/// Default Gemini API base URL
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Google Gemini backend
pub struct GeminiBackend {
    config: BackendConfig,
    client: reqwest::Client,
}

impl GeminiBackend {
    /// Create a new Gemini backend with the given configuration
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Build the request URL for the configured model
    fn request_url(&self, api_key: &str) -> String {
        let base = self
            .config
            .base_url
            .as_deref()
            .unwrap_or(GEMINI_API_BASE)
            .trim_end_matches('/');
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            base, self.config.model, api_key
        )
    }

    /// Build the request body: one combined text part plus generation config
    fn build_request_body(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        code: &str,
        context: &GenerationContext,
    ) -> serde_json::Value {
        let combined = format!(
            "**Context Details:**\n- Language: {}\n- Lines: {}\n- Characters: {}\n\n**User Request:** {}\n\n**Code Context:**\n```{}\n{}\n```\n{}",
            context.language,
            context.lines,
            context.characters,
            user_prompt,
            context.language,
            code,
            system_prompt
        );

        serde_json::json!({
            "contents": [{ "parts": [{ "text": combined }] }],
            "generationConfig": {
                "temperature": self.config.temperature,
                "maxOutputTokens": self.config.max_tokens
            }
        })
    }
}

#[async_trait]
impl TextGenerationBackend for GeminiBackend {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn label(&self) -> String {
        "Google Gemini".to_string()
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
            .ok_or_else(|| missing_api_key_error("gemini"))?;

        let body = self.build_request_body(system_prompt, user_prompt, code, context);
        let url = self.request_url(api_key);

        debug!(model = %self.config.model, "POST generateContent");
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::NetworkError {
                message: format!("Gemini API request failed: {}", e),
            })?;

        let status = response.status().as_u16();
        let body_text = response.text().await.map_err(|e| LlmError::NetworkError {
            message: e.to_string(),
        })?;

        if status != 200 {
            return Err(parse_http_error(status, &body_text, "gemini"));
        }

        let parsed: GeminiResponse =
            serde_json::from_str(&body_text).map_err(|e| LlmError::ParseError {
                message: format!("Failed to parse Gemini response: {}", e),
            })?;

        if let Some(error) = parsed.error {
            return Err(LlmError::ServerError {
                message: error.message,
                status: None,
            });
        }

        let content = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| LlmError::ParseError {
                message: "Gemini response contained no candidates".to_string(),
            })?;

        Ok(GenerationOutput {
            content,
            provider: self.label(),
            usage: None,
        })
    }

    async fn health_check(&self) -> LlmResult<()> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| missing_api_key_error("gemini"))?;

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": "Hi" }] }],
            "generationConfig": { "maxOutputTokens": 1 }
        });

        let response = self
            .client
            .post(self.request_url(api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            let body_text = response.text().await.unwrap_or_default();
            return Err(parse_http_error(status, &body_text, "gemini"));
        }

        Ok(())
    }
}

/// Response body for `models/{model}:generateContent` (subset).
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use codesense_core::CodeContext;

    fn backend() -> GeminiBackend {
        GeminiBackend::new(BackendConfig {
            kind: super::super::types::BackendKind::Gemini,
            api_key: Some("test-key".to_string()),
            model: "gemini-pro".to_string(),
            ..BackendConfig::default()
        })
    }

    fn context() -> GenerationContext {
        GenerationContext::assemble(
            "SELECT 1;",
            &CodeContext {
                language: Some("sql".to_string()),
                lines: 1,
                characters: 9,
            },
            vec![],
            vec!["explain".to_string()],
        )
    }

    #[test]
    fn test_request_url_embeds_model_and_key() {
        let url = backend().request_url("test-key");
        assert!(url.contains("/v1beta/models/gemini-pro:generateContent"));
        assert!(url.ends_with("key=test-key"));
    }

    #[test]
    fn test_request_body_combines_everything() {
        let body = backend().build_request_body("system", "explain", "SELECT 1;", &context());
        let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();

        assert!(text.contains("- Language: sql"));
        assert!(text.contains("**User Request:** explain"));
        assert!(text.contains("SELECT 1;"));
        assert!(text.ends_with("system"));
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 2000);
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{
            "candidates": [{ "content": { "parts": [{ "text": "hello" }] } }]
        }"#;
        let parsed: GeminiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.candidates[0].content.parts[0].text, "hello");
    }

    #[tokio::test]
    async fn test_generate_without_key_fails_fast() {
        let backend = GeminiBackend::new(BackendConfig {
            kind: super::super::types::BackendKind::Gemini,
            api_key: None,
            ..BackendConfig::default()
        });
        let err = backend
            .generate("sys", "user", "code", &context())
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::AuthenticationFailed { .. }));
    }

    #[tokio::test]
    async fn test_health_check_without_key_fails_fast() {
        let backend = GeminiBackend::new(BackendConfig {
            kind: super::super::types::BackendKind::Gemini,
            api_key: None,
            ..BackendConfig::default()
        });
        let err = backend.health_check().await.unwrap_err();
        assert!(matches!(err, LlmError::AuthenticationFailed { .. }));
    }
}
