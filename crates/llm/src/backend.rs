//! Text Generation Backend Trait
//!
//! Defines the common interface for all generation backends, plus the
//! factory that maps a `BackendKind` to a concrete implementation. The
//! orchestrator treats all backends uniformly through this trait and
//! selects among them solely by the identifier stored in settings.

use std::sync::Arc;

use async_trait::async_trait;

use codesense_core::GenerationContext;

use super::anthropic::ClaudeBackend;
use super::gemini::GeminiBackend;
use super::ollama::OllamaBackend;
use super::openai::OpenAiBackend;
use super::types::{BackendConfig, BackendKind, GenerationOutput, LlmError, LlmResult};

/// Trait that all generation backends must implement.
///
/// Provides a unified interface for:
/// - A single-shot generation call (generate)
/// - Health checking
#[async_trait]
pub trait TextGenerationBackend: Send + Sync {
    /// Returns the backend name for identification.
    fn name(&self) -> &'static str;

    /// Returns the human-facing provider label for responses.
    fn label(&self) -> String;

    /// Returns whether this backend needs an API credential.
    fn requires_api_key(&self) -> bool {
        true
    }

    /// Run one generation request.
    ///
    /// # Arguments
    /// * `system_prompt` - Instructions framing the assistant's role
    /// * `user_prompt` - The effective user request
    /// * `code` - The code being worked on, verbatim
    /// * `context` - The assembled generation context (language, counts)
    ///
    /// # Returns
    /// The generated text with the provider label and optional usage stats
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        code: &str,
        context: &GenerationContext,
    ) -> LlmResult<GenerationOutput>;

    /// Check if the backend is healthy and reachable.
    ///
    /// For API backends, this validates the credential with a minimal
    /// request. For Ollama, this checks that the server is running.
    async fn health_check(&self) -> LlmResult<()>;
}

/// Create a generation backend from a configuration.
///
/// Factory function that maps `BackendKind` to the concrete implementation.
pub fn create_backend(config: BackendConfig) -> Arc<dyn TextGenerationBackend> {
    match config.kind {
        BackendKind::OpenAi => Arc::new(OpenAiBackend::new(config)),
        BackendKind::Gemini => Arc::new(GeminiBackend::new(config)),
        BackendKind::Claude => Arc::new(ClaudeBackend::new(config)),
        BackendKind::Ollama => Arc::new(OllamaBackend::new(config)),
    }
}

/// Helper function to create an error for a missing API key
pub fn missing_api_key_error(backend: &str) -> LlmError {
    LlmError::AuthenticationFailed {
        message: format!(
            "API key not configured for {}. Please add your API key in settings.",
            backend
        ),
    }
}

/// Helper function to map HTTP error status codes to backend errors
pub fn parse_http_error(status: u16, body: &str, backend: &str) -> LlmError {
    match status {
        401 => LlmError::AuthenticationFailed {
            message: format!("{}: Invalid API key", backend),
        },
        403 => LlmError::AuthenticationFailed {
            message: format!("{}: Access denied", backend),
        },
        404 => LlmError::ModelNotFound {
            model: body.to_string(),
        },
        429 => LlmError::RateLimited {
            message: body.to_string(),
            retry_after: None,
        },
        400 => LlmError::InvalidRequest {
            message: body.to_string(),
        },
        500..=599 => LlmError::ServerError {
            message: body.to_string(),
            status: Some(status),
        },
        _ => LlmError::Other {
            message: format!("HTTP {}: {}", status, body),
        },
    }
}

/// Bound a response body to a short snippet for error messages.
pub(crate) fn snippet(body: &str) -> String {
    body.chars().take(240).collect()
}
