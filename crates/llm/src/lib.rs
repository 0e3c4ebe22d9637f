//! CodeSense LLM
//!
//! Generation backend abstraction and implementations for CodeSense
//! Desktop. Provides a unified interface for single-shot text generation
//! against multiple providers:
//! - OpenAI (chat completions)
//! - Google Gemini (generateContent)
//! - Anthropic Claude (messages)
//! - Ollama (local inference, no API key)
//!
//! Backends are selected by a string identifier from settings; an
//! unrecognized identifier is rejected at `BackendKind::from_str`, before
//! any client exists or any network activity occurs.

pub mod anthropic;
pub mod backend;
pub mod gemini;
pub mod ollama;
pub mod openai;
pub mod types;

// Re-export main types
pub use anthropic::ClaudeBackend;
pub use backend::{create_backend, missing_api_key_error, parse_http_error, TextGenerationBackend};
pub use gemini::GeminiBackend;
pub use ollama::OllamaBackend;
pub use openai::OpenAiBackend;
pub use types::*;
