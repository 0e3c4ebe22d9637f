//! Settings Lookup Surface
//!
//! Read-only settings access consumed by the orchestration core. The root
//! crate provides the JSON-file-backed implementation; `StaticSettings`
//! is an in-memory implementation for tests and embedding hosts.

use std::collections::HashMap;

/// Read-only lookup of the settings the core needs for one run.
///
/// Implementations are free to back this with a config file, a database, or
/// anything else; the core only reads, never writes.
pub trait SettingsStore: Send + Sync {
    /// Identifier of the active generation backend (e.g. "openai")
    fn active_backend(&self) -> String;

    /// API credential for the given backend identifier, if configured
    fn api_key(&self, backend: &str) -> Option<String>;

    /// Model identifier for generation requests
    fn model(&self) -> String;

    /// Sampling temperature for generation requests
    fn temperature(&self) -> f32;
}

/// Fixed in-memory settings, mainly for tests.
#[derive(Debug, Clone)]
pub struct StaticSettings {
    /// Active backend identifier
    pub backend: String,
    /// Per-backend API keys
    pub api_keys: HashMap<String, String>,
    /// Model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
}

impl StaticSettings {
    /// Create settings for the given backend with no credentials.
    pub fn new(backend: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            api_keys: HashMap::new(),
            model: model.into(),
            temperature: 0.7,
        }
    }

    /// Add an API key for a backend.
    pub fn with_api_key(mut self, backend: impl Into<String>, key: impl Into<String>) -> Self {
        self.api_keys.insert(backend.into(), key.into());
        self
    }
}

impl SettingsStore for StaticSettings {
    fn active_backend(&self) -> String {
        self.backend.clone()
    }

    fn api_key(&self, backend: &str) -> Option<String> {
        self.api_keys.get(backend).cloned()
    }

    fn model(&self) -> String {
        self.model.clone()
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }
}
