//! Settings Models
//!
//! Application configuration and settings data structures.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use codesense_core::SettingsStore;
use codesense_llm::BackendKind;

/// Application configuration stored in config.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Active generation backend: "openai", "gemini", "claude", or "ollama"
    pub api_provider: String,
    /// Per-backend API keys (empty string = not configured)
    #[serde(default)]
    pub api_keys: HashMap<String, String>,
    /// Model identifier for the active backend
    pub model: String,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_temperature() -> f32 {
    0.7
}

impl Default for AssistantConfig {
    fn default() -> Self {
        let mut api_keys = HashMap::new();
        for backend in ["openai", "gemini", "claude", "ollama"] {
            api_keys.insert(backend.to_string(), String::new());
        }

        Self {
            api_provider: "openai".to_string(),
            api_keys,
            model: "gpt-3.5-turbo".to_string(),
            temperature: default_temperature(),
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub api_provider: Option<String>,
    /// Keys to merge into the api_keys map
    pub api_keys: Option<HashMap<String, String>>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
}

impl AssistantConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(provider) = update.api_provider {
            self.api_provider = provider;
        }
        if let Some(keys) = update.api_keys {
            self.api_keys.extend(keys);
        }
        if let Some(model) = update.model {
            self.model = model;
        }
        if let Some(temperature) = update.temperature {
            self.temperature = temperature;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.api_provider
            .parse::<BackendKind>()
            .map_err(|e| e.to_string())?;

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            ));
        }

        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }

        Ok(())
    }
}

impl SettingsStore for AssistantConfig {
    fn active_backend(&self) -> String {
        self.api_provider.clone()
    }

    fn api_key(&self, backend: &str) -> Option<String> {
        self.api_keys
            .get(backend)
            .filter(|key| !key.trim().is_empty())
            .cloned()
    }

    fn model(&self) -> String {
        self.model.clone()
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }
}
