//! Generation provider settings

use serde::{Deserialize, Serialize};

use crate::request::DEFAULT_TEMPERATURE;

pub const DEFAULT_BASE_URL: &str = "https://api.cohere.com";
pub const DEFAULT_MODEL: &str = "command-r";
pub const DEFAULT_CHAT_MODEL: &str = "command";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Provider API key; without one every generation uses the fallback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub base_url: String,
    /// Model for one-shot generation
    pub model: String,
    /// Model for the chat stream
    pub chat_model: String,
    pub temperature: f64,
    /// Token limit for the chat stream
    pub chat_max_tokens: u32,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            chat_max_tokens: 2000,
            timeout_secs: 60,
            max_retries: 3,
        }
    }
}

impl GenerationConfig {
    /// The API key, if set and non-blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}
