use std::fmt;

use serde::{Deserialize, Serialize};
use snaptext_vision::{DEFAULT_API_URL, DEFAULT_PROMPT};

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_model() -> String {
    "gemini-1.5-flash-latest".to_string()
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct VisionConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// No timeout when unset
    pub timeout_seconds: Option<u64>,
    /// Only ever read from the environment
    #[serde(skip)]
    pub api_key: String,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
            prompt: default_prompt(),
            timeout_seconds: None,
            api_key: String::new(),
        }
    }
}

impl fmt::Debug for VisionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisionConfig")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("prompt", &self.prompt)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .finish()
    }
}
