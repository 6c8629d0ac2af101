use serde::{Deserialize, Serialize};

fn default_trigger() -> String {
    "ctrl+shift+x".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct HotkeyConfig {
    /// Key combination that opens the selection overlay
    #[serde(default = "default_trigger")]
    pub trigger: String,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            trigger: default_trigger(),
        }
    }
}
