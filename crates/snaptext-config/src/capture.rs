use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_capture_delay_ms() -> u64 {
    150
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CaptureConfig {
    /// Where the transient PNG is written, system temp dir when unset
    pub temp_dir: Option<PathBuf>,
    /// Pause between hiding the overlay and grabbing pixels
    #[serde(default = "default_capture_delay_ms")]
    pub capture_delay_ms: u64,
}

impl CaptureConfig {
    pub fn temp_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            temp_dir: None,
            capture_delay_ms: default_capture_delay_ms(),
        }
    }
}
