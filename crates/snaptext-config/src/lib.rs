use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use self::capture::CaptureConfig;
use self::hotkey::HotkeyConfig;
use self::vision::VisionConfig;

pub mod capture;
pub mod error;
pub mod hotkey;
pub mod vision;

pub use error::ConfigError;

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub hotkey: HotkeyConfig,
    pub capture: CaptureConfig,
    pub vision: VisionConfig,
}

impl Config {
    /// Defaults, then the JSON file, then process environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_sources(path, |key| env::var(key).ok())
    }

    /// Same as [`Config::load`] with an injectable variable lookup
    pub fn from_sources<F>(path: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match path {
            Some(p) => Some(p.to_path_buf()),
            None => lookup("SNAPTEXT_CONFIG")
                .map(PathBuf::from)
                .or_else(|| {
                    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                    local.exists().then_some(local)
                }),
        };

        let mut config = match file {
            Some(file) => Self::from_file(&file)?,
            None => Self::default(),
        };
        config.apply_env(lookup);
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(trigger) = lookup("SNAPTEXT_HOTKEY") {
            self.hotkey.trigger = trigger;
        }

        if let Some(dir) = lookup("SNAPTEXT_TEMP_DIR") {
            self.capture.temp_dir = Some(PathBuf::from(dir));
        }

        if let Some(delay) = lookup("SNAPTEXT_CAPTURE_DELAY_MS").and_then(|v| v.parse().ok()) {
            self.capture.capture_delay_ms = delay;
        }

        if let Some(model) = lookup("GEMINI_MODEL") {
            self.vision.model = model;
        }

        if let Some(url) = lookup("GEMINI_API_URL") {
            self.vision.api_url = url;
        }

        if let Some(timeout) = lookup("GEMINI_TIMEOUT_SECONDS").and_then(|v| v.parse().ok()) {
            self.vision.timeout_seconds = Some(timeout);
        }

        self.vision.api_key = lookup("GEMINI_API_KEY")
            .map(|key| key.trim().to_string())
            .unwrap_or_default();
    }

    /// Fails when the credential is missing, startup must not continue
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vision.api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.hotkey.trigger, "ctrl+shift+x");
        assert_eq!(config.vision.model, "gemini-1.5-flash-latest");
        assert_eq!(config.vision.prompt, snaptext_vision::DEFAULT_PROMPT);
        assert_eq!(config.vision.api_url, snaptext_vision::DEFAULT_API_URL);
        assert_eq!(config.vision.timeout_seconds, None);
        assert_eq!(config.capture.capture_delay_ms, 150);
        assert!(config.capture.temp_dir.is_none());
    }

    #[test]
    fn test_missing_api_key_fails_validation() {
        let file = write_config("{}");
        let config = Config::from_sources(Some(file.path()), lookup_from(&[])).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::MissingApiKey)));

        let blank = Config::from_sources(
            Some(file.path()),
            lookup_from(&[("GEMINI_API_KEY", "   ")]),
        )
        .unwrap();
        assert!(matches!(blank.validate(), Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn test_api_key_from_env() {
        let file = write_config("{}");
        let config = Config::from_sources(
            Some(file.path()),
            lookup_from(&[("GEMINI_API_KEY", "secret")]),
        )
        .unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.vision.api_key, "secret");
        assert!(!format!("{:?}", config).contains("secret"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config(r#"{ "vision": { "model": "gemini-2.0-flash" } }"#);
        let config = Config::from_sources(Some(file.path()), lookup_from(&[])).unwrap();
        assert_eq!(config.vision.model, "gemini-2.0-flash");
        assert_eq!(config.vision.prompt, snaptext_vision::DEFAULT_PROMPT);
        assert_eq!(config.hotkey.trigger, "ctrl+shift+x");
    }

    #[test]
    fn test_api_key_in_file_is_ignored() {
        let file = write_config(r#"{ "vision": { "api_key": "from-file" } }"#);
        let config = Config::from_sources(Some(file.path()), lookup_from(&[])).unwrap();
        assert!(config.vision.api_key.is_empty());
    }

    #[test]
    fn test_env_overrides_file() {
        let file = write_config(
            r#"{ "hotkey": { "trigger": "alt+f9" }, "capture": { "capture_delay_ms": 10 } }"#,
        );
        let config = Config::from_sources(
            Some(file.path()),
            lookup_from(&[
                ("SNAPTEXT_HOTKEY", "ctrl+alt+o"),
                ("SNAPTEXT_CAPTURE_DELAY_MS", "0"),
                ("SNAPTEXT_TEMP_DIR", "/tmp/snaps"),
                ("GEMINI_TIMEOUT_SECONDS", "45"),
                ("GEMINI_MODEL", "gemini-pro-vision"),
            ]),
        )
        .unwrap();
        assert_eq!(config.hotkey.trigger, "ctrl+alt+o");
        assert_eq!(config.capture.capture_delay_ms, 0);
        assert_eq!(config.capture.temp_dir(), PathBuf::from("/tmp/snaps"));
        assert_eq!(config.vision.timeout_seconds, Some(45));
        assert_eq!(config.vision.model, "gemini-pro-vision");
    }

    #[test]
    fn test_unparseable_numbers_fall_back() {
        let file = write_config("{}");
        let config = Config::from_sources(
            Some(file.path()),
            lookup_from(&[
                ("SNAPTEXT_CAPTURE_DELAY_MS", "soon"),
                ("GEMINI_TIMEOUT_SECONDS", "-3"),
            ]),
        )
        .unwrap();
        assert_eq!(config.capture.capture_delay_ms, 150);
        assert_eq!(config.vision.timeout_seconds, None);
    }

    #[test]
    fn test_config_path_from_env() {
        let file = write_config(r#"{ "hotkey": { "trigger": "f8" } }"#);
        let path = file.path().to_string_lossy().to_string();
        let config = Config::from_sources(None, lookup_from(&[("SNAPTEXT_CONFIG", path.as_str())])).unwrap();
        assert_eq!(config.hotkey.trigger, "f8");
    }

    #[test]
    fn test_missing_explicit_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let result = Config::from_sources(Some(&missing), lookup_from(&[]));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_malformed_file_errors() {
        let file = write_config("{ not json");
        let result = Config::from_sources(Some(file.path()), lookup_from(&[]));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
