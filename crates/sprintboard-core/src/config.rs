use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{BoardError, BoardResult};

const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_REFRESH_DEBOUNCE_MS: u64 = 500;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AutoScrollConfig {
    /// Distance from a container edge (logical pixels) that triggers scrolling
    #[serde(default = "AutoScrollConfig::default_threshold")]
    pub threshold_px: f64,
    /// Pixels scrolled per accepted drag-over event
    #[serde(default = "AutoScrollConfig::default_step")]
    pub step_px: f64,
    /// Minimum wall-clock gap between two scroll steps
    #[serde(default = "AutoScrollConfig::default_throttle")]
    pub throttle_ms: u64,
}

impl AutoScrollConfig {
    fn default_threshold() -> f64 {
        80.0
    }

    fn default_step() -> f64 {
        8.0
    }

    fn default_throttle() -> u64 {
        50
    }

    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            threshold_px: Self::default_threshold(),
            step_px: Self::default_step(),
            throttle_ms: Self::default_throttle(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "AppConfig::default_request_timeout")]
    pub request_timeout_ms: u64,
    #[serde(default = "AppConfig::default_refresh_debounce")]
    pub refresh_debounce_ms: u64,
    #[serde(default)]
    pub autoscroll: AutoScrollConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            refresh_debounce_ms: DEFAULT_REFRESH_DEBOUNCE_MS,
            autoscroll: AutoScrollConfig::default(),
        }
    }
}

impl AppConfig {
    fn default_request_timeout() -> u64 {
        DEFAULT_REQUEST_TIMEOUT_MS
    }

    fn default_refresh_debounce() -> u64 {
        DEFAULT_REFRESH_DEBOUNCE_MS
    }

    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/sprintboard/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("sprintboard/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("sprintboard\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Load from the platform config location, falling back to defaults when
    /// the file is absent or unreadable.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                tracing::warn!("Ignoring config at {}: {}", path.display(), e);
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> BoardResult<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| BoardError::Config(e.to_string()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn refresh_debounce(&self) -> Duration {
        Duration::from_millis(self.refresh_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.refresh_debounce(), Duration::from_millis(500));
        assert_eq!(config.autoscroll.threshold_px, 80.0);
        assert_eq!(config.autoscroll.throttle(), Duration::from_millis(50));
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "base_url = \"http://localhost:8000/api\"\n\n[autoscroll]\nstep_px = 12.0"
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8000/api"));
        assert_eq!(config.request_timeout_ms, 5_000);
        assert_eq!(config.autoscroll.step_px, 12.0);
        assert_eq!(config.autoscroll.threshold_px, 80.0);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "request_timeout_ms = \"soon\"").unwrap();

        let result = AppConfig::load_from(file.path());
        assert!(matches!(result, Err(BoardError::Config(_))));
    }
}
