// src/config/settings.rs
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Base URL used when `backend.base_url` is left empty, which means "same
/// origin". For a desktop client that is the analysis service on this host.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const DEFAULTS: &str = r#"
    [backend]
    base_url = ""

    [logging]
    level = "info"

    [window]
    width = 1200.0
    height = 800.0
"#;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub logging: LoggingConfig,
    pub window: WindowConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the analysis service. Empty means same origin.
    #[serde(default)]
    pub base_url: String,

    /// Request timeout. Unset means the request may wait indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl BackendConfig {
    pub fn analyze_url(&self) -> String {
        let base = self.base_url.trim();
        let base = if base.is_empty() { DEFAULT_BASE_URL } else { base };
        format!("{}/analyze", base.trim_end_matches('/'))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl AppConfig {
    /// Resolves configuration once at startup.
    ///
    /// Sources, later ones winning:
    /// 1. Built-in defaults
    /// 2. `csv-dashboard/config.toml` in the platform config directory
    /// 3. `dashboard.toml` in the working directory
    /// 4. Environment variables with the `DASHBOARD__` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULTS, config::FileFormat::Toml));

        if let Some(path) = user_config_path() {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        builder
            .add_source(config::File::with_name("dashboard").required(false))
            .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
            .build()?
            .try_deserialize()
    }

    #[cfg(test)]
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULTS, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        builder.build()?.try_deserialize()
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("csv-dashboard").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::load_for_test(&[]).unwrap();
        assert_eq!(config.backend.base_url, "");
        assert_eq!(config.backend.timeout_secs, None);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.window.width, 1200.0);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::load_for_test(&[
            ("backend.base_url", "https://analytics.example.com"),
            ("backend.timeout_secs", "30"),
            ("logging.level", "debug"),
        ])
        .unwrap();
        assert_eq!(config.backend.base_url, "https://analytics.example.com");
        assert_eq!(config.backend.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_analyze_url() {
        let mut backend = BackendConfig { base_url: String::new(), timeout_secs: None };
        assert_eq!(backend.analyze_url(), format!("{}/analyze", DEFAULT_BASE_URL));

        backend.base_url = "https://api.example.com/".to_string();
        assert_eq!(backend.analyze_url(), "https://api.example.com/analyze");

        backend.base_url = "https://api.example.com/v1".to_string();
        assert_eq!(backend.analyze_url(), "https://api.example.com/v1/analyze");
    }
}
