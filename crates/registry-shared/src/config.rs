//! Configuration management

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_NOTICE_TTL_SECONDS, DEFAULT_TOKEN_PATH, ENV_PREFIX,
};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    pub api: ApiSettings,
    pub storage: StorageSettings,
    pub ui: UiSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    /// Unset means requests may hang indefinitely.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub token_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiSettings {
    pub notice_ttl_seconds: u64,
}

impl ClientConfig {
    /// Load from `config/default`, `config/{APP_ENV}` and `REGISTRY__*` variables.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        Self::load_from(Path::new("config"), &env)
    }

    pub fn load_from(config_dir: &Path, env: &str) -> Result<Self, AppError> {
        let config = Config::builder()
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .set_default("storage.token_path", DEFAULT_TOKEN_PATH)?
            .set_default("ui.notice_ttl_seconds", DEFAULT_NOTICE_TTL_SECONDS)?
            .add_source(File::from(config_dir.join("default")).required(false))
            .add_source(File::from(config_dir.join(env)).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: ClientConfig = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), AppError> {
        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AppError::InvalidSetting {
                key: "api.base_url",
                reason: format!("expected an http(s) URL, got '{}'", url),
            });
        }
        if self.ui.notice_ttl_seconds == 0 {
            return Err(AppError::InvalidSetting {
                key: "ui.notice_ttl_seconds",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.api.timeout_seconds.map(Duration::from_secs)
    }

    pub fn notice_ttl(&self) -> Duration {
        Duration::from_secs(self.ui.notice_ttl_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::load_from(dir.path(), "test").unwrap();

        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert!(config.request_timeout().is_none());
        assert_eq!(config.notice_ttl(), Duration::from_secs(5));
        assert_eq!(config.storage.token_path, PathBuf::from(DEFAULT_TOKEN_PATH));
    }

    #[test]
    fn test_env_file_overrides_default_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[api]\nbase_url = \"http://registry.local\"\ntimeout_seconds = 30\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("staging.toml"),
            "[api]\nbase_url = \"https://staging.registry.local\"\n",
        )
        .unwrap();

        let config = ClientConfig::load_from(dir.path(), "staging").unwrap();
        assert_eq!(config.api.base_url, "https://staging.registry.local");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[api]\nbase_url = \"ftp://registry.local\"\n",
        )
        .unwrap();

        let err = ClientConfig::load_from(dir.path(), "test").unwrap_err();
        assert!(matches!(err, AppError::InvalidSetting { key: "api.base_url", .. }));
    }

    #[test]
    fn test_rejects_zero_notice_ttl() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[ui]\nnotice_ttl_seconds = 0\n").unwrap();

        let err = ClientConfig::load_from(dir.path(), "test").unwrap_err();
        assert!(matches!(err, AppError::InvalidSetting { key: "ui.notice_ttl_seconds", .. }));
    }
}
