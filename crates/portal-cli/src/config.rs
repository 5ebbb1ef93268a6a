//! Configuration management for the portal CLI
//!
//! The backend base URL and request settings are resolved once at startup,
//! in this order (later wins): built-in defaults, an optional TOML file,
//! environment variables, command-line flags. The resolved [`Config`] is then
//! passed down explicitly; nothing below `main` reads the environment.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// CLI Configuration Constants
// ============================================================================

/// Backend base URL when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5001";

/// Default timeout for API requests in seconds.
/// Generous because uploads of large spreadsheets go through the same client.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 300;

/// Environment variable holding the backend base URL
pub const ENV_API_URL: &str = "PORTAL_API_URL";

/// Environment variable holding the request timeout in seconds
pub const ENV_API_TIMEOUT_SECS: &str = "PORTAL_API_TIMEOUT_SECS";

/// Environment variable pointing at the TOML config file
pub const ENV_CONFIG_FILE: &str = "PORTAL_CONFIG";

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Backend base URL, without trailing slash
    pub api_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Disable colored output
    #[serde(default)]
    pub no_color: bool,
}

/// Shape of the optional TOML config file; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    api_url: Option<String>,
    timeout_secs: Option<u64>,
    no_color: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
            no_color: false,
        }
    }
}

impl Config {
    /// Resolve configuration from an optional file plus the environment
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = file {
            config.merge_file(path)?;
        }

        config.merge_env()?;
        Ok(config)
    }

    /// Load config from environment variables only
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    fn merge_file(&mut self, path: &Path) -> Result<()> {
        if !path.is_file() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }

        let text = std::fs::read_to_string(path)?;
        let file: FileConfig = toml::from_str(&text)?;

        if let Some(url) = file.api_url {
            self.set_api_url(url);
        }
        if let Some(secs) = file.timeout_secs {
            self.timeout_secs = secs;
        }
        if let Some(no_color) = file.no_color {
            self.no_color = no_color;
        }

        Ok(())
    }

    fn merge_env(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                self.set_api_url(url);
            }
        }

        if let Ok(secs) = std::env::var(ENV_API_TIMEOUT_SECS) {
            self.timeout_secs = secs.parse().map_err(|_| {
                CliError::config(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    ENV_API_TIMEOUT_SECS, secs
                ))
            })?;
        }

        if std::env::var_os("NO_COLOR").is_some() {
            self.no_color = true;
        }

        Ok(())
    }

    /// Get the backend base URL
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Set the backend base URL, dropping any trailing slash
    pub fn set_api_url(&mut self, url: impl Into<String>) {
        let url = url.into();
        self.api_url = url.trim().trim_end_matches('/').to_string();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn clear_env() {
        std::env::remove_var(ENV_API_URL);
        std::env::remove_var(ENV_API_TIMEOUT_SECS);
        std::env::remove_var("NO_COLOR");
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::from_env().unwrap();
        assert_eq!(config.api_url(), DEFAULT_API_URL);
        assert_eq!(config.timeout_secs, DEFAULT_API_TIMEOUT_SECS);
        assert!(!config.no_color);
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_url = \"http://from-file:5001/\"\ntimeout_secs = 30").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.api_url(), "http://from-file:5001");
        assert_eq!(config.timeout_secs, 30);

        std::env::set_var(ENV_API_URL, "http://from-env:9000");
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.api_url(), "http://from-env:9000");
        assert_eq!(config.timeout_secs, 30);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_bad_timeout_is_rejected() {
        clear_env();
        std::env::set_var(ENV_API_TIMEOUT_SECS, "soon");
        let result = Config::from_env();
        clear_env();

        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    #[serial]
    fn test_unknown_file_key_is_rejected() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server = \"http://typo\"").unwrap();

        let result = Config::load(Some(file.path()));
        assert!(matches!(result, Err(CliError::TomlParse(_))));
    }

    #[test]
    #[serial]
    fn test_missing_file() {
        clear_env();
        let result = Config::load(Some(Path::new("/definitely/not/here.toml")));
        assert!(matches!(result, Err(CliError::FileNotFound(_))));
    }

    #[test]
    fn test_set_api_url_trims_slash() {
        let mut config = Config::default();
        config.set_api_url("https://portal.example.com/ ");
        assert_eq!(config.api_url(), "https://portal.example.com");
    }
}
