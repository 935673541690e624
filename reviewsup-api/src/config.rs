//! Service configuration
//!
//! Resolution follows the usual priority order:
//! 1. Command-line argument (highest priority, applied in main)
//! 2. Environment variable (via clap's env fallback)
//! 3. TOML config file
//! 4. Compiled default (fallback)

use reviewsup_common::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default config file looked up when no --config argument is given
pub const DEFAULT_CONFIG_PATH: &str = "reviewsup.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// SQLite database file
    pub database_path: PathBuf,
    /// Origin the embed loader script is served from; embedding
    /// verification expects `<app_url>/js/embed.js`
    pub app_url: String,
    /// Headless-render collaborator base URL
    pub renderer_url: String,
    /// Timeout for outbound renderer fetches, in seconds
    pub renderer_timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5780,
            database_path: PathBuf::from("reviewsup.db"),
            app_url: "https://reviewsup.io".to_string(),
            renderer_url: "http://127.0.0.1:3030".to_string(),
            renderer_timeout_secs: 30,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file, falling back to defaults.
    ///
    /// An explicitly supplied path that does not exist or fails to parse is
    /// an error; the implicit default path is allowed to be absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Socket address string for the HTTP listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_sane() {
        let config = ServiceConfig::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:5780");
        assert_eq!(config.renderer_timeout_secs, 30);
    }

    #[test]
    fn partial_toml_overlays_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 9000\napp_url = \"https://example.com\"").unwrap();

        let config = ServiceConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.app_url, "https://example.com");
        // Untouched fields keep defaults
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let result = ServiceConfig::load(Some(Path::new("/nonexistent/reviewsup.toml")));
        assert!(result.is_err());
    }
}
