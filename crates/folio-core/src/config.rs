//! Client configuration and path management.
//!
//! The backend base URL is resolved in priority order:
//!
//! 1. `FOLIO_API_URL` environment variable
//! 2. `api_url` in `<config_dir>/folio/config.toml`
//! 3. `http://localhost:8001` (the backend's development default)
//!
//! All persistent client state lives under the platform config directory:
//!
//! ```text
//! ~/.config/folio/             # Linux; platform-appropriate elsewhere
//! ├── config.toml              # api_url and request tuning
//! └── admin_token              # persisted admin bearer token
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};

/// Default backend base URL when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8001";

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "FOLIO_API_URL";

/// Name of the persisted token file under the config directory.
pub const TOKEN_FILE_NAME: &str = "admin_token";

const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// On-disk shape of `config.toml`. All fields optional; anything absent
/// falls back to the defaults above.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    api_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Creates a configuration pointing at the given base URL, with defaults
    /// for everything else.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            ..Self::default()
        }
    }

    /// Loads the configuration from the environment and the config file.
    ///
    /// A missing config file is not an error; a present-but-unparseable one
    /// is, so a typo does not silently send requests to the wrong host.
    pub fn load() -> Result<Self> {
        let env_url = env::var(API_URL_ENV).ok();
        let path = config_file()?;
        Self::from_sources(env_url, &path)
    }

    /// Resolves the configuration from an explicit environment value and
    /// config file path. Split out from [`ClientConfig::load`] so resolution
    /// order is testable without touching process-global state.
    pub fn from_sources(env_url: Option<String>, config_path: &Path) -> Result<Self> {
        let file = if config_path.exists() {
            let content = fs::read_to_string(config_path).map_err(|e| {
                FolioError::config(format!(
                    "failed to read {}: {}",
                    config_path.display(),
                    e
                ))
            })?;
            toml::from_str::<ConfigFile>(&content)?
        } else {
            ConfigFile::default()
        };

        // An env var set to "" counts as unset, matching how the original
        // frontend treated an empty backend-URL setting.
        let base_url = env_url
            .filter(|url| !url.trim().is_empty())
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self {
            base_url: normalize_base_url(base_url),
            timeout_secs: file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }
}

/// Strips trailing slashes so endpoint paths can always be appended verbatim.
fn normalize_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// Returns the folio configuration directory (`~/.config/folio` on Linux).
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("folio"))
        .ok_or_else(|| FolioError::config("cannot determine the config directory"))
}

/// Returns the path to `config.toml`.
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Returns the path to the persisted token file.
pub fn token_file() -> Result<PathBuf> {
    Ok(config_dir()?.join(TOKEN_FILE_NAME))
}
