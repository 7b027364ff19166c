//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.quandary/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! The backend base URL in particular has exactly one source of truth here;
//! every request path is joined onto it.

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct QuandaryConfig {
    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
/// The backend fans out several LLM calls per analysis request, so the
/// per-request timeout is generous.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub timeout: Duration,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.quandary/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".quandary").join("config.toml"))
}

/// Load config from `~/.quandary/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `QuandaryConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<QuandaryConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(QuandaryConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(QuandaryConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: QuandaryConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Quandary Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [backend]
# base_url = "http://127.0.0.1:5000"   # Or set QUANDARY_BASE_URL env var
# timeout_secs = 120                   # Per-request timeout
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_base_url` is from the `--base-url` flag (None = not specified).
pub fn resolve(config: &QuandaryConfig, cli_base_url: Option<&str>) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli_base_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("QUANDARY_BASE_URL").ok())
        .or_else(|| config.backend.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let timeout_secs = config.backend.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);

    ResolvedConfig {
        base_url,
        timeout: Duration::from_secs(timeout_secs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = QuandaryConfig::default();
        assert!(config.backend.base_url.is_none());
        assert!(config.backend.timeout_secs.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = QuandaryConfig::default();
        let resolved = resolve(&config, None);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = QuandaryConfig {
            backend: BackendConfig {
                base_url: Some("http://10.0.0.2:8080".to_string()),
                timeout_secs: Some(30),
            },
        };
        let resolved = resolve(&config, None);
        assert_eq!(resolved.base_url, "http://10.0.0.2:8080");
        assert_eq!(resolved.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_resolve_cli_base_url_wins() {
        let config = QuandaryConfig {
            backend: BackendConfig {
                base_url: Some("http://from-config:5000".to_string()),
                timeout_secs: None,
            },
        };
        let resolved = resolve(&config, Some("http://from-cli:5000"));
        assert_eq!(resolved.base_url, "http://from-cli:5000");
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[backend]
timeout_secs = 15
"#;
        let config: QuandaryConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend.timeout_secs, Some(15));
        assert!(config.backend.base_url.is_none());
    }

    #[test]
    fn test_full_toml_parses() {
        let toml_str = r#"
[backend]
base_url = "http://192.168.1.50:5000"
timeout_secs = 60
"#;
        let config: QuandaryConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.backend.base_url.as_deref(),
            Some("http://192.168.1.50:5000")
        );
        assert_eq!(config.backend.timeout_secs, Some(60));
    }
}
