//! Retry Configuration
//!
//! The executor has a single knob: the maximum number of query attempts per
//! call. This module defines that policy and loads it from a TOML file at
//! `~/.config/liteclient/retrier.toml`.
//!
//! # Configuration Priority
//!
//! Values are resolved with the following priority (highest first):
//! 1. Explicit overrides ([`ConfigOverrides`])
//! 2. Environment variables (`LITECLIENT_MAX_RETRIES`)
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [retry]
//! # 0 or less retries until every node has been tried
//! max_retries = 5
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding [`RetryPolicy::max_retries`]
pub const MAX_RETRIES_ENV: &str = "LITECLIENT_MAX_RETRIES";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),
}

// =============================================================================
// Retry Policy
// =============================================================================

/// Attempt bound for one logical query
///
/// `max_retries <= 0` means "no bound": the executor keeps going until it runs
/// out of nodes or hits an error it does not retry. A positive value stops the
/// executor after exactly that many attempts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Maximum number of attempts (non-positive = unbounded)
    pub max_retries: i32,
}

impl RetryPolicy {
    /// Policy that only stops on node exhaustion or a final error
    #[must_use]
    pub fn unbounded() -> Self {
        Self { max_retries: 0 }
    }

    /// Policy with the given attempt bound
    #[must_use]
    pub fn with_max_retries(max_retries: i32) -> Self {
        Self { max_retries }
    }

    /// Whether the number of attempts is bounded
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.max_retries > 0
    }

    /// Whether `attempts` already used up the budget
    #[must_use]
    pub fn exhausted(&self, attempts: u32) -> bool {
        u32::try_from(self.max_retries).is_ok_and(|max| max > 0 && attempts >= max)
    }
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from an explicit override
    Override,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Override => write!(f, "override"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Retry section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetryToml {
    /// Maximum number of attempts per query
    pub max_retries: Option<i32>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetrierToml {
    /// Retry configuration section
    pub retry: RetryToml,
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Resolved retrier configuration with provenance
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetrierConfig {
    /// Retry policy handed to the executor
    pub policy: RetryPolicy,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of the policy value
    source: ConfigSource,
}

impl Default for RetrierConfig {
    fn default() -> Self {
        Self {
            policy: RetryPolicy::default(),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl RetrierConfig {
    /// Get the source of the policy value
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/liteclient/retrier.toml` or
/// `~/.config/liteclient/retrier.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("liteclient").join("retrier.toml"))
}

/// Load configuration from the default path and the environment
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be read or parsed.
/// A missing config file is not an error (defaults are used).
pub fn load_config() -> Result<RetrierConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path and the environment
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<RetrierConfig, ConfigError> {
    let mut config = load_file(path)?;
    apply_env_config(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Parse a TOML document into a resolved configuration (no environment)
///
/// # Errors
///
/// Returns an error if the document is not valid TOML or has unknown sections
/// or keys.
pub fn parse_config(toml_content: &str) -> Result<RetrierConfig, ConfigError> {
    let toml_config: RetrierToml = toml::from_str(toml_content)?;
    let mut config = RetrierConfig::default();
    apply_toml_config(&mut config, &toml_config);
    Ok(config)
}

fn load_file(path: Option<PathBuf>) -> Result<RetrierConfig, ConfigError> {
    let Some(config_path) = path else {
        return Ok(RetrierConfig::default());
    };

    if !config_path.exists() {
        tracing::debug!(
            path = %config_path.display(),
            "Config file not found, using defaults"
        );
        return Ok(RetrierConfig::default());
    }

    let toml_content =
        std::fs::read_to_string(&config_path).map_err(|e| ConfigError::ReadError {
            path: config_path.clone(),
            source: e,
        })?;

    let mut config = parse_config(&toml_content)?;
    config.config_file_path = Some(config_path.clone());

    tracing::info!(
        path = %config_path.display(),
        max_retries = config.policy.max_retries,
        "Loaded retrier configuration from file"
    );

    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut RetrierConfig, toml: &RetrierToml) {
    if let Some(max_retries) = toml.retry.max_retries {
        config.policy.max_retries = max_retries;
        config.source = ConfigSource::File;
    }
}

/// Apply environment overrides, reading variables through `lookup`
pub fn apply_env_config<F>(config: &mut RetrierConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(MAX_RETRIES_ENV) {
        match raw.trim().parse::<i32>() {
            Ok(max_retries) => {
                config.policy.max_retries = max_retries;
                config.source = ConfigSource::Env;
            }
            Err(e) => {
                tracing::warn!(
                    var = MAX_RETRIES_ENV,
                    value = %raw,
                    error = %e,
                    "Ignoring unparseable environment override"
                );
            }
        }
    }
}

// =============================================================================
// Override Support
// =============================================================================

/// Builder for applying explicit overrides on top of loaded configuration
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Max retries override
    pub max_retries: Option<i32>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set max retries override
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: i32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Apply overrides to a configuration
    pub fn apply(&self, config: &mut RetrierConfig) {
        if let Some(max_retries) = self.max_retries {
            config.policy.max_retries = max_retries;
            config.source = ConfigSource::Override;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
