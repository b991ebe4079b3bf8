// crates/virtual-cards-sdk/src/config.rs
// ============================================================================
// Module: Virtual Cards SDK Configuration
// Description: Configuration loading and validation for the SDK client.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, toml, url
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Every section is optional; omitted sections take their defaults. Invalid
//! values fail closed rather than falling back.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::audit::FileAuditSink;
use crate::audit::NoopAuditSink;
use crate::audit::SdkAuditSink;
use crate::audit::StderrAuditSink;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "virtual-cards.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "VIRTUAL_CARDS_CONFIG";
/// Maximum configuration file size in bytes.
const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default page size for list operations.
pub const DEFAULT_LIST_LIMIT: u32 = 10;
/// Largest page size the backend accepts.
pub const MAX_LIST_LIMIT: u32 = 100;

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// SDK configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SdkConfig {
    /// Backend endpoint settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// List operation settings.
    #[serde(default)]
    pub list: ListConfig,
    /// Audit logging settings.
    #[serde(default)]
    pub audit: AuditConfig,
}

/// Backend endpoint settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// GraphQL endpoint, informational for the injected transport.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Allow a plain `http://` endpoint.
    #[serde(default)]
    pub allow_http: bool,
}

/// List operation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListConfig {
    /// Page size used when a list input omits `limit`.
    #[serde(default = "default_list_limit")]
    pub default_limit: u32,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            default_limit: default_list_limit(),
        }
    }
}

/// Audit sink selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditMode {
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to `audit.path`.
    File,
    /// Audit disabled.
    #[default]
    None,
}

/// Audit logging settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Sink selection.
    #[serde(default)]
    pub mode: AuditMode,
    /// Audit log path (JSON lines), required for `file` mode.
    #[serde(default)]
    pub path: Option<String>,
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl SdkConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::parse(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        self.list.validate()?;
        self.audit.validate()?;
        Ok(())
    }
}

impl ApiConfig {
    /// Validates the endpoint URL.
    fn validate(&self) -> Result<(), ConfigError> {
        let Some(endpoint) = &self.endpoint else {
            return Ok(());
        };
        let url = Url::parse(endpoint.trim())
            .map_err(|err| ConfigError::Invalid(format!("api.endpoint is not a url: {err}")))?;
        match url.scheme() {
            "https" => Ok(()),
            "http" if self.allow_http => Ok(()),
            "http" => Err(ConfigError::Invalid(
                "api.endpoint must use https unless allow_http is set".to_string(),
            )),
            scheme => Err(ConfigError::Invalid(format!(
                "api.endpoint has unsupported scheme: {scheme}"
            ))),
        }
    }
}

impl ListConfig {
    /// Validates the default page size.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_LIST_LIMIT).contains(&self.default_limit) {
            return Err(ConfigError::Invalid(format!(
                "list.default_limit must be between 1 and {MAX_LIST_LIMIT}"
            )));
        }
        Ok(())
    }
}

impl AuditConfig {
    /// Validates audit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            validate_path_string("audit.path", path)?;
        }
        if self.mode == AuditMode::File && self.path.is_none() {
            return Err(ConfigError::Invalid("audit.path is required for file mode".to_string()));
        }
        Ok(())
    }

    /// Builds the configured audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the audit file cannot be opened.
    pub fn build_sink(&self) -> Result<Arc<dyn SdkAuditSink>, ConfigError> {
        match (self.mode, &self.path) {
            (AuditMode::Stderr, _) => Ok(Arc::new(StderrAuditSink)),
            (AuditMode::File, Some(path)) => {
                let sink = FileAuditSink::new(Path::new(path.trim()))
                    .map_err(|err| ConfigError::Io(err.to_string()))?;
                Ok(Arc::new(sink))
            }
            (AuditMode::File, None) => {
                Err(ConfigError::Invalid("audit.path is required for file mode".to_string()))
            }
            (AuditMode::None, _) => Ok(Arc::new(NoopAuditSink)),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Default page size.
const fn default_list_limit() -> u32 {
    DEFAULT_LIST_LIMIT
}

/// Resolves the config path from explicit input, env, or default.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    validate_path(Path::new(trimmed))
        .map_err(|_| ConfigError::Invalid(format!("{field} exceeds path length limits")))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
