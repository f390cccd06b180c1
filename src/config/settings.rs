//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::utils::errors::Result;

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Settings {
    pub app: AppConfig,
    pub auth: AuthConfig,
    pub timing: TimingConfig,
    pub logging: LoggingConfig,
}

/// University and form choice lists
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub name: String,
    pub default_university: String,
    pub universities: Vec<String>,
    /// Departments offered at registration
    pub registration_departments: Vec<String>,
    /// Departments an election may be requested for
    pub election_departments: Vec<String>,
    /// Vote count the dashboard progress bar measures against
    pub participation_target: u64,
}

/// Role-claim token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    pub token_secret: String,
    pub issuer: String,
    pub token_ttl_minutes: i64,
}

/// Timers and service deadlines
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimingConfig {
    pub countdown_refresh_secs: u64,
    pub service_timeout_ms: u64,
    /// Artificial delay of the in-memory services
    pub mock_latency_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the daily rolling log file; stdout only when unset
    pub directory: Option<String>,
    pub json: bool,
}

impl TimingConfig {
    pub fn countdown_refresh(&self) -> Duration {
        Duration::from_secs(self.countdown_refresh_secs)
    }

    pub fn service_timeout(&self) -> Duration {
        Duration::from_millis(self.service_timeout_ms)
    }

    pub fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.mock_latency_ms)
    }
}

impl Settings {
    /// Load settings from `univote.toml` (optional) and `UNIVOTE__*` environment variables
    pub fn new() -> std::result::Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("univote").required(false))
            .add_source(config::Environment::with_prefix("UNIVOTE").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Load settings from an explicit file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Parse settings from TOML text; missing sections fall back to defaults
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        super::validation::validate_settings(self)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "University Voting".to_string(),
            default_university: "University of California".to_string(),
            universities: vec![
                "University of California".to_string(),
                "Stanford University".to_string(),
                "Harvard University".to_string(),
                "MIT".to_string(),
                "Columbia University".to_string(),
            ],
            registration_departments: vec![
                "Computer Science".to_string(),
                "Engineering".to_string(),
                "Business Administration".to_string(),
                "Liberal Arts".to_string(),
                "Medicine".to_string(),
                "Law".to_string(),
            ],
            election_departments: vec![
                "All Departments".to_string(),
                "Computer Science".to_string(),
                "Engineering".to_string(),
                "Business Administration".to_string(),
                "Liberal Arts".to_string(),
                "Medicine".to_string(),
                "Law".to_string(),
                "Sciences".to_string(),
            ],
            participation_target: 2000,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: "change-me-univote-dev-secret".to_string(),
            issuer: "univote".to_string(),
            token_ttl_minutes: 60,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            countdown_refresh_secs: 60,
            service_timeout_ms: 10_000,
            mock_latency_ms: 0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            json: false,
        }
    }
}
