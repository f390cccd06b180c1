//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{Result, UniVoteError};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_app_config(&settings.app)?;
    validate_auth_config(&settings.auth)?;
    validate_timing_config(&settings.timing)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate university and department lists
fn validate_app_config(config: &super::AppConfig) -> Result<()> {
    if config.universities.is_empty() {
        return Err(UniVoteError::Config(
            "At least one university must be configured".to_string()
        ));
    }

    if !config.universities.contains(&config.default_university) {
        return Err(UniVoteError::Config(
            "Default university must be in the universities list".to_string()
        ));
    }

    if config.registration_departments.is_empty() || config.election_departments.is_empty() {
        return Err(UniVoteError::Config(
            "Department lists cannot be empty".to_string()
        ));
    }

    Ok(())
}

/// Validate role-claim token configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.token_secret.is_empty() {
        return Err(UniVoteError::Config(
            "Token secret is required".to_string()
        ));
    }

    if config.token_ttl_minutes <= 0 {
        return Err(UniVoteError::Config(
            "Token TTL must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate timers
fn validate_timing_config(config: &super::TimingConfig) -> Result<()> {
    if config.countdown_refresh_secs == 0 {
        return Err(UniVoteError::Config(
            "Countdown refresh interval must be greater than 0".to_string()
        ));
    }

    if config.service_timeout_ms == 0 {
        return Err(UniVoteError::Config(
            "Service timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(UniVoteError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(UniVoteError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
