//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (bind address parses, names non-empty)
//! - Detect catalog conflicts (duplicate device names or playlist ids)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BridgeConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::BridgeConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("device.name must not be empty")]
    EmptyDeviceName,

    #[error("device.controlled must not be empty")]
    EmptyControlledName,

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),

    #[error("duplicate catalog device name '{0}'")]
    DuplicateDevice(String),

    #[error("duplicate catalog playlist id '{0}'")]
    DuplicatePlaylist(String),
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &BridgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.device.name.is_empty() {
        errors.push(ValidationError::EmptyDeviceName);
    }
    if config.device.controlled.is_empty() {
        errors.push(ValidationError::EmptyControlledName);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    let mut names = HashSet::new();
    for device in &config.catalog.devices {
        if !names.insert(device.name.as_str()) {
            errors.push(ValidationError::DuplicateDevice(device.name.clone()));
        }
    }

    let mut ids = HashSet::new();
    for playlist in &config.catalog.playlists {
        if !ids.insert(playlist.id.as_str()) {
            errors.push(ValidationError::DuplicatePlaylist(playlist.id.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
