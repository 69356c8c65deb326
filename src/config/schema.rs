//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the bridge.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Default name this bridge announces itself as.
pub const DEFAULT_DEVICE_NAME: &str = "SpotControlServer";

/// Default name of the playback device the bridge drives.
pub const DEFAULT_CONTROLLED_DEVICE: &str = "SpotControl";

/// Root configuration for the bridge.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BridgeConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Device naming.
    pub device: DeviceConfig,

    /// Login inputs. CLI flags take precedence over these.
    pub login: LoginConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Devices and playlists served by the loopback controller.
    pub catalog: CatalogConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Names used when logging in and when resolving the target device.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Name the bridge registers under.
    pub name: String,

    /// Name of the device that receives playback commands (exact match).
    pub controlled: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_DEVICE_NAME.to_string(),
            controlled: DEFAULT_CONTROLLED_DEVICE.to_string(),
        }
    }
}

/// Login inputs.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LoginConfig {
    pub username: String,
    pub password: String,

    /// Path to a saved session blob.
    pub blob_path: String,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds. 0 disables the timeout.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// Catalog backing the loopback controller.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CatalogConfig {
    pub devices: Vec<CatalogDevice>,
    pub playlists: Vec<CatalogPlaylist>,
}

/// A playback device known to the loopback controller.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogDevice {
    pub name: String,

    /// Opaque device identifier.
    pub ident: String,
}

/// A playlist known to the loopback controller.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogPlaylist {
    /// Normalized playlist id, e.g. "user/alice/playlist/37i9dQ".
    pub id: String,

    /// Display name.
    pub name: String,

    /// Track URIs. A playlist without this key has no contents.
    #[serde(default)]
    pub tracks: Option<Vec<String>>,
}
