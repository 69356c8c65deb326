//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → CLI flags applied on top in main
//!     → validation.rs (semantic checks on the merged result)
//!     → BridgeConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, read_config, ConfigError};
pub use schema::BridgeConfig;
pub use schema::CatalogConfig;
pub use schema::CatalogDevice;
pub use schema::CatalogPlaylist;
pub use schema::DeviceConfig;
pub use schema::ListenerConfig;
pub use validation::{validate_config, ValidationError};
