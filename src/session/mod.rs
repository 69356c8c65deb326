//! Login and session establishment.
//!
//! # Data Flow
//! ```text
//! CLI flags + config + client_secret env
//!     → strategy.rs (pick exactly one LoginStrategy)
//!     → connector.rs (login, may read/write blob.rs)
//!     → Arc<dyn Controller>
//! ```
//!
//! # Design Decisions
//! - Selection is pure apart from one check that the blob file exists
//! - Any login error is fatal at startup; no retry

pub mod blob;
pub mod connector;
pub mod strategy;

use std::path::PathBuf;

use thiserror::Error;

use crate::controller::ControllerError;

pub use blob::SessionBlob;
pub use connector::{Connector, LoopbackConnector};
pub use strategy::{LoginInputs, LoginStrategy, CLIENT_SECRET_ENV};

/// Errors that can occur while logging in.
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Cannot access session blob {}: {source}", path.display())]
    BlobIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed session blob {}: {source}", path.display())]
    BlobFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("OAuth login failed: {0}")]
    OAuth(String),

    #[error("Controller error: {0}")]
    Controller(#[from] ControllerError),
}
