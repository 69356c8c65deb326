//! Login strategy selection.

use std::path::PathBuf;

/// Environment variable that enables OAuth login when set.
pub const CLIENT_SECRET_ENV: &str = "client_secret";

/// Raw login inputs gathered from flags, config and environment.
#[derive(Debug, Clone, Default)]
pub struct LoginInputs {
    pub username: String,
    pub password: String,
    pub blob_path: String,
    /// Value of the client secret variable, if set.
    pub client_secret: Option<String>,
}

impl LoginInputs {
    /// Read the client secret from the process environment.
    pub fn with_env_secret(mut self) -> Self {
        self.client_secret = std::env::var(CLIENT_SECRET_ENV).ok();
        self
    }
}

/// How the controller session is established.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStrategy {
    /// Direct username/password login.
    Credentials { username: String, password: String },

    /// No saved blob yet: wait for discovery and write the blob here.
    Discovery { blob_path: PathBuf },

    /// Restore a saved session blob.
    BlobFile { blob_path: PathBuf },

    /// OAuth flow using the client secret.
    OAuth { client_secret: String },
}

impl LoginStrategy {
    /// Pick a strategy in precedence order: credentials, blob path, OAuth.
    ///
    /// Returns `None` when no input is usable; the caller prints usage.
    pub fn select(inputs: &LoginInputs) -> Option<Self> {
        if !inputs.username.is_empty() && !inputs.password.is_empty() {
            return Some(Self::Credentials {
                username: inputs.username.clone(),
                password: inputs.password.clone(),
            });
        }

        if !inputs.blob_path.is_empty() {
            let blob_path = PathBuf::from(&inputs.blob_path);
            return Some(if blob_path.exists() {
                Self::BlobFile { blob_path }
            } else {
                Self::Discovery { blob_path }
            });
        }

        match &inputs.client_secret {
            Some(secret) if !secret.is_empty() => Some(Self::OAuth {
                client_secret: secret.clone(),
            }),
            _ => None,
        }
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Credentials { .. } => "credentials",
            Self::Discovery { .. } => "discovery",
            Self::BlobFile { .. } => "blob_file",
            Self::OAuth { .. } => "oauth",
        }
    }
}
