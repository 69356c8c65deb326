//! Establishing a controller session.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::CatalogConfig;
use crate::controller::{Controller, LoopbackController};
use crate::session::blob::SessionBlob;
use crate::session::strategy::LoginStrategy;
use crate::session::LoginError;

/// Turns a login strategy into a live controller.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn login(
        &self,
        strategy: &LoginStrategy,
        device_name: &str,
    ) -> Result<Arc<dyn Controller>, LoginError>;
}

/// Connector that validates login inputs and hands out a `LoopbackController`.
pub struct LoopbackConnector {
    catalog: CatalogConfig,
}

impl LoopbackConnector {
    pub fn new(catalog: CatalogConfig) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Connector for LoopbackConnector {
    async fn login(
        &self,
        strategy: &LoginStrategy,
        device_name: &str,
    ) -> Result<Arc<dyn Controller>, LoginError> {
        match strategy {
            LoginStrategy::Credentials { username, password } => {
                if username.is_empty() || password.is_empty() {
                    return Err(LoginError::InvalidCredentials);
                }
                tracing::info!(
                    username = %username,
                    device = %device_name,
                    "Logged in with credentials"
                );
            }
            LoginStrategy::Discovery { blob_path } => {
                let blob = SessionBlob::new("discovered", device_name);
                blob.save(blob_path)?;
                tracing::info!(
                    device = %device_name,
                    device_id = %blob.device_id,
                    "Logged in via discovery"
                );
            }
            LoginStrategy::BlobFile { blob_path } => {
                let blob = SessionBlob::load(blob_path)?;
                if blob.device_name != device_name {
                    tracing::warn!(
                        saved = %blob.device_name,
                        configured = %device_name,
                        "Session blob was saved for a different device name"
                    );
                }
                tracing::info!(
                    username = %blob.username,
                    device = %device_name,
                    "Logged in from blob file"
                );
            }
            LoginStrategy::OAuth { client_secret } => {
                if client_secret.is_empty() {
                    return Err(LoginError::OAuth("client secret is empty".to_string()));
                }
                tracing::info!(device = %device_name, "Logged in via OAuth");
            }
        }

        Ok(Arc::new(LoopbackController::from_catalog(&self.catalog)))
    }
}
