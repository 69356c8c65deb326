//! Startup orchestration.
//!
//! # Responsibilities
//! - Log in with the selected strategy
//! - Send the hello message before any request is served
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, no retry

use std::sync::Arc;

use crate::controller::Controller;
use crate::session::{Connector, LoginError, LoginStrategy};

/// Log in and announce the controller. The returned handle lives for the
/// rest of the process.
pub async fn connect(
    connector: &dyn Connector,
    strategy: &LoginStrategy,
    device_name: &str,
) -> Result<Arc<dyn Controller>, LoginError> {
    tracing::info!(strategy = strategy.kind(), device = %device_name, "Logging in");

    let controller = connector.login(strategy, device_name).await?;
    controller.send_hello().await?;

    Ok(controller)
}
