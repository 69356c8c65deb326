//! Resolving the controlled device by name.
//!
//! The device list is fetched from the controller on every call. Nothing is
//! cached, so a device that appears or disappears is seen by the next request.

use std::sync::Arc;

use crate::controller::{ConnectDevice, Controller};

/// Finds the device commands should be sent to.
#[derive(Clone)]
pub struct DeviceResolver {
    controller: Arc<dyn Controller>,
    target: String,
}

impl DeviceResolver {
    pub fn new(controller: Arc<dyn Controller>, target: impl Into<String>) -> Self {
        Self {
            controller,
            target: target.into(),
        }
    }

    /// Return the first device whose name equals the target exactly.
    ///
    /// Never fails: an empty list, a listing error or no match all yield
    /// the placeholder `ConnectDevice::default()`.
    pub async fn resolve(&self) -> ConnectDevice {
        let devices = match self.controller.list_devices().await {
            Ok(devices) => devices,
            Err(e) => {
                tracing::warn!(error = %e, "Listing devices failed");
                crate::observability::metrics::record_controller_error("list_devices");
                Vec::new()
            }
        };

        if devices.is_empty() {
            tracing::warn!("Could not find device!");
        }

        match devices.into_iter().find(|d| d.name == self.target) {
            Some(device) => {
                tracing::info!(device = %device.name, ident = %device.ident, "Found device");
                device
            }
            None => {
                tracing::debug!(
                    target_device = %self.target,
                    "No device matched, using placeholder"
                );
                ConnectDevice::default()
            }
        }
    }
}

impl std::fmt::Debug for DeviceResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceResolver")
            .field("target", &self.target)
            .finish()
    }
}
