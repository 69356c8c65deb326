//! In-process controller backed by a static catalog.
//!
//! Devices and playlists come from the `[catalog]` config section. Device
//! playback state (queue, position, playing flag) is tracked per ident so
//! the effect of each command can be observed.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::config::CatalogConfig;
use crate::controller::types::{
    ConnectDevice, ControllerError, ControllerResult, Playlist, TransportAction,
};
use crate::controller::Controller;

const URI_SCHEME: &str = "spotify:";

/// Playback state of one device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceState {
    /// Loaded track ids, in play order.
    pub queue: Vec<String>,
    /// Index into `queue` of the current track.
    pub position: usize,
    pub playing: bool,
}

impl DeviceState {
    pub fn current_track(&self) -> Option<&str> {
        self.queue.get(self.position).map(String::as_str)
    }

    fn apply(&mut self, action: TransportAction) {
        match action {
            TransportAction::Play => self.playing = true,
            TransportAction::Pause => self.playing = false,
            TransportAction::Next => {
                if self.position + 1 < self.queue.len() {
                    self.position += 1;
                }
            }
            TransportAction::Prev => self.position = self.position.saturating_sub(1),
        }
    }
}

/// Controller that answers from memory.
pub struct LoopbackController {
    devices: Vec<ConnectDevice>,
    /// (normalized id, playlist), in catalog order.
    playlists: Vec<(String, Playlist)>,
    states: DashMap<String, DeviceState>,
    /// Set by `send_hello`; devices are invisible before that.
    discovered: AtomicBool,
}

impl LoopbackController {
    /// Build a controller from a catalog.
    pub fn from_catalog(catalog: &CatalogConfig) -> Self {
        let devices: Vec<ConnectDevice> = catalog
            .devices
            .iter()
            .map(|d| ConnectDevice::new(&d.name, &d.ident))
            .collect();

        let states = DashMap::new();
        for device in &devices {
            states.insert(device.ident.clone(), DeviceState::default());
        }

        let playlists = catalog
            .playlists
            .iter()
            .map(|p| (p.id.clone(), Playlist::new(&p.name, p.tracks.clone())))
            .collect();

        Self {
            devices,
            playlists,
            states,
            discovered: AtomicBool::new(false),
        }
    }

    /// Snapshot of a device's playback state.
    pub fn device_state(&self, ident: &str) -> Option<DeviceState> {
        self.states.get(ident).map(|s| s.value().clone())
    }

    /// Whether `send_hello` has been called.
    pub fn is_discovered(&self) -> bool {
        self.discovered.load(Ordering::Acquire)
    }
}

/// Turn a normalized playlist id back into its URI form.
fn playlist_uri(id: &str) -> String {
    format!("{}{}", URI_SCHEME, id.replace('/', ":"))
}

#[async_trait]
impl Controller for LoopbackController {
    async fn send_hello(&self) -> ControllerResult<()> {
        self.discovered.store(true, Ordering::Release);
        tracing::debug!(devices = self.devices.len(), "Hello sent, devices discovered");
        Ok(())
    }

    async fn list_devices(&self) -> ControllerResult<Vec<ConnectDevice>> {
        if !self.is_discovered() {
            return Ok(Vec::new());
        }
        Ok(self.devices.clone())
    }

    async fn load_track(&self, ident: &str, track_ids: &[String]) -> ControllerResult<()> {
        let mut state = self
            .states
            .get_mut(ident)
            .ok_or_else(|| ControllerError::UnknownDevice(ident.to_string()))?;

        state.queue = track_ids.to_vec();
        state.position = 0;
        state.playing = false;

        tracing::debug!(ident = %ident, tracks = track_ids.len(), "Queue loaded");
        Ok(())
    }

    async fn send_transport(&self, ident: &str, action: TransportAction) -> ControllerResult<()> {
        let mut state = self
            .states
            .get_mut(ident)
            .ok_or_else(|| ControllerError::UnknownDevice(ident.to_string()))?;

        state.apply(action);

        tracing::debug!(
            ident = %ident,
            action = %action,
            position = state.position,
            playing = state.playing,
            "Transport command applied"
        );
        Ok(())
    }

    async fn get_playlist(&self, id: &str) -> ControllerResult<Playlist> {
        self.playlists
            .iter()
            .find(|(pid, _)| pid == id)
            .map(|(_, playlist)| playlist.clone())
            .ok_or_else(|| ControllerError::PlaylistNotFound(id.to_string()))
    }

    async fn get_root_playlist(&self) -> ControllerResult<Playlist> {
        if self.playlists.is_empty() {
            return Ok(Playlist::new("root", None));
        }

        let uris = self.playlists.iter().map(|(id, _)| playlist_uri(id)).collect();
        Ok(Playlist::new("root", Some(uris)))
    }
}
