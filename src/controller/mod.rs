//! Remote-control controller subsystem.
//!
//! # Data Flow
//! ```text
//! session::Connector (login)
//!     → Arc<dyn Controller> (one per process)
//!     → send_hello (discovery starts)
//!     → shared with every HTTP handler via router state
//! ```
//!
//! # Design Decisions
//! - The wire protocol lives behind the `Controller` trait; this crate
//!   ships only the in-process `LoopbackController`
//! - Device lists are never cached here; callers ask every time

pub mod loopback;
pub mod types;

use async_trait::async_trait;

pub use loopback::{DeviceState, LoopbackController};
pub use types::{
    ConnectDevice, ControllerError, ControllerResult, Playlist, PlaylistAttributes,
    PlaylistContents, PlaylistItem, TransportAction,
};

/// An authenticated remote-control session.
#[async_trait]
pub trait Controller: Send + Sync {
    /// Announce this controller to the device ecosystem.
    async fn send_hello(&self) -> ControllerResult<()>;

    /// Devices currently visible to the session.
    async fn list_devices(&self) -> ControllerResult<Vec<ConnectDevice>>;

    /// Replace the queue of device `ident` with `track_ids`.
    async fn load_track(&self, ident: &str, track_ids: &[String]) -> ControllerResult<()>;

    /// Send a transport command to device `ident`.
    async fn send_transport(&self, ident: &str, action: TransportAction) -> ControllerResult<()>;

    /// Fetch a playlist by normalized id (`user/x/playlist/y`).
    async fn get_playlist(&self, id: &str) -> ControllerResult<Playlist>;

    /// Fetch the account's root playlist, whose items reference child playlists.
    async fn get_root_playlist(&self) -> ControllerResult<Playlist>;
}
