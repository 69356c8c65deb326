//! Controller data types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A remote playback target.
///
/// `Default` is the placeholder handle used when no device matches:
/// empty name and empty ident.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectDevice {
    pub name: String,
    pub ident: String,
}

impl ConnectDevice {
    pub fn new(name: impl Into<String>, ident: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ident: ident.into(),
        }
    }

    /// True for the placeholder returned when resolution fails.
    pub fn is_placeholder(&self) -> bool {
        self.ident.is_empty()
    }
}

/// Transport commands a device understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportAction {
    Play,
    Pause,
    Next,
    Prev,
}

impl TransportAction {
    /// Parse a command name. Only the exact lowercase names are accepted.
    pub fn parse(command: &str) -> Option<Self> {
        match command {
            "play" => Some(Self::Play),
            "pause" => Some(Self::Pause),
            "next" => Some(Self::Next),
            "prev" => Some(Self::Prev),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Next => "next",
            Self::Prev => "prev",
        }
    }
}

impl std::fmt::Display for TransportAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One track reference inside a playlist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub uri: String,
}

/// Ordered items of a playlist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistContents {
    pub items: Vec<PlaylistItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistAttributes {
    pub name: String,
}

/// A playlist as returned by the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub attributes: PlaylistAttributes,

    /// `None` when the controller returned no contents for this playlist.
    pub contents: Option<PlaylistContents>,
}

impl Playlist {
    pub fn new(name: impl Into<String>, uris: Option<Vec<String>>) -> Self {
        Self {
            attributes: PlaylistAttributes { name: name.into() },
            contents: uris.map(|uris| PlaylistContents {
                items: uris.into_iter().map(|uri| PlaylistItem { uri }).collect(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.attributes.name
    }

    /// Item URIs in order, or `None` if the playlist has no contents.
    pub fn uris(&self) -> Option<impl Iterator<Item = &str>> {
        self.contents
            .as_ref()
            .map(|c| c.items.iter().map(|item| item.uri.as_str()))
    }
}

/// Errors that can occur during controller operations.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// No device with this ident is known.
    #[error("Unknown device: '{0}'")]
    UnknownDevice(String),

    /// The requested playlist does not exist.
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(String),

    /// Sending a message to the device ecosystem failed.
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Result type for controller operations.
pub type ControllerResult<T> = Result<T, ControllerError>;
