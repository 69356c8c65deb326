//! Request bodies and URI normalization.
//!
//! # Design Decisions
//! - Bodies that fail to decode become the default value; callers never
//!   see a rejection (see `LenientJson`)
//! - Prefix stripping removes the prefix once, and only when present

use std::convert::Infallible;

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Header carrying the per-request UUID.
pub const X_REQUEST_ID: &str = "x-request-id";

const TRACK_PREFIX: &str = "spotify:track:";
const URI_SCHEME: &str = "spotify:";

/// Body of `POST /track` and `POST /playlists`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackRequest {
    pub id: String,
}

/// Body of `POST /tracks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracklistRequest {
    pub ids: Vec<String>,
}

/// Body of `POST /command`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandRequest {
    pub command: String,
}

/// `spotify:track:abc` → `abc`. Other input is returned unchanged.
pub fn strip_track_prefix(uri: &str) -> &str {
    uri.strip_prefix(TRACK_PREFIX).unwrap_or(uri)
}

/// `spotify:user:a:playlist:b` → `user/a/playlist/b`.
pub fn normalize_playlist_id(uri: &str) -> String {
    uri.strip_prefix(URI_SCHEME).unwrap_or(uri).replace(':', "/")
}

/// JSON extractor that never rejects.
///
/// A body that cannot be read or parsed yields `T::default()`.
#[derive(Debug, Clone, Default)]
pub struct LenientJson<T>(pub T);

impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = match Bytes::from_request(req, state).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!(error = %e, "Unreadable request body, using defaults");
                return Ok(Self(T::default()));
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(Self(value)),
            Err(e) => {
                tracing::debug!(error = %e, "Malformed JSON body, using defaults");
                Ok(Self(T::default()))
            }
        }
    }
}
