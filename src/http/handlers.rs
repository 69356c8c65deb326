//! Route handlers.
//!
//! Each handler resolves the controlled device fresh, issues controller
//! calls and answers with a fixed status payload. Controller failures on
//! load/transport calls are logged and do not change the reply; only the
//! playlist lookups can produce a 404.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};

use crate::controller::{Playlist, TransportAction};
use crate::http::request::{
    normalize_playlist_id, strip_track_prefix, CommandRequest, LenientJson, TrackRequest,
    TracklistRequest,
};
use crate::http::response::{
    not_found, PlaylistSummary, StatusResponse, PLAYLIST_NOT_FOUND, ROOT_LIST_NOT_FOUND,
};
use crate::http::server::AppState;
use crate::observability::metrics;

/// `GET /`: report the device commands would go to.
pub async fn index(State(state): State<AppState>) -> String {
    let device = state.resolver.resolve().await;
    format!("Found {}: {}\n", device.name, device.ident)
}

/// `POST /track`
pub async fn play_track(
    State(state): State<AppState>,
    LenientJson(request): LenientJson<TrackRequest>,
) -> StatusResponse {
    let ids = vec![strip_track_prefix(&request.id).to_string()];
    load_and_play(&state, &ids).await;
    StatusResponse::success()
}

/// `POST /tracks`
pub async fn play_tracks(
    State(state): State<AppState>,
    LenientJson(request): LenientJson<TracklistRequest>,
) -> StatusResponse {
    let ids: Vec<String> = request
        .ids
        .iter()
        .map(|id| strip_track_prefix(id).to_string())
        .collect();
    load_and_play(&state, &ids).await;
    StatusResponse::success()
}

/// `POST /playlists`: play every track of one playlist.
pub async fn play_playlist(
    State(state): State<AppState>,
    LenientJson(request): LenientJson<TrackRequest>,
) -> Response {
    let playlist_id = normalize_playlist_id(&request.id);

    let playlist = match state.controller.get_playlist(&playlist_id).await {
        Ok(playlist) => playlist,
        Err(e) => {
            tracing::warn!(playlist_id = %playlist_id, error = %e, "Playlist not found");
            metrics::record_controller_error("get_playlist");
            return not_found(PLAYLIST_NOT_FOUND);
        }
    };

    let Some(uris) = playlist.uris() else {
        tracing::warn!(playlist_id = %playlist_id, "Playlist has no contents");
        return not_found(PLAYLIST_NOT_FOUND);
    };
    let ids: Vec<String> = uris.map(|uri| strip_track_prefix(uri).to_string()).collect();

    load_and_play(&state, &ids).await;
    StatusResponse::success().into_response()
}

/// `GET /playlists`: id and name of every playlist in the root list.
///
/// One controller call for the root, then one per child, in order.
pub async fn list_playlists(State(state): State<AppState>) -> Response {
    let root = match state.controller.get_root_playlist().await {
        Ok(Playlist {
            contents: Some(contents),
            ..
        }) => contents,
        Ok(_) => {
            tracing::warn!("Root list has no contents");
            return not_found(ROOT_LIST_NOT_FOUND);
        }
        Err(e) => {
            tracing::warn!(error = %e, "Error getting root list");
            metrics::record_controller_error("get_root_playlist");
            return not_found(ROOT_LIST_NOT_FOUND);
        }
    };

    let mut summaries = Vec::with_capacity(root.items.len());
    for item in &root.items {
        let id = normalize_playlist_id(&item.uri);
        let name = match state.controller.get_playlist(&id).await {
            Ok(playlist) => playlist.attributes.name,
            Err(e) => {
                tracing::warn!(playlist_id = %id, error = %e, "Child playlist lookup failed");
                metrics::record_controller_error("get_playlist");
                String::new()
            }
        };
        summaries.push(PlaylistSummary { id, name });
    }

    Json(summaries).into_response()
}

/// `POST /command`: dispatch a transport action. Unknown names are ignored.
pub async fn execute_command(
    State(state): State<AppState>,
    LenientJson(request): LenientJson<CommandRequest>,
) -> StatusResponse {
    let device = state.resolver.resolve().await;

    match TransportAction::parse(&request.command) {
        Some(action) => {
            let _guard = state.command_lock.lock().await;
            if let Err(e) = state.controller.send_transport(&device.ident, action).await {
                tracing::warn!(
                    ident = %device.ident,
                    action = %action,
                    error = %e,
                    "Transport command failed"
                );
                metrics::record_controller_error("send_transport");
            }
        }
        None => {
            tracing::debug!(command = %request.command, "Ignoring unknown command");
        }
    }

    StatusResponse::success()
}

/// Resolve the device, replace its queue and start playback.
///
/// The whole sequence runs under the command lock so concurrent requests
/// cannot interleave their load and play calls.
async fn load_and_play(state: &AppState, ids: &[String]) {
    let _guard = state.command_lock.lock().await;
    let device = state.resolver.resolve().await;

    if let Err(e) = state.controller.load_track(&device.ident, ids).await {
        tracing::warn!(ident = %device.ident, error = %e, "Loading tracks failed");
        metrics::record_controller_error("load_track");
    }

    if let Err(e) = state
        .controller
        .send_transport(&device.ident, TransportAction::Play)
        .await
    {
        tracing::warn!(ident = %device.ident, error = %e, "Play command failed");
        metrics::record_controller_error("send_transport");
    }

    tracing::info!(ident = %device.ident, tracks = ids.len(), "Playback requested");
}
