//! Response payloads.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

pub const PLAYLIST_NOT_FOUND: &str = "404 - Could not find playlist";
pub const ROOT_LIST_NOT_FOUND: &str = "404 - Could not find root list";

/// Fixed reply of every command endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}

impl IntoResponse for StatusResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// One entry of `GET /playlists`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
}

/// Plain-text 404.
pub fn not_found(message: &'static str) -> Response {
    (StatusCode::NOT_FOUND, message).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_json() {
        let json = serde_json::to_string(&StatusResponse::success()).unwrap();
        assert_eq!(json, r#"{"status":"success"}"#);
    }

    #[test]
    fn test_summary_has_exactly_id_and_name() {
        let value = serde_json::to_value(PlaylistSummary {
            id: "user/a/playlist/1".into(),
            name: "Mix".into(),
        })
        .unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["id", "name"]);
    }

    #[test]
    fn test_not_found_status() {
        assert_eq!(not_found(PLAYLIST_NOT_FOUND).status(), StatusCode::NOT_FOUND);
    }
}
