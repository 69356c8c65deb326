//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, metrics)
//! - Bind server to listener and run until shutdown

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{MatchedPath, Request},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, Mutex};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::BridgeConfig;
use crate::controller::Controller;
use crate::devices::DeviceResolver;
use crate::http::handlers;
use crate::lifecycle::shutdown_requested;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide controller handle.
    pub controller: Arc<dyn Controller>,
    pub resolver: DeviceResolver,
    /// Serializes multi-step command sequences against the controller.
    pub command_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(controller: Arc<dyn Controller>, controlled_device: impl Into<String>) -> Self {
        Self {
            resolver: DeviceResolver::new(controller.clone(), controlled_device),
            controller,
            command_lock: Arc::new(Mutex::new(())),
        }
    }
}

/// HTTP server for the bridge.
pub struct HttpServer {
    router: Router,
    config: BridgeConfig,
}

impl HttpServer {
    /// Create a new HTTP server around an already logged-in controller.
    pub fn new(config: BridgeConfig, controller: Arc<dyn Controller>) -> Self {
        let state = AppState::new(controller, config.device.controlled.clone());
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(config: &BridgeConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/", get(handlers::index))
            .route("/track", post(handlers::play_track))
            .route("/tracks", post(handlers::play_tracks))
            .route(
                "/playlists",
                get(handlers::list_playlists).post(handlers::play_playlist),
            )
            .route("/command", post(handlers::execute_command))
            .route_layer(middleware::from_fn(track_metrics))
            .with_state(state);

        if config.timeouts.request_secs > 0 {
            router = router.layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )));
        }

        router.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
    }

    /// The configured router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires or an OS signal arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            controlled = %self.config.device.controlled,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_requested(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Record request count and latency per matched route.
async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let response = next.run(request).await;
    metrics::record_request(&route, response.status().as_u16(), start);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, StatusCode};
    use tower::ServiceExt;

    use crate::config::{CatalogConfig, CatalogDevice, CatalogPlaylist};
    use crate::controller::{
        ConnectDevice, ControllerError, ControllerResult, LoopbackController, Playlist,
        TransportAction,
    };
    use crate::http::request::X_REQUEST_ID;

    /// Takes `delay` to list devices; nothing else is reachable from `GET /`.
    struct SlowController {
        delay: Duration,
    }

    #[async_trait]
    impl Controller for SlowController {
        async fn send_hello(&self) -> ControllerResult<()> {
            Ok(())
        }

        async fn list_devices(&self) -> ControllerResult<Vec<ConnectDevice>> {
            tokio::time::sleep(self.delay).await;
            Ok(vec![ConnectDevice::new("SpotControl", "slow-1")])
        }

        async fn load_track(&self, _ident: &str, _track_ids: &[String]) -> ControllerResult<()> {
            Ok(())
        }

        async fn send_transport(
            &self,
            _ident: &str,
            _action: TransportAction,
        ) -> ControllerResult<()> {
            Ok(())
        }

        async fn get_playlist(&self, id: &str) -> ControllerResult<Playlist> {
            Err(ControllerError::PlaylistNotFound(id.to_string()))
        }

        async fn get_root_playlist(&self) -> ControllerResult<Playlist> {
            Ok(Playlist::default())
        }
    }

    fn slow_app(delay: Duration, request_secs: u64) -> Router {
        let mut config = BridgeConfig::default();
        config.timeouts.request_secs = request_secs;
        HttpServer::new(config, Arc::new(SlowController { delay })).router()
    }

    async fn loopback() -> Arc<LoopbackController> {
        let controller = LoopbackController::from_catalog(&CatalogConfig {
            devices: vec![CatalogDevice {
                name: "SpotControl".into(),
                ident: "dev-1".into(),
            }],
            playlists: vec![
                CatalogPlaylist {
                    id: "user/alice/playlist/1".into(),
                    name: "Morning".into(),
                    tracks: Some(vec!["spotify:track:aaa".into(), "spotify:track:bbb".into()]),
                },
                CatalogPlaylist {
                    id: "user/alice/playlist/2".into(),
                    name: "Draft".into(),
                    tracks: None,
                },
            ],
        });
        controller.send_hello().await.unwrap();
        Arc::new(controller)
    }

    fn app(controller: Arc<LoopbackController>) -> Router {
        let config = BridgeConfig::default();
        HttpServer::new(config, controller).router()
    }

    async fn send(app: Router, method: Method, uri: &str, body: &str) -> (StatusCode, String) {
        let request = axum::http::Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_index_reports_device() {
        let (status, body) = send(app(loopback().await), Method::GET, "/", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Found SpotControl: dev-1\n");
    }

    #[tokio::test]
    async fn test_play_track_strips_prefix() {
        let controller = loopback().await;
        let (status, body) = send(
            app(controller.clone()),
            Method::POST,
            "/track",
            r#"{"id":"spotify:track:xyz"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"status":"success"}"#);

        let state = controller.device_state("dev-1").unwrap();
        assert_eq!(state.queue, vec!["xyz".to_string()]);
        assert!(state.playing);
    }

    #[tokio::test]
    async fn test_play_playlist() {
        let controller = loopback().await;
        let (status, _) = send(
            app(controller.clone()),
            Method::POST,
            "/playlists",
            r#"{"id":"spotify:user:alice:playlist:1"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let state = controller.device_state("dev-1").unwrap();
        assert_eq!(state.queue, vec!["aaa".to_string(), "bbb".to_string()]);
    }

    #[tokio::test]
    async fn test_playlist_without_contents_is_404() {
        let controller = loopback().await;
        let (status, body) = send(
            app(controller.clone()),
            Method::POST,
            "/playlists",
            r#"{"id":"spotify:user:alice:playlist:2"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Could not find playlist"));
        assert!(controller.device_state("dev-1").unwrap().queue.is_empty());
    }

    #[tokio::test]
    async fn test_list_playlists() {
        let (status, body) = send(app(loopback().await), Method::GET, "/playlists", "").await;
        assert_eq!(status, StatusCode::OK);

        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {"id": "user/alice/playlist/1", "name": "Morning"},
                {"id": "user/alice/playlist/2", "name": "Draft"},
            ])
        );
    }

    #[tokio::test]
    async fn test_command_next() {
        let controller = loopback().await;
        controller
            .load_track("dev-1", &["a".into(), "b".into()])
            .await
            .unwrap();

        let (status, body) = send(
            app(controller.clone()),
            Method::POST,
            "/command",
            r#"{"command":"next"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"status":"success"}"#);
        assert_eq!(controller.device_state("dev-1").unwrap().current_track(), Some("b"));
    }

    #[tokio::test]
    async fn test_wrong_method_is_rejected() {
        let (status, _) = send(app(loopback().await), Method::GET, "/track", "").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_slow_controller_times_out() {
        let app = slow_app(Duration::from_secs(3), 1);

        let started = Instant::now();
        let (status, _) = send(app, Method::GET, "/", "").await;

        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_zero_request_secs_disables_timeout() {
        let app = slow_app(Duration::from_millis(1500), 0);

        let (status, body) = send(app, Method::GET, "/", "").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Found SpotControl: slow-1\n");
    }

    #[tokio::test]
    async fn test_request_id_header() {
        let request = axum::http::Request::builder()
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let response = app(loopback().await).oneshot(request).await.unwrap();
        let id = response.headers()[X_REQUEST_ID].to_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());

        let request = axum::http::Request::builder()
            .uri("/")
            .header(X_REQUEST_ID, "caller-supplied")
            .body(Body::empty())
            .unwrap();
        let response = app(loopback().await).oneshot(request).await.unwrap();
        assert_eq!(response.headers().get(X_REQUEST_ID).unwrap(), "caller-supplied");
    }
}
