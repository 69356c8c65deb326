//! Shared utilities for integration tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use connect_bridge::config::BridgeConfig;
use connect_bridge::controller::{
    ConnectDevice, Controller, ControllerError, ControllerResult, Playlist, TransportAction,
};
use connect_bridge::{HttpServer, Shutdown};
use tokio::net::TcpListener;

/// A controller call as observed by `FakeController`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Hello,
    ListDevices,
    Load { ident: String, ids: Vec<String> },
    Transport { ident: String, action: TransportAction },
    GetPlaylist(String),
    GetRoot,
}

/// Controller fake that records every call and answers from fixed data.
#[derive(Default)]
pub struct FakeController {
    devices: Vec<ConnectDevice>,
    playlists: HashMap<String, Playlist>,
    /// `None` makes `get_root_playlist` fail.
    root: Option<Playlist>,
    calls: Mutex<Vec<Call>>,
}

#[allow(dead_code)]
impl FakeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device(mut self, name: &str, ident: &str) -> Self {
        self.devices.push(ConnectDevice::new(name, ident));
        self
    }

    pub fn with_playlist(mut self, id: &str, name: &str, uris: Option<Vec<&str>>) -> Self {
        let uris = uris.map(|u| u.into_iter().map(String::from).collect());
        self.playlists.insert(id.to_string(), Playlist::new(name, uris));
        self
    }

    pub fn with_root(mut self, child_uris: Option<Vec<&str>>) -> Self {
        let uris = child_uris.map(|u| u.into_iter().map(String::from).collect());
        self.root = Some(Playlist::new("root", uris));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls other than device listing, which every handler performs.
    pub fn commands(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::ListDevices))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Controller for FakeController {
    async fn send_hello(&self) -> ControllerResult<()> {
        self.record(Call::Hello);
        Ok(())
    }

    async fn list_devices(&self) -> ControllerResult<Vec<ConnectDevice>> {
        self.record(Call::ListDevices);
        Ok(self.devices.clone())
    }

    async fn load_track(&self, ident: &str, track_ids: &[String]) -> ControllerResult<()> {
        self.record(Call::Load {
            ident: ident.to_string(),
            ids: track_ids.to_vec(),
        });
        Ok(())
    }

    async fn send_transport(&self, ident: &str, action: TransportAction) -> ControllerResult<()> {
        self.record(Call::Transport {
            ident: ident.to_string(),
            action,
        });
        Ok(())
    }

    async fn get_playlist(&self, id: &str) -> ControllerResult<Playlist> {
        self.record(Call::GetPlaylist(id.to_string()));
        self.playlists
            .get(id)
            .cloned()
            .ok_or_else(|| ControllerError::PlaylistNotFound(id.to_string()))
    }

    async fn get_root_playlist(&self) -> ControllerResult<Playlist> {
        self.record(Call::GetRoot);
        self.root
            .clone()
            .ok_or_else(|| ControllerError::Transport("root list unavailable".to_string()))
    }
}

/// A bridge running on an ephemeral local port.
pub struct TestBridge {
    pub addr: SocketAddr,
    pub controller: Arc<FakeController>,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

#[allow(dead_code)]
impl TestBridge {
    pub async fn start(controller: FakeController) -> Self {
        let controller = Arc::new(controller);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let server = HttpServer::new(BridgeConfig::default(), controller.clone());
        let rx = shutdown.subscribe();
        tokio::spawn(async move {
            let _ = server.run(listener, rx).await;
        });

        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        Self {
            addr,
            controller,
            client,
            shutdown,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn post(&self, path: &str, body: &str) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("bridge unreachable")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("bridge unreachable")
    }

    pub fn stop(&self) {
        self.shutdown.trigger();
    }
}
