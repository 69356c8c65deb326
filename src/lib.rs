//! REST bridge for a remote-control streaming device protocol.

pub mod config;
pub mod controller;
pub mod devices;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod session;

pub use config::schema::BridgeConfig;
pub use controller::Controller;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
