//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, timeout)
//!     → request.rs (lenient JSON decoding, URI normalization)
//!     → handlers.rs (device resolution, controller calls)
//!     → response.rs (status payload, playlist summaries, 404s)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{LenientJson, X_REQUEST_ID};
pub use response::{PlaylistSummary, StatusResponse};
pub use server::{AppState, HttpServer};
