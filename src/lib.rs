//! Esports Data Proxy Library
//!
//! Two read-only JSON endpoints backed by a third-party esports API, plus a
//! static file server for the web frontend.
//!
//! ```text
//!   Browser ──▶ http::server ──▶ http::params ──▶ upstream::client ──▶ Esports API
//!           ◀── JSON array   ◀── http::handlers ◀── upstream::types ◀──
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
