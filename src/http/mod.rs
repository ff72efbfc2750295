//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → handlers.rs
//!         → params.rs (normalize query string)
//!         → upstream client (one round trip)
//!         → response.rs (JSON array, or status + plain text)
//!     → Send to client
//!
//! Any other path → static frontend bundle (or 404)
//! ```

pub mod handlers;
pub mod params;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::ApiError;
pub use server::{AppState, HttpServer};
