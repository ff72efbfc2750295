//! Upstream esports API integration.
//!
//! # Data Flow
//! ```text
//! handler (normalized params)
//!     → client.rs (build URL, bearer auth, deadline)
//!     → one GET round trip
//!     → types.rs (decode JSON array, null → [])
//!     → error.rs on any failure
//! ```
//!
//! # Design Decisions
//! - No retries and no caching; every failure surfaces on the same request
//! - Dropping the call future aborts the outbound request, so inbound
//!   cancellation propagates for free

pub mod client;
pub mod error;
pub mod types;

pub use client::UpstreamClient;
pub use error::{UpstreamError, UpstreamResult};
pub use types::{League, Match, OpponentEntry, Team};
