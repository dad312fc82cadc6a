//! HTTP surface subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, global middleware stack, per-route stages)
//!     → validation.rs (query parameter checks & normalization)
//!     → handlers.rs (lookup, search, test-data, health, 404 fallback)
//!     → error.rs (ApiError → JSON error body)
//! ```

pub mod error;
pub mod handlers;
pub mod request_log;
pub mod server;
pub mod validation;

pub use server::{AppState, HttpServer};
