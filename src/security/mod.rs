//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → headers.rs (attach defensive response headers, never rejects)
//!     → cors.rs (reject unlisted origins, answer preflights)
//!     → rate_limit.rs (per-identity-or-IP window counters)
//!     → Pass to handlers
//! ```
//!
//! # Design Decisions
//! - Fail closed: any check failure rejects the request
//! - Every rejection writes one audit entry before returning
//! - No trust in client input

pub mod cors;
pub mod headers;
pub mod rate_limit;

pub use rate_limit::RateLimiter;
