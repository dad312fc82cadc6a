//! Authentication and authorization subsystem.
//!
//! # Data Flow
//! ```text
//! Authorization: Bearer <jwt>
//!     → middleware.rs require_auth (verify signature + expiry)
//!     → Identity attached to request extensions
//!     → middleware.rs require_role (per-route role set)
//!     → middleware.rs require_feature (process-wide flag)
//! ```
//!
//! # Design Decisions
//! - Tokens are self-contained HS256 JWTs; expiry is the only invalidation
//! - Verification failure is "unauthenticated", never a 500
//! - The `admin` role is privileged: it bypasses the rate limiter

pub mod middleware;
pub mod token;

pub use token::{Identity, TokenService, TokenSubject, ROLE_ADMIN, ROLE_QA};
