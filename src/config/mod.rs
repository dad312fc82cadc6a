//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (SCREENPOP_* vars)
//!     → loader.rs (read & parse, fall back to defaults)
//!     → ScreenPopConfig (immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; changes require a restart
//! - All fields have local-development defaults
//! - Unparseable numeric values fall back to defaults with a warning
//! - No ambient global lookups; the struct is passed by reference

pub mod loader;
pub mod schema;

pub use schema::ScreenPopConfig;
pub use schema::AuditConfig;
pub use schema::AuthConfig;
pub use schema::CorsConfig;
pub use schema::FeatureConfig;
pub use schema::ListenerConfig;
pub use schema::RateLimitConfig;
