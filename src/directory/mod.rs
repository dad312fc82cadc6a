//! Customer directory subsystem.
//!
//! # Data Flow
//! ```text
//! fixture records (records.rs)
//!     → CustomerDirectory::seed() at startup (immutable, in-memory)
//!     → find(criteria) / search(filters) from the lookup handlers
//! ```
//!
//! # Design Decisions
//! - Records are immutable for the process lifetime; never persisted back
//! - Lookup is a linear scan — fine at four records; an indexed map keyed by
//!   phone/email/customerId would be the behavior-preserving upgrade path
//! - Phone matching normalizes both sides to digits-only; email matching
//!   lower-cases both sides; customerId is exact and case-sensitive

pub mod records;
pub mod store;

pub use records::CustomerRecord;
pub use store::{normalize_phone, CustomerDirectory, LookupCriteria};
