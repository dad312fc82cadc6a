//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits so tests and tooling can construct them
//! declaratively.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the Screen Pop API.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ScreenPopConfig {
    /// Listener configuration (bind address, request timeout).
    pub listener: ListenerConfig,

    /// Token signing and lifetime settings.
    pub auth: AuthConfig,

    /// CORS origin allow-list.
    pub cors: CorsConfig,

    /// Rate limiting configuration.
    pub rate_limit: RateLimitConfig,

    /// Audit log sink settings.
    pub audit: AuditConfig,

    /// Feature flag gating the lookup feature.
    pub feature: FeatureConfig,

    /// Production mode: internal error messages are redacted.
    pub production: bool,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,

    /// Request timeout (total time for request/response) in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Token signing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret.
    pub jwt_secret: String,

    /// Default token lifetime in hours.
    pub token_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            // WARNING: This is a placeholder! Change this in production.
            jwt_secret: "dev-secret-key-change-in-production".to_string(),
            token_ttl_hours: 24,
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Origins permitted to call the API. A request with an `Origin` header
    /// not in this list is rejected with 403.
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:3001".to_string(),
            ],
        }
    }
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Window duration in milliseconds.
    pub window_ms: u64,

    /// Maximum requests per key within one window.
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_ms: 3_600_000,
            max_requests: 100,
        }
    }
}

/// Audit log configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Path to the append-only audit log file. The containing directory is
    /// created on first write if absent.
    pub log_file: PathBuf,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("./logs/screenpop-audit.log"),
        }
    }
}

/// Feature flag configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Process-wide switch for the screen pop lookup feature. When false,
    /// secured endpoints reject with 403 regardless of identity.
    pub screenpop_enabled: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            screenpop_enabled: true,
        }
    }
}
