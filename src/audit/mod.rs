//! Audit logging subsystem.
//!
//! # Data Flow
//! ```text
//! pipeline stages & handlers
//!     → AuditEntry (timestamped, structured)
//!     → AuditLog::record()
//!         → console sink (tracing, target "audit")
//!         → file sink (append-only JSON lines, directory created on demand)
//! ```
//!
//! # Design Decisions
//! - Every terminal pipeline outcome writes exactly one entry
//! - Entries are append-only; nothing here updates or deletes
//! - A failed file write is logged to the console sink only; audit logging
//!   must never fail the request it is attached to

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Significant events recorded by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    HealthCheck,
    ApiRequest,
    AuthSuccess,
    AuthFailed,
    AuthorizationFailed,
    FeatureDisabled,
    CorsRejected,
    RateLimitExceeded,
    NotFound,
    Error,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::HealthCheck => "HEALTH_CHECK",
            Self::ApiRequest => "API_REQUEST",
            Self::AuthSuccess => "AUTH_SUCCESS",
            Self::AuthFailed => "AUTH_FAILED",
            Self::AuthorizationFailed => "AUTHORIZATION_FAILED",
            Self::FeatureDisabled => "FEATURE_DISABLED",
            Self::CorsRejected => "CORS_REJECTED",
            Self::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            Self::NotFound => "NOT_FOUND",
            Self::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// One append-only audit record.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub action: AuditAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(flatten)]
    pub detail: Map<String, Value>,
}

impl AuditEntry {
    /// Start an entry stamped with the current time.
    pub fn new(action: AuditAction) -> Self {
        Self {
            timestamp: Utc::now(),
            action,
            actor: None,
            ip: None,
            detail: Map::new(),
        }
    }

    #[must_use]
    pub fn actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    #[must_use]
    pub fn ip(mut self, ip: impl ToString) -> Self {
        self.ip = Some(ip.to_string());
        self
    }

    /// Attach an extra structured field (reason, origin, path, ...).
    #[must_use]
    pub fn detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.detail.insert(key.to_string(), value.into());
        self
    }
}

/// Destination for serialized audit lines.
pub trait AuditSink: Send + Sync {
    fn append(&self, line: &str);
}

/// Durable append-only file sink. Creates the containing directory on the
/// first write if absent; write failures are reported via tracing only.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl AuditSink for FileSink {
    fn append(&self, line: &str) {
        if let Err(e) = try_append(&self.path, line) {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to write audit log");
        }
    }
}

fn try_append(path: &PathBuf, line: &str) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)?;
        }
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")
}

/// In-memory sink for tests.
#[derive(Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("memory sink mutex poisoned").clone()
    }
}

impl AuditSink for MemorySink {
    fn append(&self, line: &str) {
        self.lines
            .lock()
            .expect("memory sink mutex poisoned")
            .push(line.to_string());
    }
}

/// The audit log: a console sink plus any number of durable sinks.
pub struct AuditLog {
    sinks: Vec<Arc<dyn AuditSink>>,
}

impl AuditLog {
    pub fn new(sinks: Vec<Arc<dyn AuditSink>>) -> Self {
        Self { sinks }
    }

    /// Standard production setup: console plus the configured file.
    pub fn with_file(path: PathBuf) -> Self {
        Self::new(vec![Arc::new(FileSink::new(path))])
    }

    /// Record one entry to every sink. Infallible by contract.
    pub fn record(&self, entry: AuditEntry) {
        match serde_json::to_string(&entry) {
            Ok(line) => {
                tracing::info!(target: "audit", action = %entry.action, "{line}");
                for sink in &self.sinks {
                    sink.append(&line);
                }
            }
            Err(e) => {
                tracing::error!(action = %entry.action, error = %e, "Failed to serialize audit entry");
            }
        }
    }
}
