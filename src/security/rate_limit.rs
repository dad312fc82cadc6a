//! Fixed-window rate limiting keyed by identity or source address.

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;

use crate::audit::{AuditAction, AuditEntry};
use crate::auth::token::Identity;
use crate::config::RateLimitConfig;
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// One counter bucket. Reset lazily when its window elapses.
struct Window {
    started: Instant,
    count: u32,
}

/// Per-key fixed-window counters.
///
/// Keys are identity ids for authenticated requests, source IPs otherwise.
/// DashMap's entry lock makes the read-reset-increment sequence atomic with
/// respect to concurrent requests sharing a key.
pub struct RateLimiter {
    windows: DashMap<String, Window>,
    window: Duration,
    max_requests: u32,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            windows: DashMap::new(),
            window: Duration::from_millis(config.window_ms),
            max_requests: config.max_requests,
        }
    }

    /// Count one request against `key`. Returns false once the key has
    /// exceeded the maximum for the current window.
    pub fn check(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut entry = self.windows.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(entry.started) >= self.window {
            entry.started = now;
            entry.count = 0;
        }

        if entry.count >= self.max_requests {
            false
        } else {
            entry.count += 1;
            true
        }
    }
}

/// Rate limiting middleware. Admin identities bypass the limiter entirely.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let identity = req.extensions().get::<Identity>();

    if identity.is_some_and(Identity::is_admin) {
        return next.run(req).await;
    }

    let key = identity.map_or_else(|| addr.ip().to_string(), |i| i.id.clone());

    if state.limiter.check(&key) {
        next.run(req).await
    } else {
        let actor = identity.map_or_else(|| "unknown".to_string(), |i| i.email.clone());
        tracing::warn!(client = %key, "Rate limit exceeded");
        state.audit.record(
            AuditEntry::new(AuditAction::RateLimitExceeded)
                .actor(actor)
                .ip(addr.ip()),
        );
        ApiError::rate_limited("Rate limit exceeded").into_response()
    }
}
