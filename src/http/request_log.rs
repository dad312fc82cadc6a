//! Request logging middleware.
//!
//! Wraps the rest of the pipeline: whatever the outcome, one `API_REQUEST`
//! audit entry records method, path, status, actor, and duration. Also tags
//! every response with an `x-request-id` for correlation.

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::audit::{AuditAction, AuditEntry};
use crate::auth::token::Identity;
use crate::http::server::AppState;

pub const X_REQUEST_ID: &str = "x-request-id";

pub async fn log_requests(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    let mut response = next.run(req).await;

    // The auth stage runs inside this wrapper; it re-attaches the verified
    // identity to the response so the actor can be logged here.
    let actor = response
        .extensions()
        .get::<Identity>()
        .map_or_else(|| "anonymous".to_string(), |i| i.email.clone());
    let duration_ms = start.elapsed().as_millis();

    state.audit.record(
        AuditEntry::new(AuditAction::ApiRequest)
            .actor(actor)
            .detail("method", method)
            .detail("path", path)
            .detail("status", response.status().as_u16())
            .detail("duration", format!("{duration_ms}ms"))
            .detail("requestId", request_id.clone()),
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(X_REQUEST_ID), value);
    }
    response
}
