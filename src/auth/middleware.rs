//! Authentication, role, and feature-flag middleware.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::audit::{AuditAction, AuditEntry};
use crate::auth::token::Identity;
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Allowed-role set applied per route.
pub type RoleSet = &'static [&'static str];

/// Require a valid `Authorization: Bearer <token>` header.
///
/// On success the verified [`Identity`] is attached to the request (for
/// downstream stages) and to the response (for the request logger).
pub async fn require_auth(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let Some(header_value) = header_value else {
        state.audit.record(
            AuditEntry::new(AuditAction::AuthFailed)
                .ip(addr.ip())
                .detail("reason", "Missing authorization header")
                .detail("path", req.uri().path()),
        );
        return ApiError::unauthorized("Authorization header required").into_response();
    };

    let token = header_value.strip_prefix("Bearer ").unwrap_or(header_value);

    let Some(identity) = state.tokens.verify(token) else {
        state.audit.record(
            AuditEntry::new(AuditAction::AuthFailed)
                .ip(addr.ip())
                .detail("reason", "Invalid or expired token"),
        );
        return ApiError::unauthorized("Invalid or expired token").into_response();
    };

    state.audit.record(
        AuditEntry::new(AuditAction::AuthSuccess)
            .actor(identity.email.clone())
            .detail("role", identity.role.clone()),
    );

    req.extensions_mut().insert(identity.clone());
    let mut response = next.run(req).await;
    response.extensions_mut().insert(identity);
    response
}

/// Require the authenticated identity's role to be in the allowed set.
/// Must run after [`require_auth`].
pub async fn require_role(
    State((state, allowed)): State<(AppState, RoleSet)>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(identity) = req.extensions().get::<Identity>() else {
        return ApiError::unauthorized("Authentication required").into_response();
    };

    if !allowed.contains(&identity.role.as_str()) {
        state.audit.record(
            AuditEntry::new(AuditAction::AuthorizationFailed)
                .actor(identity.email.clone())
                .detail("requiredRoles", serde_json::json!(allowed)),
        );
        return ApiError::forbidden("Access denied").into_response();
    }

    next.run(req).await
}

/// Reject every request while the screen pop feature is disabled,
/// regardless of identity.
pub async fn require_feature(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if !state.config.feature.screenpop_enabled {
        let actor = req
            .extensions()
            .get::<Identity>()
            .map_or_else(|| "unknown".to_string(), |i| i.email.clone());
        state
            .audit
            .record(AuditEntry::new(AuditAction::FeatureDisabled).actor(actor));
        return ApiError::forbidden("Screen Pop testing is not enabled").into_response();
    }
    next.run(req).await
}
