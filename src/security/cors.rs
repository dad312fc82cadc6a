//! Origin allow-list enforcement.
//!
//! Unlike a permissive CORS layer, an unlisted `Origin` is rejected outright
//! (403 + audit), not merely left without CORS headers. Allowed origins are
//! echoed back; preflight `OPTIONS` requests short-circuit with 200.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::audit::{AuditAction, AuditEntry};
use crate::http::error::ApiError;
use crate::http::server::AppState;

const ALLOWED_METHODS: &str = "GET, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

pub async fn validate_cors(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    if let Some(origin) = &origin {
        if !state.config.cors.allowed_origins.iter().any(|o| o == origin) {
            state.audit.record(
                AuditEntry::new(AuditAction::CorsRejected)
                    .ip(addr.ip())
                    .detail("origin", origin.as_str()),
            );
            return ApiError::forbidden("CORS not allowed").into_response();
        }
    }

    // No Origin header: echo the first configured origin, as a convenience
    // for non-browser clients inspecting the headers.
    let allow_origin = origin.unwrap_or_else(|| {
        state
            .config
            .cors
            .allowed_origins
            .first()
            .cloned()
            .unwrap_or_default()
    });

    let mut response = if req.method() == Method::OPTIONS {
        // Preflight: headers only, no body, skip the rest of the pipeline.
        StatusCode::OK.into_response()
    } else {
        next.run(req).await
    };

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&allow_origin) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
    }
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    response
}
