//! API error types and HTTP response mapping.

use std::any::Any;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tower_http::catch_panic::{CatchPanicLayer, ResponseForPanic};

use crate::audit::{AuditAction, AuditEntry};
use crate::http::server::AppState;

/// Detail attached to 500 responses for the terminal error audit,
/// carried out-of-band so production bodies stay generic.
#[derive(Debug, Clone)]
pub struct InternalErrorDetail(pub String);

/// HTTP API error. Every non-2xx outcome in the pipeline is one of these;
/// all are terminal for the request — no retry, no partial response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    internal: Option<String>,
}

impl ApiError {
    /// 400: missing or malformed query parameters.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 401: missing, invalid, or expired token.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// 403: wrong role, CORS rejection, or feature disabled.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    /// 404: unknown route or unmatched customer.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 429: request frequency exceeded.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(StatusCode::TOO_MANY_REQUESTS, message)
    }

    /// 500: anything unanticipated. In production mode the client sees a
    /// generic message; the underlying one still reaches the audit log.
    pub fn internal(message: impl Into<String>, production: bool) -> Self {
        let message = message.into();
        let client_message = if production {
            "Internal server error".to_string()
        } else {
            message.clone()
        };
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: client_message,
            internal: Some(message),
        }
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            internal: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response =
            (self.status, Json(json!({ "error": self.message }))).into_response();
        if let Some(detail) = self.internal {
            response.extensions_mut().insert(InternalErrorDetail(detail));
        }
        response
    }
}

/// Converts a handler panic into a regular 500 so the connection survives
/// and the terminal error audit sees it like any other [`ApiError`].
#[derive(Debug, Clone, Copy)]
pub struct PanicResponder {
    production: bool,
}

impl PanicResponder {
    pub fn layer(production: bool) -> CatchPanicLayer<Self> {
        CatchPanicLayer::custom(Self { production })
    }
}

impl ResponseForPanic for PanicResponder {
    type ResponseBody = Body;

    fn response_for_panic(&mut self, err: Box<dyn Any + Send + 'static>) -> Response {
        let detail = if let Some(s) = err.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = err.downcast_ref::<String>() {
            s.clone()
        } else {
            "handler panicked".to_string()
        };
        tracing::error!(error = %detail, "Handler panicked");
        ApiError::internal(detail, self.production).into_response()
    }
}

/// Terminal handler for anything unanticipated: any 5xx escaping the
/// handlers is audited as `ERROR` before it reaches the client. The
/// response body was already shaped (and redacted in production) by
/// [`ApiError::internal`] or [`PanicResponder`].
pub async fn audit_unhandled_errors(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let response = next.run(req).await;
    if response.status().is_server_error() {
        let detail = response
            .extensions()
            .get::<InternalErrorDetail>()
            .map_or_else(|| "unknown error".to_string(), |d| d.0.clone());
        state
            .audit
            .record(AuditEntry::new(AuditAction::Error).detail("error", detail));
    }
    response
}
