//! Route handlers for the lookup API.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Query, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::audit::{AuditAction, AuditEntry};
use crate::http::validation::{validate_lookup, LookupParams};
use crate::http::server::AppState;

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `GET /health` — liveness plus feature state. No auth.
pub async fn health(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Json<serde_json::Value> {
    state
        .audit
        .record(AuditEntry::new(AuditAction::HealthCheck).ip(addr.ip()));

    let feature = if state.config.feature.screenpop_enabled {
        "enabled"
    } else {
        "disabled"
    };
    Json(json!({
        "status": "ok",
        "service": "Screen Pop Testing API",
        "feature": feature,
        "timestamp": now_rfc3339(),
    }))
}

/// `GET /api/screenpop/customer?phone=|email=|customerId=`
pub async fn customer_lookup(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Response {
    let criteria = match validate_lookup(&params) {
        Ok(criteria) => criteria,
        Err(error) => return error.into_response(),
    };

    match state.directory.find(&criteria) {
        Some(customer) => Json(json!({
            "success": true,
            "customer": customer,
            "matchedBy": criteria.matched_by(),
            "timestamp": now_rfc3339(),
        }))
        .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "Customer not found",
                "query": params.echo(),
            })),
        )
            .into_response(),
    }
}

/// `GET /api/screenpop/test-data` — full directory dump for testing/demos.
pub async fn test_data(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "customers": state.directory.all(),
        "count": state.directory.len(),
        "timestamp": now_rfc3339(),
    }))
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_of_business: Option<String>,
    /// Accepted but not filtered on, by current contract.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// `GET /api/screenpop/search?tier=&lineOfBusiness=&status=`
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<serde_json::Value> {
    let results = state
        .directory
        .search(params.tier.as_deref(), params.line_of_business.as_deref());

    Json(json!({
        "results": results,
        "count": results.len(),
        "query": params,
    }))
}

/// Fallback for any unmatched path.
pub async fn not_found(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    method: Method,
    uri: Uri,
) -> Response {
    state.audit.record(
        AuditEntry::new(AuditAction::NotFound)
            .ip(addr.ip())
            .detail("path", uri.path())
            .detail("method", method.as_str()),
    );
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found",
            "path": uri.path(),
        })),
    )
        .into_response()
}
