//! Unauthenticated demo surface.
//!
//! Mirrors the serverless deployment of the lookup: the same directory and
//! matching rules, but none of the auth/rate-limit/audit pipeline, and a
//! wildcard CORS policy. A demo convenience, not an alternate
//! implementation of the secured endpoint.
//!
//! Run with: `cargo run --example unauthenticated_lookup`

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, HeaderValue, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use screenpop_api::directory::{normalize_phone, CustomerDirectory, LookupCriteria};

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct DemoQuery {
    phone: Option<String>,
    email: Option<String>,
    customer_id: Option<String>,
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "Screen Pop Testing API",
        "feature": "enabled",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn customer(
    State(directory): State<Arc<CustomerDirectory>>,
    Query(query): Query<DemoQuery>,
) -> Response {
    fn provided(v: &Option<String>) -> Option<&str> {
        v.as_deref().filter(|s| !s.is_empty())
    }

    if provided(&query.phone).is_none()
        && provided(&query.email).is_none()
        && provided(&query.customer_id).is_none()
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Must provide one of: phone, email, or customerId" })),
        )
            .into_response();
    }

    // Unlike the secured endpoint, the demo cascades: each provided
    // criterion is tried in turn until one matches.
    let candidates = [
        provided(&query.phone).map(|p| LookupCriteria::Phone(normalize_phone(p))),
        provided(&query.email).map(|e| LookupCriteria::Email(e.to_lowercase())),
        provided(&query.customer_id).map(|c| LookupCriteria::CustomerId(c.to_string())),
    ];

    for criteria in candidates.into_iter().flatten() {
        if let Some(record) = directory.find(&criteria) {
            return Json(record).into_response();
        }
    }

    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Customer not found" })),
    )
        .into_response()
}

async fn test_data(State(directory): State<Arc<CustomerDirectory>>) -> Json<serde_json::Value> {
    Json(json!({
        "customers": directory.all(),
        "count": directory.len(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn allow_any_origin(req: Request<Body>, next: Next) -> Response {
    let mut response = next.run(req).await;
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let directory = Arc::new(CustomerDirectory::seed());
    let app = Router::new()
        .route("/health", get(health))
        .route("/customer", get(customer))
        .route("/test-data", get(test_data))
        .with_state(directory)
        .layer(middleware::from_fn(allow_any_origin));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3100").await?;
    tracing::info!(address = %listener.local_addr()?, "Demo lookup server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
