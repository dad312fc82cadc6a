//! End-to-end tests for the request authorization pipeline: auth, roles,
//! CORS, feature flag, rate limiting, and the audit trail each stage leaves.

mod common;

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;

use common::*;

const CUSTOMER_PATH: &str = "/api/screenpop/customer";

#[tokio::test]
async fn test_missing_token_rejected() {
    let server = spawn_default().await;
    let client = Client::new();

    let res = client
        .get(server.url(CUSTOMER_PATH))
        .query(&[("customerId", "CUST-12345")])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Authorization header required");
    assert!(server.audited("AUTH_FAILED"));
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    let server = spawn_default().await;
    let client = Client::new();

    let res = client
        .get(server.url(CUSTOMER_PATH))
        .query(&[("customerId", "CUST-12345")])
        .bearer_auth("not-a-real-token")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let server = spawn_default().await;
    let token = expired_token(&server);
    let client = Client::new();

    let res = client
        .get(server.url(CUSTOMER_PATH))
        .query(&[("customerId", "CUST-12345")])
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Invalid or expired token");
    assert!(server.audited("AUTH_FAILED"));
}

#[tokio::test]
async fn test_valid_token_audited_as_success() {
    let server = spawn_default().await;
    let token = qa_token(&server);
    let client = Client::new();

    let res = client
        .get(server.url(CUSTOMER_PATH))
        .query(&[("customerId", "CUST-12345")])
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(server.audited("AUTH_SUCCESS"));
    assert!(server.audited("qa@company.com"));
}

#[tokio::test]
async fn test_unlisted_origin_rejected() {
    let server = spawn_default().await;
    let client = Client::new();

    let res = client
        .get(server.url("/health"))
        .header("Origin", "http://evil.example")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "CORS not allowed");
    assert!(server.audited("CORS_REJECTED"));
    assert!(server.audited("http://evil.example"));
}

#[tokio::test]
async fn test_allowed_origin_echoed() {
    let server = spawn_default().await;
    let client = Client::new();

    let res = client
        .get(server.url("/health"))
        .header("Origin", "http://localhost:3001")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()["access-control-allow-origin"],
        "http://localhost:3001"
    );
}

#[tokio::test]
async fn test_preflight_short_circuits() {
    let server = spawn_default().await;
    let client = Client::new();

    // No token: the preflight never reaches the auth stage.
    let res = client
        .request(reqwest::Method::OPTIONS, server.url(CUSTOMER_PATH))
        .header("Origin", "http://localhost:3000")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()["access-control-allow-origin"],
        "http://localhost:3000"
    );
    assert_eq!(res.headers()["access-control-allow-methods"], "GET, OPTIONS");
    assert_eq!(
        res.headers()["access-control-allow-headers"],
        "Content-Type, Authorization"
    );
}

#[tokio::test]
async fn test_feature_flag_disables_secured_endpoints() {
    let mut config = test_config();
    config.feature.screenpop_enabled = false;
    let server = spawn(config).await;
    let token = qa_token(&server);
    let client = Client::new();

    let res = client
        .get(server.url(CUSTOMER_PATH))
        .query(&[("customerId", "CUST-12345")])
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Screen Pop testing is not enabled");
    assert!(server.audited("FEATURE_DISABLED"));

    // Health stays reachable and reports the flag.
    let res = client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["feature"], "disabled");
}

#[tokio::test]
async fn test_rate_limit_enforced_per_identity() {
    let mut config = test_config();
    config.rate_limit.window_ms = 60_000;
    config.rate_limit.max_requests = 2;
    let server = spawn(config).await;
    let token = qa_token(&server);
    let client = Client::new();

    for _ in 0..2 {
        let res = client
            .get(server.url(CUSTOMER_PATH))
            .query(&[("customerId", "CUST-12345")])
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    let res = client
        .get(server.url(CUSTOMER_PATH))
        .query(&[("customerId", "CUST-12345")])
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Rate limit exceeded");
    assert!(server.audited("RATE_LIMIT_EXCEEDED"));
}

#[tokio::test]
async fn test_rate_limit_window_rolls_over() {
    let mut config = test_config();
    config.rate_limit.window_ms = 300;
    config.rate_limit.max_requests = 1;
    let server = spawn(config).await;
    let token = qa_token(&server);
    let client = Client::new();

    let first = client
        .get(server.url(CUSTOMER_PATH))
        .query(&[("customerId", "CUST-12345")])
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = client
        .get(server.url(CUSTOMER_PATH))
        .query(&[("customerId", "CUST-12345")])
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);

    tokio::time::sleep(Duration::from_millis(350)).await;

    let third = client
        .get(server.url(CUSTOMER_PATH))
        .query(&[("customerId", "CUST-12345")])
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(third.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_admin_bypasses_rate_limit() {
    let mut config = test_config();
    config.rate_limit.window_ms = 60_000;
    config.rate_limit.max_requests = 1;
    let server = spawn(config).await;
    let token = admin_token(&server);
    let client = Client::new();

    for _ in 0..3 {
        let res = client
            .get(server.url(CUSTOMER_PATH))
            .query(&[("customerId", "CUST-12345")])
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_test_data_requires_testing_role() {
    let server = spawn_default().await;
    let token = agent_token(&server);
    let client = Client::new();

    let res = client
        .get(server.url("/api/screenpop/test-data"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Access denied");
    assert!(server.audited("AUTHORIZATION_FAILED"));

    // The same token is fine on routes without a role requirement.
    let res = client
        .get(server.url(CUSTOMER_PATH))
        .query(&[("customerId", "CUST-12345")])
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_path_audited() {
    let server = spawn_default().await;
    let client = Client::new();

    let res = client.get(server.url("/nope")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Not found");
    assert_eq!(body["path"], "/nope");
    assert!(server.audited("NOT_FOUND"));
}

#[tokio::test]
async fn test_security_headers_on_every_response() {
    let server = spawn_default().await;
    let client = Client::new();

    let res = client.get(server.url("/health")).send().await.unwrap();
    let headers = res.headers();

    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert!(headers.contains_key("strict-transport-security"));
    assert!(headers.contains_key("content-security-policy"));
}

#[tokio::test]
async fn test_every_request_gets_an_id_and_an_audit_line() {
    let server = spawn_default().await;
    let client = Client::new();

    let res = client.get(server.url("/health")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
    assert!(server.audited("API_REQUEST"));
    assert!(server.audited("HEALTH_CHECK"));
}
