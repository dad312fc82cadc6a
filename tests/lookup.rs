//! End-to-end tests for the lookup endpoints: matching rules, validation,
//! the test-data dump, search filters, and health.

mod common;

use reqwest::{Client, StatusCode};
use serde_json::Value;

use common::*;

const CUSTOMER_PATH: &str = "/api/screenpop/customer";
const SEARCH_PATH: &str = "/api/screenpop/search";

async fn lookup(server: &TestServer, token: &str, query: &[(&str, &str)]) -> (StatusCode, Value) {
    let res = Client::new()
        .get(server.url(CUSTOMER_PATH))
        .query(query)
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

#[tokio::test]
async fn test_phone_lookup_ignores_formatting() {
    let server = spawn_default().await;
    let token = qa_token(&server);

    // Stored as "+1(209) 816-5965"; any punctuation with the same digits hits.
    for phone in ["+1 (209) 816-5965", "1-209-816-5965", "12098165965"] {
        let (status, body) = lookup(&server, &token, &[("phone", phone)]).await;
        assert_eq!(status, StatusCode::OK, "variant {phone}");
        assert_eq!(body["success"], true);
        assert_eq!(body["customer"]["customerId"], "CUST-12345");
        assert_eq!(body["matchedBy"], "phone");
        assert!(body["timestamp"].is_string());
    }
}

#[tokio::test]
async fn test_email_lookup_case_insensitive() {
    let server = spawn_default().await;
    let token = qa_token(&server);

    let (status, body) = lookup(&server, &token, &[("email", "John.Doe@Example.com")]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["customer"]["customerId"], "CUST-12345");
    assert_eq!(body["matchedBy"], "email");
}

#[tokio::test]
async fn test_customer_id_lookup_exact() {
    let server = spawn_default().await;
    let token = qa_token(&server);

    let (status, body) = lookup(&server, &token, &[("customerId", "CUST-67890")]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["customer"]["firstName"], "Sarah");
    assert_eq!(body["customer"]["lastName"], "Smith");
    assert_eq!(body["matchedBy"], "customerId");

    // Case-sensitive, unlike phone and email.
    let (status, _) = lookup(&server, &token, &[("customerId", "cust-67890")]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_phone_takes_precedence_over_email() {
    let server = spawn_default().await;
    let token = qa_token(&server);

    let (status, body) = lookup(
        &server,
        &token,
        &[
            ("phone", "12098165965"),
            ("email", "sarah.smith@example.com"),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["customer"]["customerId"], "CUST-12345");
    assert_eq!(body["matchedBy"], "phone");
}

#[tokio::test]
async fn test_lookup_requires_a_criterion() {
    let server = spawn_default().await;
    let token = qa_token(&server);

    let (status, body) = lookup(&server, &token, &[]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Must provide one of: phone, email, or customerId");

    // Empty values count as absent.
    let (status, _) = lookup(&server, &token, &[("phone", ""), ("email", "")]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_lookup_rejects_malformed_input() {
    let server = spawn_default().await;
    let token = qa_token(&server);

    let long_phone = "5".repeat(21);
    let (status, body) = lookup(&server, &token, &[("phone", long_phone.as_str())]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid phone number");

    let (status, body) = lookup(&server, &token, &[("email", "no-at-sign")]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid email address");

    let long_id = "C".repeat(51);
    let (status, body) = lookup(&server, &token, &[("customerId", long_id.as_str())]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid customer ID");
}

#[tokio::test]
async fn test_lookup_miss_echoes_query_only() {
    let server = spawn_default().await;
    let token = qa_token(&server);

    let (status, body) = lookup(&server, &token, &[("customerId", "CUST-99999")]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Customer not found");
    assert_eq!(body["query"]["customerId"], "CUST-99999");
    assert!(body["query"].get("phone").is_none());
    assert!(body.get("customer").is_none());
}

#[tokio::test]
async fn test_test_data_returns_full_directory() {
    let server = spawn_default().await;
    let token = qa_token(&server);

    let res = Client::new()
        .get(server.url("/api/screenpop/test-data"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["count"], 4);
    assert_eq!(body["customers"].as_array().unwrap().len(), 4);
    assert!(body["timestamp"].is_string());
}

async fn search(server: &TestServer, token: &str, query: &[(&str, &str)]) -> Value {
    let res = Client::new()
        .get(server.url(SEARCH_PATH))
        .query(query)
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

#[tokio::test]
async fn test_search_by_tier() {
    let server = spawn_default().await;
    let token = qa_token(&server);

    let body = search(&server, &token, &[("tier", "Gold")]).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["customerId"], "CUST-12345");
    assert_eq!(body["query"]["tier"], "Gold");
}

#[tokio::test]
async fn test_search_by_line_of_business() {
    let server = spawn_default().await;
    let token = qa_token(&server);

    let body = search(&server, &token, &[("lineOfBusiness", "Retail")]).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["customerId"], "CUST-22222");
}

#[tokio::test]
async fn test_search_filters_combine_as_and() {
    let server = spawn_default().await;
    let token = qa_token(&server);

    let body = search(
        &server,
        &token,
        &[("tier", "Gold"), ("lineOfBusiness", "Retail")],
    )
    .await;
    assert_eq!(body["count"], 0);
    assert_eq!(body["results"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_search_without_filters_returns_everything() {
    let server = spawn_default().await;
    let token = qa_token(&server);

    let body = search(&server, &token, &[]).await;
    assert_eq!(body["count"], 4);

    // `status` is accepted and echoed but does not filter.
    let body = search(&server, &token, &[("status", "active")]).await;
    assert_eq!(body["count"], 4);
    assert_eq!(body["query"]["status"], "active");
}

#[tokio::test]
async fn test_health_reports_service_and_feature() {
    let server = spawn_default().await;

    let res = Client::new()
        .get(server.url("/health"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "Screen Pop Testing API");
    assert_eq!(body["feature"], "enabled");
    assert!(body["timestamp"].is_string());
}
