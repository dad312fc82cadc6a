//! Shared utilities for integration testing: a real server on an ephemeral
//! port, token issuance helpers, and an in-memory audit sink for assertions.

use std::sync::Arc;

use tokio::net::TcpListener;

use screenpop_api::audit::{AuditLog, AuditSink, MemorySink};
use screenpop_api::auth::{TokenService, TokenSubject, ROLE_ADMIN, ROLE_QA};
use screenpop_api::config::ScreenPopConfig;
use screenpop_api::http::{AppState, HttpServer};

/// A running server instance plus handles for issuing tokens and inspecting
/// what the pipeline audited.
pub struct TestServer {
    pub base_url: String,
    pub tokens: Arc<TokenService>,
    pub sink: Arc<MemorySink>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// All audit lines recorded so far, in order.
    #[allow(dead_code)]
    pub fn audit_lines(&self) -> Vec<String> {
        self.sink.lines()
    }

    #[allow(dead_code)]
    pub fn audited(&self, action: &str) -> bool {
        self.sink.lines().iter().any(|line| line.contains(action))
    }
}

/// Configuration suitable for tests: deterministic secret, no file sink.
pub fn test_config() -> ScreenPopConfig {
    let mut config = ScreenPopConfig::default();
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config
}

/// Start a server on an ephemeral port with the given configuration.
pub async fn spawn(config: ScreenPopConfig) -> TestServer {
    let sink = Arc::new(MemorySink::new());
    let audit = Arc::new(AuditLog::new(vec![sink.clone() as Arc<dyn AuditSink>]));
    let state = AppState::with_audit(config, audit);
    let tokens = state.tokens.clone();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(HttpServer::from_state(state).run(listener));

    TestServer {
        base_url: format!("http://{addr}"),
        tokens,
        sink,
    }
}

/// Start a server with the default test configuration.
#[allow(dead_code)]
pub async fn spawn_default() -> TestServer {
    spawn(test_config()).await
}

#[allow(dead_code)]
pub fn qa_token(server: &TestServer) -> String {
    server
        .tokens
        .issue(&TokenSubject::new("qa-001", "qa@company.com", ROLE_QA))
        .unwrap()
}

#[allow(dead_code)]
pub fn admin_token(server: &TestServer) -> String {
    server
        .tokens
        .issue(&TokenSubject::new("admin-001", "admin@company.com", ROLE_ADMIN))
        .unwrap()
}

/// A validly signed token whose role carries no special privileges.
#[allow(dead_code)]
pub fn agent_token(server: &TestServer) -> String {
    server
        .tokens
        .issue(&TokenSubject::new("agent-001", "agent@company.com", "agent"))
        .unwrap()
}

/// A token that was valid an hour ago.
#[allow(dead_code)]
pub fn expired_token(server: &TestServer) -> String {
    server
        .tokens
        .issue_with_ttl(
            &TokenSubject::new("qa-001", "qa@company.com", ROLE_QA),
            chrono::Duration::hours(-1),
        )
        .unwrap()
}
