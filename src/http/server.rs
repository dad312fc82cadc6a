//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire the pipeline stages in their fixed order:
//!   security headers → CORS → request logging → (per route:) auth → role →
//!   feature flag → rate limit → validation → lookup
//! - Bind the server to a listener with graceful shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, middleware, routing::get, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::audit::AuditLog;
use crate::auth::middleware as auth_middleware;
use crate::auth::middleware::RoleSet;
use crate::auth::token::TokenService;
use crate::auth::{ROLE_ADMIN, ROLE_QA};
use crate::config::ScreenPopConfig;
use crate::directory::CustomerDirectory;
use crate::http::{error, handlers, request_log};
use crate::security::rate_limit::rate_limit_middleware;
use crate::security::{cors, headers, RateLimiter};

/// Roles allowed to dump the full test data set.
const TEST_DATA_ROLES: RoleSet = &[ROLE_ADMIN, ROLE_QA];

/// Application state injected into handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ScreenPopConfig>,
    pub directory: Arc<CustomerDirectory>,
    pub tokens: Arc<TokenService>,
    pub audit: Arc<AuditLog>,
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Build all subsystems from configuration, with the standard
    /// console-plus-file audit log.
    pub fn new(config: ScreenPopConfig) -> Self {
        let audit = Arc::new(AuditLog::with_file(config.audit.log_file.clone()));
        Self::with_audit(config, audit)
    }

    /// Build with a caller-provided audit log (tests inject a memory sink).
    pub fn with_audit(config: ScreenPopConfig, audit: Arc<AuditLog>) -> Self {
        let tokens = Arc::new(TokenService::new(
            &config.auth.jwt_secret,
            config.auth.token_ttl_hours,
        ));
        let limiter = Arc::new(RateLimiter::new(&config.rate_limit));
        Self {
            config: Arc::new(config),
            directory: Arc::new(CustomerDirectory::seed()),
            tokens,
            audit,
            limiter,
        }
    }
}

/// HTTP server for the Screen Pop API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ScreenPopConfig) -> Self {
        Self::from_state(AppState::new(config))
    }

    /// Create a server over pre-built state.
    pub fn from_state(state: AppState) -> Self {
        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let require_auth =
            middleware::from_fn_with_state(state.clone(), auth_middleware::require_auth);
        let require_feature =
            middleware::from_fn_with_state(state.clone(), auth_middleware::require_feature);
        let rate_limit = middleware::from_fn_with_state(state.clone(), rate_limit_middleware);
        let require_test_data_role = middleware::from_fn_with_state(
            (state.clone(), TEST_DATA_ROLES),
            auth_middleware::require_role,
        );

        // Stages 4, 6, 7 of the pipeline, applied per secured route.
        let secured = ServiceBuilder::new()
            .layer(require_auth.clone())
            .layer(require_feature.clone())
            .layer(rate_limit.clone());

        let api = Router::new()
            .route(
                "/customer",
                get(handlers::customer_lookup).layer(secured.clone()),
            )
            .route("/search", get(handlers::search).layer(secured))
            .route(
                "/test-data",
                // The full dump additionally requires a testing role.
                get(handlers::test_data).layer(
                    ServiceBuilder::new()
                        .layer(require_auth)
                        .layer(require_test_data_role)
                        .layer(require_feature)
                        .layer(rate_limit),
                ),
            );

        Router::new()
            .route("/health", get(handlers::health))
            .nest("/api/screenpop", api)
            .fallback(handlers::not_found)
            .with_state(state.clone())
            .layer(
                // Outermost first: stages 1-3, the terminal error audit, and
                // innermost the panic catcher so the audit sees its 500.
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::with_status_code(
                        StatusCode::REQUEST_TIMEOUT,
                        Duration::from_secs(state.config.listener.request_timeout_secs),
                    ))
                    .layer(middleware::from_fn(headers::set_security_headers))
                    .layer(middleware::from_fn_with_state(
                        state.clone(),
                        cors::validate_cors,
                    ))
                    .layer(middleware::from_fn_with_state(
                        state.clone(),
                        request_log::log_requests,
                    ))
                    .layer(middleware::from_fn_with_state(
                        state.clone(),
                        error::audit_unhandled_errors,
                    ))
                    .layer(error::PanicResponder::layer(state.config.production)),
            )
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
