//! Screen Pop Mock CRM API
//!
//! A mock CRM lookup service for testing "screen pop" integrations, built
//! with Tokio and Axum. Given a phone number, email, or customer ID it
//! returns a canned customer record so contact-center tooling can be demoed
//! without a real CRM.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌─────────────────────────────────────────────────────┐
//!                  │                 REQUEST PIPELINE                    │
//!                  │                                                     │
//!  Client Request  │  ┌──────────┐  ┌──────┐  ┌─────────┐  ┌─────────┐  │
//!  ────────────────┼─▶│ security │─▶│ CORS │─▶│ request │─▶│  auth   │  │
//!                  │  │ headers  │  │      │  │ logging │  │ + role  │  │
//!                  │  └──────────┘  └──────┘  └─────────┘  └────┬────┘  │
//!                  │                                            ▼       │
//!                  │  ┌──────────┐  ┌────────────┐  ┌───────────────┐   │
//!                  │  │ feature  │─▶│ rate limit │─▶│  validation   │   │
//!                  │  │  flag    │  │            │  │  + lookup     │   │
//!                  │  └──────────┘  └────────────┘  └───────┬───────┘   │
//!                  │                                        ▼           │
//!                  │                              ┌───────────────┐     │
//!  Client Response │                              │   customer    │     │
//!  ◀───────────────┼──────────────────────────────│   directory   │     │
//!                  │                              └───────────────┘     │
//!                  │                                                     │
//!                  │  Cross-cutting: config (env), audit log (console +  │
//!                  │  append-only file), structured tracing              │
//!                  └─────────────────────────────────────────────────────┘
//! ```
//!
//! Any stage may short-circuit with an error response; every terminal
//! outcome produces exactly one audit entry.

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use screenpop_api::config::ScreenPopConfig;
use screenpop_api::http::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "screenpop_api=info,tower_http=info,audit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("screenpop-api v0.1.0 starting");

    // Load configuration from the environment
    let config = ScreenPopConfig::from_env();

    tracing::info!(
        bind_address = %config.listener.bind_address,
        feature_enabled = config.feature.screenpop_enabled,
        allowed_origins = %config.cors.allowed_origins.join(","),
        rate_limit_window_ms = config.rate_limit.window_ms,
        rate_limit_max = config.rate_limit.max_requests,
        audit_log = %config.audit.log_file.display(),
        production = config.production,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(address = %local_addr, "Listening for connections");
    tracing::info!("GET /health - Health check");
    tracing::info!("GET /api/screenpop/customer?phone=|email=|customerId= - Lookup customer");
    tracing::info!("GET /api/screenpop/test-data - All test customers");
    tracing::info!("GET /api/screenpop/search?tier=&lineOfBusiness= - Filter customers");
    tracing::info!("Run `token-cli test-tokens` to generate test bearer tokens");

    // Create and run HTTP server
    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
