//! Configuration loading from the process environment.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::schema::ScreenPopConfig;

impl ScreenPopConfig {
    /// Build a configuration from `SCREENPOP_*` environment variables,
    /// falling back to the defaults in [`schema`](crate::config::schema)
    /// for anything unset or unparseable.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = env::var("SCREENPOP_BIND_ADDRESS") {
            config.listener.bind_address = addr;
        }
        if let Ok(secret) = env::var("SCREENPOP_JWT_SECRET") {
            config.auth.jwt_secret = secret;
        }
        if let Some(hours) = parse_var("SCREENPOP_TOKEN_TTL_HOURS") {
            config.auth.token_ttl_hours = hours;
        }
        if let Ok(origins) = env::var("SCREENPOP_ALLOWED_ORIGINS") {
            config.cors.allowed_origins = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }
        if let Some(window) = parse_var("SCREENPOP_RATE_LIMIT_WINDOW") {
            config.rate_limit.window_ms = window;
        }
        if let Some(max) = parse_var("SCREENPOP_RATE_LIMIT_MAX") {
            config.rate_limit.max_requests = max;
        }
        if let Ok(path) = env::var("SCREENPOP_AUDIT_LOG") {
            config.audit.log_file = PathBuf::from(path);
        }
        if let Ok(enabled) = env::var("SCREENPOP_ENABLED") {
            config.feature.screenpop_enabled = enabled == "true";
        }
        if let Ok(environment) = env::var("SCREENPOP_ENV") {
            config.production = environment == "production";
        }

        config
    }
}

/// Read and parse an environment variable. Unset returns `None` silently;
/// a value that fails to parse returns `None` with a warning so a typo'd
/// deployment falls back to defaults instead of refusing to start.
fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(var = name, value = %raw, "Ignoring unparseable environment variable");
            None
        }
    }
}
