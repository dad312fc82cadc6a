//! Screen Pop Mock CRM API Library

pub mod audit;
pub mod auth;
pub mod config;
pub mod directory;
pub mod http;
pub mod security;

pub use config::ScreenPopConfig;
pub use http::HttpServer;
