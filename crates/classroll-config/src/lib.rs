//! # Classroll Config
//!
//! Configuration types for the Classroll API.
//!
//! Every structure is resolved once at process start from environment
//! variables (after `dotenvy` has loaded `.env`) and then passed around by
//! value inside the application state:
//!
//! - [`jwt`]: token signing secret, issuer, audience and lifetime
//! - [`cors`]: allowed browser origins
//! - [`database`]: PostgreSQL connection settings
//! - [`server`]: listen addresses for the API and the metrics exporter
//!
//! # Example
//!
//! ```ignore
//! use classroll_config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

/// Reads an environment variable and parses it, falling back to `default`
/// when it is missing or unparseable.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
