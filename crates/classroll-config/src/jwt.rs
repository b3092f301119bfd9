use std::env;

use crate::env_or;

pub const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";

/// Settings for the API bearer token.
///
/// `access_token_expiry` is in seconds. It is independent of whatever session
/// lifetime the web client keeps on its side.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
            issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "classroll".to_string()),
            audience: env::var("JWT_AUDIENCE").unwrap_or_else(|_| "classroll-web".to_string()),
            access_token_expiry: env_or("JWT_ACCESS_EXPIRY", 3600), // 1 hour
        }
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }
}
