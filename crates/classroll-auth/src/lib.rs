//! # Classroll Auth
//!
//! Authentication types and JWT utilities for the Classroll API.
//!
//! - [`claims`]: the claim set embedded in access tokens and the [`Role`] enum
//! - [`jwt`]: token issuing and validation
//!
//! Tokens are HS256 JWTs carrying the student id (`sub`), email, role,
//! issuer, audience and the issued-at/expiry timestamps. Validation checks
//! all of them; nothing is looked up in the database.
//!
//! # Example
//!
//! ```ignore
//! use classroll_auth::{Role, create_access_token, verify_token};
//! use classroll_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(1, "admin@classroll.dev", Role::Administrator, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert!(claims.role.is_administrator());
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::{Claims, Role};
pub use jwt::{create_access_token, encode_claims, issue_claims, verify_token};
