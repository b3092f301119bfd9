//! Middleware and extractors for authentication and role checks.
//!
//! - [`auth`]: the [`AuthUser`](auth::AuthUser) bearer-token extractor
//! - [`role`]: role gates as a route layer, an extractor and plain helpers
//!
//! # Authentication flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `AuthUser` verifies signature, issuer, audience and expiry
//! 3. Role gates compare the token's role against the allowed set
//! 4. The handler runs only if every check passed
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//! use crate::middleware::role::RequireAdministrator;
//!
//! async fn get_student(auth_user: AuthUser) -> impl IntoResponse { /* ... */ }
//!
//! async fn delete_student(
//!     RequireAdministrator(auth_user): RequireAdministrator,
//! ) -> impl IntoResponse { /* ... */ }
//! ```

pub mod auth;
pub mod role;
