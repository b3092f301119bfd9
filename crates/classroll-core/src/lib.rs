//! # Classroll Core
//!
//! Core types, errors, and utilities for the Classroll API.
//!
//! This crate provides foundational types used throughout the Classroll application:
//!
//! - [`errors`]: Application error kinds with HTTP response conversion
//! - [`pagination`]: Page/page-size coercion and response metadata
//! - [`password`]: Password hashing, verification and strength rules
//! - [`serde`]: Custom serde deserialization helpers for query strings
//!
//! # Example
//!
//! ```ignore
//! use classroll_core::errors::AppError;
//! use classroll_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Student not found"));
//!
//! let hash = hash_password("S3cure!pass")?;
//! assert!(verify_password("S3cure!pass", &hash));
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorKind, FieldErrors};
pub use pagination::{PageRequest, PaginationMeta};
pub use password::{check_password_strength, hash_password, verify_password};
