//! # Classroll API
//!
//! A REST API built with Rust, Axum and PostgreSQL for registering students,
//! organizing them into class sections and recording enrollments, with
//! stateless role-gated JWT access.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # AuthUser extractor and role gates
//! ├── modules/          # Feature modules
//! │   ├── auth/         # Login
//! │   ├── students/     # Student registry (/api/alunos)
//! │   ├── sections/     # Section registry (/api/turmas)
//! │   └── enrollments/  # Enrollment ledger (/api/matriculas)
//! ├── docs.rs           # OpenAPI document
//! ├── router.rs         # Route tree and global layers
//! ├── state.rs          # Shared application state
//! └── validator.rs      # Validating JSON extractor
//! ```
//!
//! Each feature module follows the same structure:
//!
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: business logic and SQL
//! - `model.rs`: re-exports from `classroll-models`
//! - `router.rs`: Axum router for the feature
//!
//! Shared building blocks live in the workspace crates:
//!
//! - [`classroll_core`]: `AppError`, pagination, password hashing
//! - [`classroll_config`]: environment-driven configuration
//! - [`classroll_auth`]: claims, roles and token signing
//! - [`classroll_db`]: connection pool and embedded migrations
//! - [`classroll_models`]: DTOs, row types and the `NationalId` value type
//! - [`classroll_observability`]: logging and Prometheus metrics
//!
//! ## Roles
//!
//! | Role | Can |
//! |------|-----|
//! | `Administrator` | everything, including all enrollment routes |
//! | `Student` | read students and sections, query own identity |
//!
//! The first administrator is provisioned with `classroll-cli create-admin`.

pub mod docs;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

pub use classroll_auth;
pub use classroll_config;
pub use classroll_core;
pub use classroll_db;
pub use classroll_models;
pub use classroll_observability;
