//! # Classroll CLI
//!
//! Administrative commands for Classroll: provisioning the bootstrap
//! administrator and seeding demo data.
//!
//! ## Usage
//!
//! ```ignore
//! use classroll_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(50).with_sections(6);
//! seed_all(&pool, config).await?;
//! ```

pub mod admin;
pub mod seeder;

pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;
