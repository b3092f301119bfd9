//! Student data models and DTOs.
//!
//! Re-exported from the `classroll-models` crate.

pub use classroll_models::national_id::{NationalId, NationalIdError};
pub use classroll_models::students::*;
