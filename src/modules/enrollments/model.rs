pub use classroll_models::enrollments::*;
