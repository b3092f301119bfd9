pub use classroll_models::auth::*;
