//! Classroll Observability Module
//!
//! Provides configurable observability features including:
//! - Structured logging to the console and to daily rolling JSON files
//! - Per-request logging with a generated request id
//! - Metrics collection via Prometheus
//!
//! This module can be enabled or disabled at compile time via the `observability` feature flag.
//! At runtime, observability can be further controlled via the `OBSERVABILITY_ENABLED` environment variable.
//! When either is off, [`init_logging`] falls back to plain console logging and the
//! middleware and tracking functions become no-ops.
//!
//! # Examples
//!
//! ```no_run
//! use classroll_observability::{init_logging, init_metrics};
//!
//! #[tokio::main]
//! async fn main() {
//!     init_logging();
//!     let _handle = init_metrics();
//!     // ... application code ...
//! }
//! ```

pub mod basic_logging;

#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

// Re-export PrometheusHandle type when observability is enabled
#[cfg(feature = "observability")]
pub use metrics_exporter_prometheus::PrometheusHandle;

#[cfg(feature = "observability")]
pub use logging::{init_tracing, logging_middleware};
#[cfg(feature = "observability")]
pub use metrics::{
    init_metrics, is_observability_enabled, metrics_app, metrics_middleware,
    track_access_denied, track_enrollment_created, track_jwt_issued, track_login_failure,
    track_login_success, track_section_created, track_student_created,
};

pub use basic_logging::init_basic_console_logging;

/// Installs the global tracing subscriber.
///
/// Uses the full console + rolling file setup when observability is compiled
/// in and enabled, and compact console output otherwise.
pub fn init_logging() {
    if is_observability_enabled() {
        #[cfg(feature = "observability")]
        logging::init_tracing();
    } else {
        init_basic_console_logging();
    }
}

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{Router, extract::Request, middleware::Next, response::Response};

    /// No-op observability check when feature disabled
    pub fn is_observability_enabled() -> bool {
        false
    }

    /// No-op logging middleware when feature disabled
    pub async fn logging_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    /// No-op metrics middleware when feature disabled
    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    /// No-op tracing initialization when feature disabled
    pub fn init_tracing() {}

    /// Placeholder handle so callers compile unchanged.
    #[derive(Clone, Debug)]
    pub struct PrometheusHandle;

    /// No-op metrics initialization when feature disabled
    pub fn init_metrics() -> Option<PrometheusHandle> {
        None
    }

    pub fn metrics_app(_handle: PrometheusHandle) -> Router {
        Router::new()
    }

    // No-op tracking functions
    pub fn track_login_success(_role: &str) {}
    pub fn track_login_failure(_reason: &str) {}
    pub fn track_jwt_issued() {}
    pub fn track_student_created(_role: &str) {}
    pub fn track_section_created() {}
    pub fn track_enrollment_created() {}
    pub fn track_access_denied(_reason: &str) {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
