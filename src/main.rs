use anyhow::Context;
use classroll::router::init_router;
use classroll::state::AppState;
use classroll_config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
use classroll_db::{init_db_pool, run_migrations};
use classroll_observability::{init_logging, init_metrics, metrics_app};
use dotenvy::dotenv;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let db_config = DatabaseConfig::from_env().context("DATABASE_URL must be set")?;
    let db = init_db_pool(&db_config)
        .await
        .context("Failed to connect to database")?;

    if db_config.run_migrations {
        run_migrations(&db).await.context("Failed to run migrations")?;
        info!("Database migrations applied");
    }

    let jwt_config = JwtConfig::from_env();
    if jwt_config.uses_default_secret() {
        warn!("JWT_SECRET is not set; using the insecure default secret");
    }

    let server_config = ServerConfig::from_env();
    let state = AppState::new(db, jwt_config, CorsConfig::from_env());

    if let Some(handle) = init_metrics() {
        let metrics_addr = server_config.metrics_addr.clone();
        tokio::spawn(async move {
            match tokio::net::TcpListener::bind(&metrics_addr).await {
                Ok(listener) => {
                    info!("Metrics available at http://{}/metrics", metrics_addr);
                    if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                        error!(error = %e, "Metrics server stopped");
                    }
                }
                Err(e) => error!(error = %e, addr = %metrics_addr, "Failed to bind metrics listener"),
            }
        });
    }

    let app = init_router(state);
    let bind_addr = server_config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    info!("Server running on http://{}", bind_addr);
    info!("Swagger UI available at http://{}/swagger-ui", bind_addr);
    info!("Scalar UI available at http://{}/scalar", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
}
