//! Server setup and initialization

use std::sync::Arc;

use axum::Router;
use booking_common::{AppConfig, AppError, JwtService};
use booking_core::SnowflakeGenerator;
use booking_db::{
    create_pool, run_migrations, PgBookingRepository, PgEventRepository, PgUserRepository,
};
use booking_service::{LocalImageStore, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// # Errors
/// Returns `AppError::Config` if the rate limiter cannot be configured
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();

    let api = apply_rate_limit(create_router(), &config.rate_limit)?;
    let router = api.merge(health_routes());
    let router = apply_middleware(router, &config.cors, config.app.env.is_production());

    Ok(router.with_state(state))
}

/// Connect to the database, apply migrations and wire the services
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&config.database)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool, &config.database.migrations_dir)
            .await
            .map_err(|e| AppError::Database(format!("migration failed: {e}")))?;
        info!(dir = %config.database.migrations_dir, "Migrations applied");
    }

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));

    let snowflake_generator = SnowflakeGenerator::new(config.snowflake.worker_id)
        .map_err(|e| AppError::Config(e.to_string()))?;

    let service_context = ServiceContextBuilder::new()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .event_repo(Arc::new(PgEventRepository::new(pool.clone())))
        .booking_repo(Arc::new(PgBookingRepository::new(pool.clone())))
        .image_store(Arc::new(LocalImageStore::new(&config.storage.upload_dir)))
        .jwt_service(jwt_service)
        .snowflake_generator(Arc::new(snowflake_generator))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config, pool))
}

/// Serve `app` on `addr` until the process is stopped
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Internal(e.into()))
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, &addr).await
}
