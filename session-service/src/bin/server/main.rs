use std::sync::Arc;

use auth_core::PasswordHasher;
use auth_core::TokenCodec;
use session_service::config::Config;
use session_service::domain::session::service::SessionService;
use session_service::inbound::http::router::create_router;
use session_service::outbound::repositories::PostgresUserStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "session_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "session-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        algorithm = %config.jwt.algorithm,
        access_ttl_minutes = config.jwt.access_ttl_minutes,
        refresh_ttl_days = config.jwt.refresh_ttl_days,
        "Configuration loaded"
    );

    // Fatal on a secret shorter than 32 bytes, an unknown algorithm, or a
    // non-positive TTL; the process must not serve traffic in that state.
    let codec = TokenCodec::new(
        config.jwt.secret.as_bytes(),
        &config.jwt.algorithm,
        config.jwt.access_ttl(),
        config.jwt.refresh_ttl(),
    )?;

    let hasher = PasswordHasher::with_params(
        config.hasher.memory_kib,
        config.hasher.iterations,
        config.hasher.parallelism,
    )?;

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_store = Arc::new(PostgresUserStore::new(pg_pool));
    let session_service = Arc::new(SessionService::new(user_store, hasher, codec));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        protocol = "http",
        "Http server listening"
    );

    let application = create_router(session_service);
    axum::serve(http_listener, application).await?;

    Ok(())
}
