use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use axum::Router;
use identity_service::config::Config;
use identity_service::config::RefreshTokenStoreKind;
use identity_service::domain::authentication::models::TokenLifetimes;
use identity_service::domain::authentication::service::AuthenticationService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::InMemoryRefreshTokenIdStore;
use identity_service::outbound::repositories::PostgresRefreshTokenIdStore;
use identity_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_issuer = %config.jwt.issuer,
        jwt_audience = %config.jwt.audience,
        access_token_ttl = config.jwt.access_token_ttl,
        refresh_token_ttl = config.jwt.refresh_token_ttl,
        refresh_token_store = ?config.refresh_tokens.store,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let password_hasher = PasswordHasher::with_params(
        config.password.memory_cost_kib,
        config.password.iterations,
        config.password.parallelism,
    )?;
    let authenticator = Arc::new(
        Authenticator::new(config.jwt.secret.as_bytes())
            .with_issuer(config.jwt.issuer.as_str())
            .with_audience(config.jwt.audience.as_str())
            .with_password_hasher(password_hasher),
    );
    let lifetimes =
        TokenLifetimes::from_seconds(config.jwt.access_token_ttl, config.jwt.refresh_token_ttl);
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));

    let http_application: Router = match config.refresh_tokens.store {
        RefreshTokenStoreKind::Postgres => create_router(Arc::new(AuthenticationService::new(
            user_repository,
            Arc::new(PostgresRefreshTokenIdStore::new(pg_pool)),
            authenticator,
            lifetimes,
        ))),
        RefreshTokenStoreKind::Memory => create_router(Arc::new(AuthenticationService::new(
            user_repository,
            Arc::new(InMemoryRefreshTokenIdStore::new()),
            authenticator,
            lifetimes,
        ))),
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
