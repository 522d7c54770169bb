mod core;
mod features;
mod shared;

use crate::core::config::{Config, StorageConfig, SwaggerConfig};
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::router::{build_router, AppServices};
use crate::core::{database, middleware, seed};
use crate::features::crimes::repository::{
    CrimeRepository, InMemoryCrimeRepository, PgCrimeRepository,
};
use crate::features::users::repository::{
    InMemoryUserRepository, PgUserRepository, UserRepository,
};
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    let (user_repo, crime_repo) = open_storage(&config.storage).await?;

    let services = AppServices::new(Arc::clone(&user_repo), Arc::clone(&crime_repo), &config.auth);
    tracing::info!("Services initialized");

    if config.app.seed_demo_data {
        seed::seed_demo_data(&services.users, user_repo.as_ref(), crime_repo.as_ref())
            .await
            .map_err(|e| anyhow::anyhow!("Seeding demo data failed: {}", e))?;
    }

    let swagger = swagger_router(&config.swagger);

    let app = Router::new()
        .merge(swagger)
        .merge(build_router(&services))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    let addr = config.app.server_address();
    let listener = bind_listener(&addr)?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

type Repositories = (Arc<dyn UserRepository>, Arc<dyn CrimeRepository>);

async fn open_storage(storage: &StorageConfig) -> anyhow::Result<Repositories> {
    match storage {
        StorageConfig::Postgres(db) => {
            let pool = database::create_pool(db).await?;
            tracing::info!("Database connection pool created");

            tracing::info!("Running database migrations...");
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
            tracing::info!("Database migrations completed successfully");

            Ok((
                Arc::new(PgUserRepository::new(pool.clone())),
                Arc::new(PgCrimeRepository::new(pool)),
            ))
        }
        StorageConfig::Memory => {
            tracing::warn!("Using in-memory storage, data will not survive a restart");
            Ok((
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryCrimeRepository::new()),
            ))
        }
    }
}

fn swagger_router(config: &SwaggerConfig) -> Router {
    let mut openapi = ApiDoc::openapi();
    SwaggerInfoModifier {
        title: config.title.clone(),
        version: config.version.clone(),
        description: config.description.clone(),
    }
    .modify(&mut openapi);

    let docs = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi);
    match config.credentials() {
        Some(credentials) => {
            tracing::info!("Swagger UI basic auth enabled");
            Router::new()
                .merge(docs)
                .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                    credentials,
                ))))
        }
        None => {
            tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
            Router::new().merge(docs)
        }
    }
}

fn bind_listener(addr: &str) -> anyhow::Result<tokio::net::TcpListener> {
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address {}: {}", addr, e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;
    socket.set_tcp_keepalive(
        &socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60)),
    )?;
    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    Ok(tokio::net::TcpListener::from_std(socket.into())?)
}
