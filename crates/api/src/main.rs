use std::net::SocketAddr;
use std::sync::Arc;

use chaotix_api::config::{QueueBackend, ServerConfig};
use chaotix_api::router::build_app_router;
use chaotix_api::state::AppState;
use chaotix_stability::StabilityConfig;
use chaotix_worker::generation::GenerationWorker;
use chaotix_worker::media::MediaStorage;
use chaotix_worker::queue::{InlineJobQueue, JobQueue, PgJobQueue};
use chaotix_worker::shutdown::shutdown_signal;
use chaotix_worker::store::{ImageStore, MemoryImageStore, PgImageStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chaotix_api=debug,chaotix_worker=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        queue_backend = ?config.queue_backend,
        "Loaded server configuration",
    );

    // --- Database ---
    // Required for the Postgres queue; optional for inline runs, which fall
    // back to an in-memory record store.
    let database_url = std::env::var("DATABASE_URL").ok();
    if config.queue_backend == QueueBackend::Postgres && database_url.is_none() {
        panic!("DATABASE_URL must be set when QUEUE_BACKEND=postgres");
    }

    let pool = match database_url {
        Some(url) => {
            let pool = chaotix_db::create_pool(&url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            chaotix_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            chaotix_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");
            Some(pool)
        }
        None => None,
    };

    // --- Record store ---
    let store: Arc<dyn ImageStore> = match &pool {
        Some(pool) => Arc::new(PgImageStore::new(
            pool.clone(),
            MediaStorage::new(config.media_root.clone()),
        )),
        None => {
            tracing::warn!("No DATABASE_URL; image records are kept in memory only");
            Arc::new(MemoryImageStore::new())
        }
    };

    // --- Job backend ---
    let mut inline_queue = None;
    let queue: Arc<dyn JobQueue> = match (config.queue_backend, &pool) {
        (QueueBackend::Postgres, Some(pool)) => Arc::new(PgJobQueue::new(pool.clone())),
        (QueueBackend::Postgres, None) => unreachable!("checked above"),
        (QueueBackend::Inline, _) => {
            let worker = GenerationWorker::with_stability(
                StabilityConfig::from_env(),
                Arc::clone(&store),
            )
            .expect("Failed to build Stability API client");
            let queue = Arc::new(InlineJobQueue::with_result_ttl(
                Arc::new(worker),
                config.inline_result_ttl,
            ));
            inline_queue = Some(Arc::clone(&queue));
            queue
        }
    };
    tracing::info!(backend = ?config.queue_backend, "Job backend ready");

    // --- App ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let state = AppState::new(config, store, queue);
    let app = build_app_router(state);

    // --- Start server ---
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    if let Some(queue) = inline_queue {
        tracing::info!(in_flight = queue.in_flight(), "Waiting for inline generation jobs");
        queue.close_and_wait().await;
    }

    tracing::info!("Graceful shutdown complete");
}
