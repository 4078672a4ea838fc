use std::sync::Arc;

use chaotix_stability::StabilityConfig;
use chaotix_worker::config::WorkerConfig;
use chaotix_worker::generation::GenerationWorker;
use chaotix_worker::media::MediaStorage;
use chaotix_worker::runner::JobRunner;
use chaotix_worker::shutdown::shutdown_signal;
use chaotix_worker::store::PgImageStore;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chaotix_worker=debug,chaotix_stability=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = WorkerConfig::from_env();
    let stability = StabilityConfig::from_env();
    tracing::info!(
        worker_name = %config.worker_name,
        media_root = %config.media_root.display(),
        api_url = %stability.api_url,
        "Loaded worker configuration",
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = chaotix_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    chaotix_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database connection pool created");

    // --- Generation ---
    let store = Arc::new(PgImageStore::new(
        pool.clone(),
        MediaStorage::new(config.media_root.clone()),
    ));
    let worker = Arc::new(
        GenerationWorker::with_stability(stability, store)
            .expect("Failed to build Stability API client"),
    );

    // --- Runner ---
    let cancel = CancellationToken::new();
    let runner = JobRunner::new(pool, worker, &config);
    let runner_cancel = cancel.clone();
    let runner_handle = tokio::spawn(async move {
        runner.run(runner_cancel).await;
    });

    shutdown_signal().await;
    cancel.cancel();

    if let Err(e) = runner_handle.await {
        tracing::error!(error = %e, "Job runner task panicked");
    }
    tracing::info!("Worker shutdown complete");
}
