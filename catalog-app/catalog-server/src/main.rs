use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info, warn};

use catalog_api::{build_router, AppState};
use catalog_core::cache::{CacheClient, CacheInvalidator};
use catalog_core::reconcile::{ReconcileScheduler, Reconciler};
use catalog_core::repositories::CatalogStore;
use catalog_core::services::CatalogServices;
use catalog_infrastructure::cache::create_redis_pool;
use catalog_infrastructure::{
    create_pool, postgres_store, run_migrations, MemoryCache, MemoryCatalogStore, RedisCache,
    XlsxImportSource,
};
use catalog_shared::config::{AppConfig, CacheBackend, StoreBackend};
use catalog_shared::utils::redact_url;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    catalog_shared::telemetry::init_telemetry();

    info!("Catalog server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let store = connect_store(&config).await?;
    let cache = connect_cache(&config)?;
    let services = CatalogServices::new(&store, cache.clone(), config.cache.ttl());

    // Background reconciliation
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = if config.reconcile.enabled {
        let reconciler = Reconciler::new(
            Arc::new(XlsxImportSource::new(&config.reconcile.source_path)),
            store,
            services.catalog.clone(),
            CacheInvalidator::new(cache),
        );
        info!("Reconciling from {}", config.reconcile.source_path);
        Some(ReconcileScheduler::spawn(
            Arc::new(reconciler),
            config.reconcile.interval(),
            shutdown_rx,
        ))
    } else {
        info!("Reconciliation disabled");
        None
    };

    let app = build_router(AppState::new(services));

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    if let Some(handle) = scheduler {
        if let Err(e) = handle.await {
            warn!("Reconciliation task ended abnormally: {}", e);
        }
    }

    info!("Catalog server stopped");
    Ok(())
}

async fn connect_store(config: &AppConfig) -> anyhow::Result<CatalogStore> {
    match config.database.backend {
        StoreBackend::Postgres => {
            info!("Connecting to database at {}...", redact_url(&config.database.url));
            let pool = create_pool(
                &config.database.url,
                config.database.max_connections,
                config.database.min_connections,
            )
            .await?;
            info!("Database connection established.");

            if config.database.run_migrations {
                run_migrations(&pool).await?;
            }
            Ok(postgres_store(pool))
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory catalog store, data is lost on restart");
            Ok(CatalogStore::from_backend(Arc::new(MemoryCatalogStore::new())))
        }
    }
}

fn connect_cache(config: &AppConfig) -> anyhow::Result<Arc<dyn CacheClient>> {
    match config.cache.backend {
        CacheBackend::Redis => {
            info!("Using Redis cache at {}", redact_url(&config.redis.url));
            let pool = create_redis_pool(&config.redis.url, config.redis.max_connections)?;
            Ok(Arc::new(RedisCache::new(pool)))
        }
        CacheBackend::Memory => {
            info!("Using in-process cache");
            Ok(Arc::new(MemoryCache::new()))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
