//! Reusable catalog server runtime.
//!
//! [`ServerHandle`] owns the full lifecycle: metrics recorder, database
//! connection and migrations, the HTTP router and graceful shutdown.

use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::application::CatalogService;
use crate::config::AppConfig;
use crate::infrastructure::{init_database, run_migrations, DatabaseConfig, SeaOrmItemRepository};
use crate::interfaces::http::{create_router, RouterState};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the catalog server.
pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running catalog server.
///
/// ```rust,no_run
/// use media_catalog::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Port the HTTP server is bound to.
    pub port: u16,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: JoinHandle<()>,
}

/// The global recorder can only be installed once per process; later
/// starts reuse the first handle.
fn prometheus_handle() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    if let Some(handle) = PROM_HANDLE.get() {
        return Ok(handle.clone());
    }
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| format!("failed to install Prometheus recorder: {}", e))?;
    info!("📊 Prometheus metrics recorder installed");
    Ok(PROM_HANDLE.get_or_init(|| handle).clone())
}

impl ServerHandle {
    /// Start the catalog server with the given options.
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!("Starting media catalog...");

        let prometheus_handle = prometheus_handle()?;

        // ── Database ───────────────────────────────────────────
        let db_config = DatabaseConfig {
            url: app_cfg.database.url.clone(),
        };
        let db = init_database(&db_config).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            run_migrations(&db).await?;
        }

        // ── Services ───────────────────────────────────────────
        let repository = Arc::new(SeaOrmItemRepository::new(db.clone()));
        let catalog = Arc::new(CatalogService::new(
            repository,
            app_cfg.pagination.items_per_page,
        ));
        info!(
            "Listings paginate {} items per page",
            catalog.page_size()
        );

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── HTTP server ────────────────────────────────────────
        let router = create_router(RouterState {
            catalog,
            db: Some(db.clone()),
            metrics: prometheus_handle,
        });

        let addr = app_cfg.server.address();
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        let port = listener.local_addr()?.port();
        info!("HTTP server listening on http://{}", addr);
        info!("Swagger UI available at http://{}/docs/", addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(listener, router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 HTTP server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("HTTP server error: {}", e);
            }
        });

        info!("🚀 Media catalog started");

        Ok(Self {
            config: app_cfg,
            port,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to fully stop after shutdown has been triggered.
    pub async fn wait(self) {
        info!("⏳ Waiting for in-flight requests...");

        let Self {
            db,
            shutdown,
            api_task,
            ..
        } = self;

        drain_api_task(&shutdown, api_task).await;

        if let Err(e) = db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("✅ Database connection closed");
        }

        info!("👋 Media catalog shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("🛑 Shutting down media catalog...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Initialize tracing from the application config.
///
/// `RUST_LOG` takes precedence over `logging.level`. Call once at startup.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

/// Wait for the HTTP task within the shutdown timeout, aborting it when the
/// timeout elapses. Returns whether it stopped on its own.
async fn drain_api_task(shutdown: &ShutdownCoordinator, mut api_task: JoinHandle<()>) -> bool {
    let task = &mut api_task;
    let drained = shutdown
        .shutdown_with_cleanup(move || async move {
            match task.await {
                Ok(()) => info!("HTTP server stopped"),
                Err(e) => error!("HTTP server task panicked: {}", e),
            }
        })
        .await;

    if !drained {
        warn!("HTTP server did not drain before the shutdown timeout, aborting");
        api_task.abort();
        if let Err(e) = api_task.await {
            if !e.is_cancelled() {
                error!("HTTP server task panicked: {}", e);
            }
        }
    }
    drained
}
