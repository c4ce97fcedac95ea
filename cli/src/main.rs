//! Media catalog CLI
//!
//! ```sh
//! # Serve with the default config (~/.config/media-catalog/config.toml)
//! catalog-service
//!
//! # Custom config and port
//! catalog-service --config ./catalog.toml serve --port 8080
//!
//! # Print the effective settings
//! catalog-service check
//!
//! # Rebuild the SQLite schema if migrations changed, then add sample items
//! catalog-service recreate-db --seed
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use media_catalog::application::catalog::{seed_samples, CatalogService};
use media_catalog::config::{resolve_config_path, AppConfig};
use media_catalog::infrastructure::database::schema::{
    needs_rebuild, recreate_sqlite, schema_fingerprint, store_fingerprint,
};
use media_catalog::infrastructure::{DatabaseConfig, SeaOrmItemRepository};
use media_catalog::server::{init_tracing, ServerHandle, ServerOptions};

/// Media catalog: books, CDs, DVDs and board games.
#[derive(Parser, Debug)]
#[command(name = "catalog-service", version, about)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, global = true, env = "CATALOG_CONFIG")]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// Override the listen port.
        #[arg(long)]
        port: Option<u16>,

        /// Skip database migrations on startup.
        #[arg(long)]
        no_migrate: bool,
    },
    /// Validate the configuration and print the effective settings.
    Check,
    /// Drop and recreate the SQLite database when its schema is out of date.
    RecreateDb {
        /// Recreate even if the schema fingerprint matches.
        #[arg(long)]
        force: bool,

        /// Add one sample item of every type.
        #[arg(long)]
        seed: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = resolve_config_path(cli.config);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", config_path.display(), e);
            if matches!(cli.command, Some(Command::Check)) {
                std::process::exit(1);
            }
            eprintln!("Using default configuration.");
            AppConfig::default()
        }
    };
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    init_tracing(&config);
    info!("Configuration: {}", config_path.display());

    match cli.command.unwrap_or(Command::Serve {
        port: None,
        no_migrate: false,
    }) {
        Command::Serve { port, no_migrate } => {
            if let Some(port) = port {
                info!("CLI override: port = {}", port);
                config.server.port = port;
            }
            serve(config, !no_migrate).await
        }
        Command::Check => {
            println!("✅ Configuration is valid");
            println!("   Config file    : {}", config_path.display());
            println!("   Address        : {}", config.server.address());
            println!("   Database       : {}", config.database.url);
            println!("   Items per page : {}", config.pagination.items_per_page);
            println!(
                "   Logging        : {} ({})",
                config.logging.level, config.logging.format
            );
            Ok(())
        }
        Command::RecreateDb { force, seed } => recreate_db(&config, force, seed).await,
    }
}

async fn serve(config: AppConfig, auto_migrate: bool) -> Result<(), Box<dyn std::error::Error>> {
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate,
    })
    .await?;

    handle.install_signal_handler();
    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;
    Ok(())
}

async fn recreate_db(
    config: &AppConfig,
    force: bool,
    seed: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig {
        url: config.database.url.clone(),
    };
    let Some(db_file) = db_config.sqlite_path() else {
        error!("recreate-db only works with SQLite file databases");
        return Err(format!("unsupported database url: {}", db_config.url).into());
    };

    if !needs_rebuild(&db_file, force) {
        println!(
            "Schema of {} is up to date, skipping (use --force to rebuild)",
            db_file.display()
        );
        return Ok(());
    }

    let db = recreate_sqlite(&db_config).await?;
    println!("Recreated {}", db_file.display());

    if seed {
        let catalog = CatalogService::new(
            Arc::new(SeaOrmItemRepository::new(db.clone())),
            config.pagination.items_per_page,
        );
        let items = seed_samples(&catalog).await?;
        println!("Seeded {} sample items", items.len());
    }

    db.close().await?;
    store_fingerprint(&db_file, &schema_fingerprint())?;
    Ok(())
}
