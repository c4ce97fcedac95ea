//! Schema fingerprinting for SQLite rebuilds
//!
//! The fingerprint is the SHA-256 of the ordered migration names. It is kept
//! in a `.schema_hash` file next to the database so a rebuild can be skipped
//! when nothing changed.

use std::path::{Path, PathBuf};

use sea_orm::DatabaseConnection;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use super::{init_database, migration_names, run_migrations, DatabaseConfig};
use crate::shared::errors::{AppError, InfraError};

pub const FINGERPRINT_FILE: &str = ".schema_hash";

/// Hex SHA-256 of the migration names, one per line
pub fn schema_fingerprint() -> String {
    let mut hasher = Sha256::new();
    for name in migration_names() {
        hasher.update(name.as_bytes());
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}

pub fn fingerprint_path(db_file: &Path) -> PathBuf {
    match db_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(FINGERPRINT_FILE),
        _ => PathBuf::from(FINGERPRINT_FILE),
    }
}

pub fn stored_fingerprint(db_file: &Path) -> Option<String> {
    std::fs::read_to_string(fingerprint_path(db_file))
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn store_fingerprint(db_file: &Path, fingerprint: &str) -> Result<(), InfraError> {
    std::fs::write(fingerprint_path(db_file), format!("{}\n", fingerprint))?;
    Ok(())
}

/// True when forced, when the database file is missing, or when the stored
/// fingerprint differs from the current one.
pub fn needs_rebuild(db_file: &Path, force: bool) -> bool {
    if force || !db_file.exists() {
        return true;
    }
    stored_fingerprint(db_file).as_deref() != Some(schema_fingerprint().as_str())
}

/// Delete the SQLite file and migrate a fresh one.
pub async fn recreate_sqlite(config: &DatabaseConfig) -> Result<DatabaseConnection, AppError> {
    let db_file = config.sqlite_path().ok_or_else(|| {
        AppError::Config(format!("{} is not a SQLite file database", config.url))
    })?;

    if db_file.exists() {
        std::fs::remove_file(&db_file).map_err(InfraError::from)?;
        info!("Removed {}", db_file.display());
    }
    for suffix in ["-wal", "-shm"] {
        let mut side = db_file.clone().into_os_string();
        side.push(suffix);
        let side = PathBuf::from(side);
        if side.exists() {
            if let Err(e) = std::fs::remove_file(&side) {
                warn!("Could not remove {}: {}", side.display(), e);
            }
        }
    }
    if let Some(dir) = db_file.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(InfraError::from)?;
    }

    let db = init_database(config).await.map_err(InfraError::from)?;
    run_migrations(&db).await.map_err(InfraError::from)?;
    Ok(db)
}
