pub mod entities;
pub mod migrator;
pub mod repositories;
pub mod schema;

pub use repositories::SeaOrmItemRepository;

use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use migrator::Migrator;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://./catalog.db?mode=rwc";

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./catalog.db?mode=rwc")
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
        }
    }

    /// Filesystem path of a SQLite database, if the URL points at a file
    pub fn sqlite_path(&self) -> Option<std::path::PathBuf> {
        let rest = self
            .url
            .strip_prefix("sqlite://")
            .or_else(|| self.url.strip_prefix("sqlite:"))?;
        let path = rest.split('?').next().unwrap_or(rest);
        if path.is_empty() || path.contains(":memory:") {
            return None;
        }
        Some(std::path::PathBuf::from(path))
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);
    let db = Database::connect(&config.url).await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Apply pending migrations
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), sea_orm::DbErr> {
    Migrator::up(db, None).await?;
    info!("Database migrations applied");
    Ok(())
}

/// Drop every table and re-run all migrations
pub async fn reset_schema(db: &DatabaseConnection) -> Result<(), sea_orm::DbErr> {
    Migrator::fresh(db).await?;
    info!("Database schema recreated");
    Ok(())
}

/// Names of all migrations in the order they are applied
pub fn migration_names() -> Vec<String> {
    Migrator::migrations()
        .iter()
        .map(|m| m.name().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_path_from_url() {
        let cfg = DatabaseConfig::sqlite("./data/catalog.db");
        assert_eq!(
            cfg.sqlite_path(),
            Some(std::path::PathBuf::from("./data/catalog.db"))
        );
        let mem = DatabaseConfig {
            url: "sqlite::memory:".into(),
        };
        assert_eq!(mem.sqlite_path(), None);
    }

    #[test]
    fn migrations_are_ordered() {
        let names = migration_names();
        assert_eq!(names.len(), 2);
        assert!(names[0] < names[1]);
    }

    #[tokio::test]
    async fn migrations_apply_on_empty_database() {
        let db = init_database(&DatabaseConfig {
            url: "sqlite::memory:".into(),
        })
        .await
        .unwrap();
        run_migrations(&db).await.unwrap();
        reset_schema(&db).await.unwrap();
    }
}
