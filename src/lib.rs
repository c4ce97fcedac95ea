//! # Media Catalog
//!
//! Catalog of books, CDs, DVDs and board games with per-type listings that
//! paginate through opaque, bidirectional cursors.
//!
//! ## Architecture
//!
//! - **domain**: items, repository trait and the pagination core
//! - **application**: the catalog service and form/draft mapping
//! - **infrastructure**: SeaORM entities, migrations and repositories, plus
//!   an in-memory store
//! - **interfaces**: axum router with Swagger documentation
//! - **server**: process lifecycle shared by the CLI

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, resolve_config_path, AppConfig};

pub use infrastructure::{init_database, DatabaseConfig, InMemoryItemRepository, SeaOrmItemRepository};

pub use interfaces::http::{create_router, RouterState};
