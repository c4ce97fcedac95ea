use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    /// Pagination token could not be decoded for the active sort mode.
    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn item_not_found(id: i32) -> Self {
        Self::NotFound {
            entity: "Item",
            field: "id",
            value: id.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<InfraError> for DomainError {
    fn from(e: InfraError) -> Self {
        DomainError::Storage(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
