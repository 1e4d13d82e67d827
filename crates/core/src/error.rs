/// Failures raised by the query layer.
///
/// Every variant means the whole request failed: callers never receive partial results.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("query failed ({operation}): {source}")]
    Query {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Failures raised while resolving configuration or opening the store at startup.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("missing required environment variable {0}")]
    MissingVariable(&'static str),
    #[error("invalid database url: {0}")]
    InvalidDatabaseUrl(sqlx::Error),
    #[error("failed to connect to database: {0}")]
    Connect(sqlx::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
pub type CoreResult<T> = std::result::Result<T, CoreError>;
