use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Malformed grid: {cell_count} cells is not a non-empty perfect square")]
    MalformedGrid { cell_count: usize },

    #[error("Cell ({row}, {col}) is outside a {dimension}x{dimension} grid")]
    OutOfRange {
        row: usize,
        col: usize,
        dimension: usize,
    },

    #[error("Invalid command: {reason}")]
    InvalidCommand { reason: String },

    #[error("Map format error: {reason}")]
    MapFormat { reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),
}

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Event store error: {0}")]
    EventStore(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
pub type ApplicationResult<T> = Result<T, ApplicationError>;
