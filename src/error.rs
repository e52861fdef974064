use thiserror::Error;

use crate::models::city::CityId;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("At least two cities are required to compute a route, found {found}")]
    NotEnoughCities { found: usize },

    #[error("The selection is full ({max} cities)")]
    SelectionFull { max: usize },

    #[error("Distance matrix unavailable: {0}")]
    MatrixUnavailable(String),

    #[error("Invalid distance matrix: {0}")]
    InvalidMatrix(String),

    #[error("{algorithm} cannot handle {found} cities (limit {limit})")]
    TooManyCities {
        algorithm: String,
        found: usize,
        limit: usize,
    },

    #[error("Invalid solver parameters: {0}")]
    InvalidParams(String),

    #[error("Internal invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Invalid instance at line {line}: {reason}")]
    InvalidInstance { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not decode routing table: {0}")]
    Decode(#[from] bincode::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl EngineError {
    pub fn missing_leg(from: CityId, to: CityId) -> EngineError {
        EngineError::MatrixUnavailable(format!("no leg between city {} and city {}", from, to))
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
