//! # CLI Error Type
//!
//! Everything a command can fail with. Printed once by `main`, which then
//! exits with status 1.

use nearby_core::{CoreError, ValidationError};
use nearby_db::DbError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Invalid favorite: {0}")]
    InvalidFavorite(#[from] ValidationError),

    #[error("Not a favorite: {0}")]
    NotFound(String),

    #[error("Could not determine a data directory; set NEARBY_DB_PATH or storage.database_path")]
    NoDataDir,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;
