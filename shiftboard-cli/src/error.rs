//! CLI error type

use std::io;
use std::path::PathBuf;

use shiftboard_lib::model::UnknownColumn;

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] shiftboard_lib::error::Error),

    #[error(transparent)]
    Column(#[from] UnknownColumn),

    #[error("cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("{0}")]
    Usage(String),
}

impl CliError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }
}
