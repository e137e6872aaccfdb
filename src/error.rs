use thiserror::Error;

use crate::config::ConfigError;
use crate::corpus::CorpusError;

/// Anything that stops the command line tool.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Corpus(#[from] CorpusError),
    #[error("could not encode output: {0}")]
    Output(#[from] serde_json::Error),
    #[error("description corpus has {0} gaps")]
    CorpusGaps(usize),
}
