use catsync_types::TypeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid argument combination: {0}")]
    InvalidArgumentCombination(String),

    #[error(transparent)]
    Type(#[from] TypeError),
}
