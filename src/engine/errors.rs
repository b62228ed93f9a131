use thiserror::Error;
use tokio::task::JoinError;

use crate::grid::GridError;

#[derive(Debug, Error)]
pub enum StatementError {
    #[error("Statement could not be loaded: {0}")]
    Load(#[from] GridError),
    #[error("Statement worker stopped before finishing: {0}")]
    Worker(#[from] JoinError)
}
