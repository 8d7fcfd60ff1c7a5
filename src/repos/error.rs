/**
 * Responsibility
 * - what the storage layer reports upward
 */
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),
    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),
}

pub type RepoResult<T> = Result<T, RepoError>;
