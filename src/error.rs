//! Error taxonomy for a single upstream check.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("checkpoint not found: {0}")]
    MissingCheckpoint(PathBuf),

    #[error("malformed checkpoint {path}: {reason}")]
    MalformedCheckpoint { path: PathBuf, reason: String },

    #[error("remote query failed: {0}")]
    RemoteQueryFailed(String),

    #[error("checkpoint is missing `{0}`")]
    MissingExpectedField(&'static str),
}

impl From<reqwest::Error> for CheckError {
    fn from(err: reqwest::Error) -> Self {
        CheckError::RemoteQueryFailed(err.to_string())
    }
}

pub type CheckResult<T> = Result<T, CheckError>;
