//! Parse errors for values that arrive as strings (routes, select inputs).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown job status: {0}")]
    Status(String),

    #[error("unknown sort order: {0}")]
    Sort(String),

    #[error("invalid job id: {0}")]
    JobId(String),
}
