//! Tool operation errors
//!
//! Every failure is turned into a structured payload at the operation
//! boundary; nothing here escapes to the caller as a Rust error.

use thiserror::Error;

use crate::domain::UrlRejection;
use crate::infrastructure::{FetchError, ParsingError};

#[derive(Error, Debug)]
pub enum ToolError {
    /// Bad input, detected before any network access
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Network(#[from] FetchError),

    #[error(transparent)]
    Parsing(#[from] ParsingError),

    /// Anything else, including a panic inside extraction
    #[error("{0}")]
    Unexpected(String),
}

impl From<UrlRejection> for ToolError {
    fn from(rejection: UrlRejection) -> Self {
        Self::Validation(rejection.to_string())
    }
}

impl From<tokio::task::JoinError> for ToolError {
    fn from(error: tokio::task::JoinError) -> Self {
        if error.is_panic() {
            Self::Unexpected("extraction panicked".to_string())
        } else {
            Self::Unexpected(error.to_string())
        }
    }
}

pub type ToolResult<T> = Result<T, ToolError>;
