//! Parsing error types for HTML extraction
//!
//! Field-level misses are not errors: they leave the field at its
//! placeholder. These variants cover failures that make a selector chain or
//! a search candidate unusable.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ParsingError {
    #[error("Invalid CSS selector: {selector} - {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("No usable selectors for field '{field}': {errors}")]
    EmptySelectorChain { field: String, errors: String },

    #[error("URL resolution failed: {url} - {reason}")]
    UrlResolutionFailed {
        url: String,
        reason: String,
        base_url: Option<String>,
    },

    #[error("Candidate validation failed: {reason}")]
    CandidateValidationFailed {
        reason: String,
        field_errors: Vec<String>,
    },

    #[error("Candidate has no product link")]
    MissingProductLink,
}

impl ParsingError {
    pub fn invalid_selector(selector: &str, reason: impl ToString) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn url_resolution_failed(url: &str, reason: impl ToString, base_url: Option<&str>) -> Self {
        Self::UrlResolutionFailed {
            url: url.to_string(),
            reason: reason.to_string(),
            base_url: base_url.map(ToString::to_string),
        }
    }

    /// Per-candidate failures are skipped; configuration failures abort the parse.
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::UrlResolutionFailed { .. }
            | Self::CandidateValidationFailed { .. }
            | Self::MissingProductLink => true,
            Self::InvalidSelector { .. } | Self::EmptySelectorChain { .. } => false,
        }
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;
