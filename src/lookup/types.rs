use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single item returned by the lookup service.
///
/// The search core only relies on `id` (list identity) and `value` (display text).
/// The remaining fields are carried through untouched for the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fact {
    pub id: String,
    pub value: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Fact {
    /// Builds a fact with only the fields the core interprets.
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            url: None,
            icon_url: None,
            categories: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }
}

/// One page of search results as returned by `/jokes/search`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchPage {
    #[serde(default)]
    pub total: usize,
    #[serde(rename = "result", default)]
    pub items: Vec<Fact>,
}

impl SearchPage {
    pub fn new(items: Vec<Fact>) -> Self {
        Self {
            total: items.len(),
            items,
        }
    }
}

/// Error body the service sends alongside a non-2xx status.
#[derive(Debug, Deserialize)]
pub(crate) struct ServiceErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Failures surfaced by a lookup call.
///
/// Every variant is non-fatal for the search core: it becomes a `Failure`
/// transition with the error's display string stored in `SearchState.error`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    /// The service could not be reached (connect failure, timeout, reset).
    #[error("{0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("lookup service returned {status}: {message}")]
    Service { status: u16, message: String },

    /// The response body was not the expected JSON shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl LookupError {
    /// Transport and 5xx failures are worth retrying by re-issuing the query.
    pub fn is_transient(&self) -> bool {
        match self {
            LookupError::Transport(_) => true,
            LookupError::Service { status, .. } => *status >= 500,
            LookupError::Decode(_) => false,
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        // A timeout while reading the body is also reported as a decode error
        if err.is_timeout() {
            LookupError::Transport("timeout".to_string())
        } else if err.is_decode() {
            LookupError::Decode(err.to_string())
        } else {
            LookupError::Transport(err.to_string())
        }
    }
}
