use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Presentation-layer events delivered to the session loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Raw input field content after a keystroke.
    QueryChanged(String),
    /// The user picked an entry from the history list.
    HistoryItemChosen(String),
    /// The user pressed the clear button.
    Clear,
    /// Fetch the featured fact once.
    Bootstrap,
    /// Stop the loop even though handles are still alive.
    Shutdown,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// An entry point was used after the session loop stopped. This is a wiring
    /// bug in the caller, not a runtime condition.
    #[error("search session is closed")]
    Closed,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryInputRequest {
    pub input: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryChoiceRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub total: usize,
    pub entries: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub status: String,
}

impl CommandResponse {
    pub fn accepted() -> Self {
        Self {
            status: "accepted".to_string(),
        }
    }

    pub fn closed() -> Self {
        Self {
            status: "closed".to_string(),
        }
    }
}
