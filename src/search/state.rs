//! Search State and its reducer.
//!
//! `SearchState` is the observable record the presentation layer renders.
//! It only changes through `SearchState::apply`, which the orchestrator calls
//! with one `Action` per transition.

use super::history::History;
use crate::lookup::types::Fact;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    /// Results of the last successful search. Replaced wholesale, never appended.
    pub results: Vec<Fact>,
    /// True while an accepted query has not reached a terminal transition.
    pub is_loading: bool,
    /// Message of the last failed search, cleared by success or reset.
    pub error: Option<String>,
    /// Successful queries in chronological order.
    pub history: History,
    /// Featured fact loaded at bootstrap, shown while there are no results.
    pub fact: Option<Fact>,
}

/// State transitions. One variant per event the orchestrator can apply.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A query was accepted and its fetch issued.
    SearchRequested { query: String },
    /// The current fetch succeeded.
    SearchSucceeded { query: String, facts: Vec<Fact> },
    /// The current fetch failed. Prior results stay visible.
    SearchFailed { error: String },
    /// Explicit clear from the user.
    Reset,
    /// Bootstrap fact arrived.
    RandomFactLoaded { fact: Fact },
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SearchRequested { .. } => {
                self.is_loading = true;
            }
            Action::SearchSucceeded { query, facts } => {
                self.results = facts;
                self.is_loading = false;
                self.error = None;
                self.history.append(query);
            }
            Action::SearchFailed { error } => {
                self.is_loading = false;
                self.error = Some(error);
            }
            Action::Reset => {
                self.results.clear();
                self.is_loading = false;
                self.error = None;
            }
            Action::RandomFactLoaded { fact } => {
                self.fact = Some(fact);
            }
        }
    }

    /// Copy of the state with results and history truncated for display.
    pub fn view(&self, max_results: usize, history_display: usize) -> SearchView {
        SearchView {
            results: self.results.iter().take(max_results).cloned().collect(),
            total_results: self.results.len(),
            is_loading: self.is_loading,
            error: self.error.clone(),
            history: self.history.snapshot(Some(history_display)),
            fact: self.fact.clone(),
        }
    }
}

/// Display-capped projection of `SearchState` served to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchView {
    pub results: Vec<Fact>,
    pub total_results: usize,
    pub is_loading: bool,
    pub error: Option<String>,
    pub history: Vec<String>,
    pub fact: Option<Fact>,
}
