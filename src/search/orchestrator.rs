//! Search Orchestrator
//!
//! The state machine that turns accepted queries into fetches and fetch
//! outcomes into `SearchState` transitions.
//!
//! ## Lifecycle
//! `Idle` → `accept()` → `Pending(g)` → `complete()` → `Idle` (Success / Failure).
//! A newer `accept()` or a `reset()` supersedes `Pending(g)`; the response for
//! `g` is then discarded whenever it arrives, whatever order the network
//! delivers responses in.
//!
//! ## Ownership
//! The orchestrator is owned by a single task. Fetches run on their own tasks
//! and report back through an internal channel drained with `next_completion()`.

use super::state::{Action, SearchState};
use crate::lookup::client::LookupService;
use crate::lookup::types::{Fact, LookupError, SearchPage};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Monotonically increasing id of an accepted query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending(Generation),
}

/// A finished fetch, reported back to the owning task.
#[derive(Debug)]
pub enum Completion {
    Search {
        generation: Generation,
        query: String,
        outcome: Result<SearchPage, LookupError>,
    },
    Featured(Result<Fact, LookupError>),
}

/// What `complete()` did with a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Success,
    Failure,
    /// Response belonged to a superseded generation and was dropped.
    Superseded,
    FactLoaded,
    FactUnavailable,
}

pub struct SearchOrchestrator {
    lookup: Arc<dyn LookupService>,
    state: SearchState,
    last_generation: Generation,
    phase: Phase,
    in_flight: Option<JoinHandle<()>>,
    abort_superseded: bool,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    publisher: watch::Sender<SearchState>,
}

impl SearchOrchestrator {
    /// Creates an idle orchestrator with an empty state and `last_generation = 0`.
    ///
    /// With `abort_superseded`, a superseded fetch task is also aborted; the
    /// generation check applies either way.
    pub fn new(lookup: Arc<dyn LookupService>, abort_superseded: bool) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let (publisher, _) = watch::channel(SearchState::new());

        Self {
            lookup,
            state: SearchState::new(),
            last_generation: Generation(0),
            phase: Phase::Idle,
            in_flight: None,
            abort_superseded,
            completions_tx,
            completions_rx,
            publisher,
        }
    }

    /// Observer handle. Every transition publishes a fresh snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.publisher.subscribe()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn last_generation(&self) -> Generation {
        self.last_generation
    }

    /// Accepts a query: mints a new generation, supersedes any pending one,
    /// marks the state as loading and issues exactly one fetch.
    pub fn accept(&mut self, query: String) -> Generation {
        if let Phase::Pending(previous) = self.phase {
            tracing::debug!("Superseding {} in favour of '{}'", previous, query);
            self.release_in_flight();
        }

        let generation = self.last_generation.next();
        self.last_generation = generation;
        self.phase = Phase::Pending(generation);

        tracing::info!("Accepted query '{}' as {}", query, generation);
        self.dispatch(Action::SearchRequested {
            query: query.clone(),
        });

        let lookup = self.lookup.clone();
        let completions = self.completions_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let outcome = lookup.search(&query).await;
            // The receiver only goes away with the orchestrator itself
            let _ = completions.send(Completion::Search {
                generation,
                query,
                outcome,
            });
        }));

        generation
    }

    /// Clears results, loading flag and error. A pending fetch is superseded.
    /// History is left untouched.
    pub fn reset(&mut self) {
        if let Phase::Pending(previous) = self.phase {
            tracing::debug!("Reset supersedes {}", previous);
            self.release_in_flight();
        }

        self.phase = Phase::Idle;
        tracing::info!("Search reset");
        self.dispatch(Action::Reset);
    }

    /// Starts the one-off random fact fetch.
    pub fn bootstrap(&mut self) {
        let lookup = self.lookup.clone();
        let completions = self.completions_tx.clone();

        tokio::spawn(async move {
            let outcome = lookup.fetch_random().await;
            let _ = completions.send(Completion::Featured(outcome));
        });
    }

    /// Waits for the next finished fetch. Never yields `None` while the
    /// orchestrator is alive, since it holds a sender itself.
    pub async fn next_completion(&mut self) -> Option<Completion> {
        self.completions_rx.recv().await
    }

    /// Applies a finished fetch.
    ///
    /// A search completion is applied only if its generation is still the
    /// pending one; anything else is dropped without touching the state.
    pub fn complete(&mut self, completion: Completion) -> Transition {
        match completion {
            Completion::Search {
                generation,
                query,
                outcome,
            } => self.complete_search(generation, query, outcome),
            Completion::Featured(Ok(fact)) => {
                tracing::info!("Loaded featured fact {}", fact.id);
                self.dispatch(Action::RandomFactLoaded { fact });
                Transition::FactLoaded
            }
            Completion::Featured(Err(err)) => {
                tracing::warn!("Failed to load featured fact: {}", err);
                Transition::FactUnavailable
            }
        }
    }

    fn complete_search(
        &mut self,
        generation: Generation,
        query: String,
        outcome: Result<SearchPage, LookupError>,
    ) -> Transition {
        let is_current =
            generation == self.last_generation && self.phase == Phase::Pending(generation);

        if !is_current {
            tracing::debug!(
                "Discarding stale response for '{}' ({}, current {}, {:?})",
                query,
                generation,
                self.last_generation,
                self.phase
            );
            return Transition::Superseded;
        }

        self.phase = Phase::Idle;
        self.in_flight = None;

        match outcome {
            Ok(page) => {
                tracing::info!(
                    "Search '{}' ({}) succeeded with {} facts",
                    query,
                    generation,
                    page.items.len()
                );
                self.dispatch(Action::SearchSucceeded {
                    query,
                    facts: page.items,
                });
                Transition::Success
            }
            Err(err) => {
                if err.is_transient() {
                    tracing::warn!("Search '{}' ({}) failed: {}", query, generation, err);
                } else {
                    tracing::error!("Search '{}' ({}) failed: {}", query, generation, err);
                }
                self.dispatch(Action::SearchFailed {
                    error: err.to_string(),
                });
                Transition::Failure
            }
        }
    }

    fn dispatch(&mut self, action: Action) {
        tracing::trace!("Applying {:?}", action);
        self.state.apply(action);
        self.publisher.send_replace(self.state.clone());
    }

    fn release_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            if self.abort_superseded {
                handle.abort();
            }
        }
    }
}

impl Drop for SearchOrchestrator {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
