use super::types::{Command, SessionError};
use crate::config::SessionConfig;
use crate::lookup::client::LookupService;
use crate::search::debounce::Debouncer;
use crate::search::gate::{Admission, QueryGate};
use crate::search::orchestrator::SearchOrchestrator;
use crate::search::state::{SearchState, SearchView};

use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

const COMMAND_BUFFER: usize = 64;

/// Cloneable handle to a running search session.
///
/// The loop stops when `shutdown()` is called or when the last handle is dropped.
/// Either way the pending debounce timer is dropped unfired and the in-flight
/// fetch, if any, is aborted.
#[derive(Clone)]
pub struct SearchSession {
    commands: mpsc::Sender<Command>,
    state: watch::Receiver<SearchState>,
    config: Arc<SessionConfig>,
}

impl SearchSession {
    /// Spawns the session loop on the current tokio runtime.
    pub fn spawn(lookup: Arc<dyn LookupService>, config: SessionConfig) -> Self {
        let orchestrator = SearchOrchestrator::new(lookup, config.abort_superseded);
        let state = orchestrator.subscribe();
        let (commands, receiver) = mpsc::channel(COMMAND_BUFFER);

        let session_loop = SessionLoop {
            commands: receiver,
            debouncer: Debouncer::new(String::new(), config.debounce),
            gate: QueryGate::new(config.min_query_len),
            orchestrator,
        };

        tracing::info!(
            "Starting search session (debounce {:?}, min length {})",
            config.debounce,
            config.min_query_len
        );
        tokio::spawn(session_loop.run());

        Self {
            commands,
            state,
            config: Arc::new(config),
        }
    }

    /// Raw input changed (every keystroke).
    pub async fn on_query_changed(&self, raw_input: impl Into<String>) -> Result<(), SessionError> {
        self.send(Command::QueryChanged(raw_input.into())).await
    }

    /// A history entry was chosen; it is searched again right away.
    pub async fn on_history_item_chosen(&self, query: impl Into<String>) -> Result<(), SessionError> {
        self.send(Command::HistoryItemChosen(query.into())).await
    }

    /// The input was cleared explicitly.
    pub async fn on_clear(&self) -> Result<(), SessionError> {
        self.send(Command::Clear).await
    }

    /// Loads the featured fact in the background.
    pub async fn bootstrap(&self) -> Result<(), SessionError> {
        self.send(Command::Bootstrap).await
    }

    pub async fn shutdown(&self) -> Result<(), SessionError> {
        self.send(Command::Shutdown).await
    }

    /// Resolves once the session loop has stopped.
    pub async fn closed(&self) {
        self.commands.closed().await
    }

    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    /// Latest published state (polling contract).
    pub fn snapshot(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Display-capped view of the latest state.
    pub fn view(&self) -> SearchView {
        self.state
            .borrow()
            .view(self.config.max_results, self.config.history_display)
    }

    /// New observer of state changes (subscription contract).
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.clone()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    async fn send(&self, command: Command) -> Result<(), SessionError> {
        self.commands.send(command).await.map_err(|e| {
            tracing::error!("Dropped {:?}: search session is closed", e.0);
            SessionError::Closed
        })
    }
}

/// The single task that owns all pipeline state.
struct SessionLoop {
    commands: mpsc::Receiver<Command>,
    debouncer: Debouncer<String>,
    gate: QueryGate,
    orchestrator: SearchOrchestrator,
}

impl SessionLoop {
    async fn run(mut self) {
        loop {
            let deadline = self.debouncer.deadline();

            tokio::select! {
                biased;

                command = self.commands.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => self.handle_command(command),
                },
                Some(completion) = self.orchestrator.next_completion() => {
                    self.orchestrator.complete(completion);
                }
                _ = quiet_period(deadline) => self.flush_debounced(),
            }
        }

        if let Some(dropped) = self.debouncer.cancel() {
            tracing::debug!("Dropping unsettled input '{}'", dropped);
        }
        tracing::info!("Search session stopped");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::QueryChanged(raw) => {
                tracing::trace!("Input changed to '{}'", raw);
                self.debouncer.push(raw, Instant::now());
            }
            Command::HistoryItemChosen(query) => {
                tracing::debug!("Replaying history entry '{}'", query);
                self.debouncer.set_now(query.clone());
                self.gate.observe(&query);
                self.orchestrator.accept(query);
            }
            Command::Clear => {
                self.debouncer.set_now(String::new());
                self.gate.observe("");
                self.orchestrator.reset();
            }
            Command::Bootstrap => self.orchestrator.bootstrap(),
            Command::Shutdown => {}
        }
    }

    fn flush_debounced(&mut self) {
        let Some(query) = self.debouncer.poll(Instant::now()) else {
            return;
        };

        tracing::debug!("Input settled on '{}'", query);
        match self.gate.admit(&query) {
            Admission::Accept(query) => {
                self.orchestrator.accept(query);
            }
            Admission::Reset => self.orchestrator.reset(),
            Admission::Suppress => {
                tracing::trace!(
                    "Suppressed '{}' (shorter than {})",
                    query,
                    self.gate.min_len()
                );
            }
        }
    }
}

async fn quiet_period(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}
