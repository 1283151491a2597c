//! Scripted in-memory `LookupService` for tests.
//!
//! Each query can be given a delay and an outcome. Unscripted queries
//! succeed immediately with an empty page. Every search call is logged.

use super::client::LookupService;
use super::types::*;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
struct Script {
    delay: Duration,
    outcome: Result<SearchPage, LookupError>,
}

pub struct ScriptedLookup {
    scripts: Mutex<HashMap<String, Script>>,
    random: Mutex<Result<Fact, LookupError>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedLookup {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            scripts: Mutex::new(HashMap::new()),
            random: Mutex::new(Err(LookupError::Transport("no random fact".to_string()))),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn respond(&self, query: &str, delay_ms: u64, facts: Vec<Fact>) {
        self.script(query, delay_ms, Ok(SearchPage::new(facts)));
    }

    pub fn fail(&self, query: &str, delay_ms: u64, error: LookupError) {
        self.script(query, delay_ms, Err(error));
    }

    pub fn set_random(&self, outcome: Result<Fact, LookupError>) {
        *self.random.lock().unwrap() = outcome;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn script(&self, query: &str, delay_ms: u64, outcome: Result<SearchPage, LookupError>) {
        self.scripts.lock().unwrap().insert(
            query.to_string(),
            Script {
                delay: Duration::from_millis(delay_ms),
                outcome,
            },
        );
    }
}

#[async_trait]
impl LookupService for ScriptedLookup {
    async fn fetch_random(&self) -> Result<Fact, LookupError> {
        self.random.lock().unwrap().clone()
    }

    async fn search(&self, query: &str) -> Result<SearchPage, LookupError> {
        self.calls.lock().unwrap().push(query.to_string());

        let script = self
            .scripts
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or(Script {
                delay: Duration::ZERO,
                outcome: Ok(SearchPage::new(vec![])),
            });

        if !script.delay.is_zero() {
            tokio::time::sleep(script.delay).await;
        }

        script.outcome
    }
}

/// Shorthand for a fact whose display text is derived from its id.
pub fn fact(id: &str) -> Fact {
    Fact::new(id, format!("fact {}", id))
}
