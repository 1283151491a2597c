/// Outcome of passing a debounced query through the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// Long enough to search.
    Accept(String),
    /// The input was cleared after holding text: drop results and any in-flight search.
    Reset,
    /// Too short to search. Leave whatever is displayed alone.
    Suppress,
}

/// Length filter between the debouncer and the orchestrator.
///
/// Keeps one bit of memory (was the previous value empty?) so that clearing
/// the input is told apart from typing a short prefix.
#[derive(Debug, Clone)]
pub struct QueryGate {
    min_len: usize,
    previous_empty: bool,
}

impl QueryGate {
    pub fn new(min_len: usize) -> Self {
        Self {
            min_len,
            previous_empty: true,
        }
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// Length is counted in characters; the query itself is passed through verbatim.
    pub fn admit(&mut self, query: &str) -> Admission {
        let was_empty = std::mem::replace(&mut self.previous_empty, query.is_empty());

        if query.is_empty() {
            return if was_empty {
                Admission::Suppress
            } else {
                Admission::Reset
            };
        }

        if query.chars().count() >= self.min_len {
            Admission::Accept(query.to_string())
        } else {
            Admission::Suppress
        }
    }

    /// Updates the gate's memory for a value that reached the orchestrator
    /// by another route (history replay, explicit clear).
    pub fn observe(&mut self, query: &str) {
        self.previous_empty = query.is_empty();
    }
}
