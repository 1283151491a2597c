//! Debounced Search Pipeline
//!
//! The part of the client with real temporal and concurrency logic.
//!
//! ## Pipeline
//! keystroke → **`debounce`** → **`gate`** → **`orchestrator`** → fetch → **`state`** update.
//! A history replay re-enters directly at the orchestrator.
//!
//! ## Submodules
//! - **`debounce`**: Releases an input value only after a quiet period.
//! - **`gate`**: Lets long-enough queries through; turns a cleared input into a reset.
//! - **`orchestrator`**: One current fetch at a time; stale responses are dropped by generation.
//! - **`state`**: The observable `SearchState` record and its reducer.
//! - **`history`**: Append-only list of successful queries.

pub mod debounce;
pub mod gate;
pub mod history;
pub mod orchestrator;
pub mod state;
