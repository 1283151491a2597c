//! Search Session Module
//!
//! Wires the search pipeline into a running event loop and exposes it to a
//! presentation layer.
//!
//! ## Architecture
//! One spawned task owns the `Debouncer`, the `QueryGate` and the
//! `SearchOrchestrator`. It reacts to three kinds of events, strictly one at a time:
//! 1. **Commands** from `SearchSession` handles (keystrokes, history picks, clear).
//! 2. **Completions** of fetches the orchestrator issued.
//! 3. **Quiet-period expiry** of the debouncer.
//!
//! Because every mutation happens on that task, `SearchState` needs no locks.
//! Observers read it through a `watch` channel.
//!
//! ## Submodules
//! - **`service`**: `SearchSession` (cloneable handle) and the event loop.
//! - **`handlers`**: Axum handlers exposing the entry points over HTTP.
//! - **`types`**: Commands, errors and HTTP DTOs.

pub mod handlers;
pub mod service;
pub mod types;
