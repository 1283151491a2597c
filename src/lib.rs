//! Fact Finder Client Library
//!
//! Core of a search client for a remote fact lookup service. Raw keystrokes go in,
//! an observable search state comes out. The binary (`main.rs`) wires the pieces
//! together and exposes them over a small local HTTP bridge.
//!
//! ## Modules
//! - **`config`**: Environment-driven settings for every other module.
//! - **`lookup`**: The remote service boundary (`LookupService`) and its HTTP client.
//! - **`search`**: Debouncer, query gate, orchestrator and the `SearchState` reducer.
//! - **`session`**: The single task that owns the pipeline, plus its HTTP handlers.
//! - **`preferences`**: Theme preference, shared explicitly with the presentation layer.

pub mod config;
pub mod lookup;
pub mod preferences;
pub mod search;
pub mod session;
