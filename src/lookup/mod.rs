//! Lookup Service Module
//!
//! The client side of the remote fact lookup service.
//!
//! ## Overview
//! The search core never talks HTTP directly. It depends on the narrow
//! `LookupService` trait: fetch one random fact, or search by free text.
//! Both calls are asynchronous and single-shot; a failure leaves no side effects.
//!
//! ## Submodules
//! - **`client`**: The `LookupService` trait and the reqwest-backed `HttpLookup`.
//! - **`types`**: Wire types (`Fact`, `SearchPage`) and the `LookupError` taxonomy.

pub mod client;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod tests;
