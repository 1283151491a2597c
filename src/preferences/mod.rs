//! Display Preferences
//!
//! Process-scoped presentation settings. The search core never reads them;
//! they are held in an explicitly shared `Preferences` value rather than in
//! global state, and served to the presentation layer over HTTP.

pub mod handlers;
pub mod types;

#[cfg(test)]
mod tests;
