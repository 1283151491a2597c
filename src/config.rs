//! Process Configuration
//!
//! All tunables are read once at start-up from environment variables and then
//! passed explicitly to the components that need them. Nothing here is global.

use crate::preferences::types::Theme;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_LOOKUP_URL: &str = "https://api.chucknorris.io";
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);
pub const DEFAULT_MIN_QUERY_LEN: usize = 3;
pub const DEFAULT_HISTORY_DISPLAY: usize = 10;
pub const DEFAULT_MAX_RESULTS: usize = 6;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Settings for the remote lookup client.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    pub base_url: String,
    /// Transport-level request timeout. Expiry is reported as a failed fetch.
    pub timeout: Duration,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LOOKUP_URL.to_string(),
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }
}

/// Settings for the debounced search session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Quiet period the input must hold before it is forwarded.
    pub debounce: Duration,
    /// Minimum query length (in characters) the gate lets through.
    pub min_query_len: usize,
    /// How many history entries the presentation view shows.
    pub history_display: usize,
    /// How many results the presentation view shows.
    pub max_results: usize,
    /// Abort the superseded fetch task instead of only ignoring its result.
    pub abort_superseded: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            history_display: DEFAULT_HISTORY_DISPLAY,
            max_results: DEFAULT_MAX_RESULTS,
            abort_superseded: true,
        }
    }
}

/// Settings for the HTTP bridge and logging.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub log_level: tracing::Level,
    /// Theme the preferences start with.
    pub theme: Theme,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8080))),
            log_level: tracing::Level::INFO,
            theme: Theme::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub lookup: LookupConfig,
    pub session: SessionConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Reads the configuration from an arbitrary key/value source.
    ///
    /// Missing keys fall back to defaults; present but unparsable values are errors.
    pub fn from_source<F>(source: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let lookup = LookupConfig {
            base_url: source("LOOKUP_URL").unwrap_or(defaults.lookup.base_url),
            timeout: parse_millis(&source, "LOOKUP_TIMEOUT_MS")?
                .unwrap_or(defaults.lookup.timeout),
        };

        let session = SessionConfig {
            debounce: parse_millis(&source, "DEBOUNCE_MS")?.unwrap_or(defaults.session.debounce),
            min_query_len: parse_var(&source, "MIN_QUERY_LEN")?
                .unwrap_or(defaults.session.min_query_len),
            history_display: parse_var(&source, "HISTORY_DISPLAY")?
                .unwrap_or(defaults.session.history_display),
            max_results: parse_var(&source, "MAX_RESULTS")?
                .unwrap_or(defaults.session.max_results),
            abort_superseded: parse_var(&source, "ABORT_SUPERSEDED")?
                .unwrap_or(defaults.session.abort_superseded),
        };

        let server = ServerConfig {
            bind_addr: parse_var(&source, "BIND_ADDR")?.unwrap_or(defaults.server.bind_addr),
            log_level: parse_var(&source, "LOG_LEVEL")?.unwrap_or(defaults.server.log_level),
            theme: parse_var(&source, "THEME")?.unwrap_or(defaults.server.theme),
        };

        Ok(Self {
            lookup,
            session,
            server,
        })
    }
}

fn parse_var<F, T>(source: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    match source(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("invalid value for {}: '{}'", key, raw)),
    }
}

fn parse_millis<F>(source: &F, key: &str) -> Result<Option<Duration>>
where
    F: Fn(&str) -> Option<String>,
{
    Ok(parse_var::<F, u64>(source, key)?.map(Duration::from_millis))
}
