use axum::{
    Router,
    extract::Extension,
    routing::{get, post},
};
use fact_finder::config::AppConfig;
use fact_finder::lookup::client::{HttpLookup, LookupService};
use fact_finder::preferences::handlers::*;
use fact_finder::preferences::types::Preferences;
use fact_finder::session::handlers::*;
use fact_finder::session::service::SearchSession;
use std::sync::Arc;

fn print_usage(program: &str) {
    eprintln!("Usage: {} [--bind <addr:port>] [--lookup-url <url>]", program);
    eprintln!("Example: {} --bind 127.0.0.1:8080", program);
    eprintln!(
        "Example: {} --lookup-url http://127.0.0.1:9000 --bind 0.0.0.0:3000",
        program
    );
    eprintln!("Other settings are read from the environment (DEBOUNCE_MS, MIN_QUERY_LEN, ...)");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = AppConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_max_level(config.server.log_level)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" => {
                let Some(value) = args.get(i + 1) else {
                    anyhow::bail!("--bind requires a value");
                };
                config.server.bind_addr = value.parse()?;
                i += 2;
            }
            "--lookup-url" => {
                let Some(value) = args.get(i + 1) else {
                    anyhow::bail!("--lookup-url requires a value");
                };
                config.lookup.base_url = value.clone();
                i += 2;
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                return Ok(());
            }
            other => {
                tracing::warn!("Ignoring unknown argument '{}'", other);
                i += 1;
            }
        }
    }

    // 1. Lookup client:
    let http = HttpLookup::new(&config.lookup)?;
    tracing::info!("Lookup service at {}", http.base_url());
    let lookup: Arc<dyn LookupService> = Arc::new(http);

    // 2. Search session:
    let session = SearchSession::spawn(lookup, config.session.clone());
    session.bootstrap().await?;

    // 3. Display preferences:
    let preferences = Preferences::new(config.server.theme);

    // 4. Spawn state reporter:
    let mut updates = session.subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            tracing::debug!(
                "State: loading={} results={} history={} error={:?}",
                state.is_loading,
                state.results.len(),
                state.history.len(),
                state.error
            );
        }
    });

    // 5. HTTP Router:
    let app = Router::new()
        .route(ENDPOINT_STATE, get(handle_get_state))
        .route(ENDPOINT_QUERY, post(handle_query_changed))
        .route(ENDPOINT_HISTORY, get(handle_get_history))
        .route(ENDPOINT_HISTORY_CHOOSE, post(handle_history_chosen))
        .route(ENDPOINT_CLEAR, post(handle_clear))
        .route(ENDPOINT_THEME, get(handle_get_theme).post(handle_set_theme))
        .route(ENDPOINT_THEME_TOGGLE, post(handle_toggle_theme))
        .layer(Extension(session.clone()))
        .layer(Extension(preferences));

    // 6. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.server.bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.server.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    session.shutdown().await?;
    session.closed().await;

    Ok(())
}
