use super::service::SearchSession;
use super::types::*;
use crate::search::state::SearchView;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::{Extension, Json};

pub const ENDPOINT_STATE: &str = "/api/state";
pub const ENDPOINT_QUERY: &str = "/api/query";
pub const ENDPOINT_HISTORY: &str = "/api/history";
pub const ENDPOINT_HISTORY_CHOOSE: &str = "/api/history/choose";
pub const ENDPOINT_CLEAR: &str = "/api/clear";

pub async fn handle_get_state(Extension(session): Extension<SearchSession>) -> Json<SearchView> {
    Json(session.view())
}

pub async fn handle_query_changed(
    Extension(session): Extension<SearchSession>,
    Json(req): Json<QueryInputRequest>,
) -> (StatusCode, Json<CommandResponse>) {
    command_status(session.on_query_changed(req.input).await)
}

pub async fn handle_history_chosen(
    Extension(session): Extension<SearchSession>,
    Json(req): Json<HistoryChoiceRequest>,
) -> (StatusCode, Json<CommandResponse>) {
    tracing::debug!("History entry chosen: '{}'", req.query);
    command_status(session.on_history_item_chosen(req.query).await)
}

pub async fn handle_clear(
    Extension(session): Extension<SearchSession>,
) -> (StatusCode, Json<CommandResponse>) {
    command_status(session.on_clear().await)
}

pub async fn handle_get_history(
    Extension(session): Extension<SearchSession>,
    Query(params): Query<HistoryParams>,
) -> Json<HistoryResponse> {
    let state = session.snapshot();
    let limit = params.limit.unwrap_or(session.config().history_display);

    Json(HistoryResponse {
        total: state.history.len(),
        entries: state.history.snapshot(Some(limit)),
    })
}

fn command_status(result: Result<(), SessionError>) -> (StatusCode, Json<CommandResponse>) {
    match result {
        Ok(()) => (StatusCode::ACCEPTED, Json(CommandResponse::accepted())),
        Err(e) => {
            tracing::error!("Rejected request: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(CommandResponse::closed()),
            )
        }
    }
}
