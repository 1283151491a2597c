use super::types::*;

use axum::{Extension, Json};
use std::sync::Arc;

pub const ENDPOINT_THEME: &str = "/api/theme";
pub const ENDPOINT_THEME_TOGGLE: &str = "/api/theme/toggle";

pub async fn handle_get_theme(Extension(preferences): Extension<Arc<Preferences>>) -> Json<ThemeBody> {
    Json(ThemeBody {
        theme: preferences.theme().await,
    })
}

pub async fn handle_set_theme(
    Extension(preferences): Extension<Arc<Preferences>>,
    Json(req): Json<ThemeBody>,
) -> Json<ThemeBody> {
    preferences.set_theme(req.theme).await;
    Json(ThemeBody { theme: req.theme })
}

pub async fn handle_toggle_theme(
    Extension(preferences): Extension<Arc<Preferences>>,
) -> Json<ThemeBody> {
    Json(ThemeBody {
        theme: preferences.toggle_theme().await,
    })
}
