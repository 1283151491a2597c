#[cfg(test)]
mod tests {
    use crate::preferences::handlers::{handle_get_theme, handle_set_theme, handle_toggle_theme};
    use crate::preferences::types::{Preferences, Theme, ThemeBody};
    use axum::{Extension, Json};

    #[test]
    fn test_theme_parse_and_display() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(" Light ".parse::<Theme>().unwrap(), Theme::Light);
        assert!("sepia".parse::<Theme>().is_err());
        assert_eq!(Theme::Dark.to_string(), "dark");
    }

    #[test]
    fn test_theme_serializes_lowercase() {
        let json = serde_json::to_string(&ThemeBody { theme: Theme::Dark }).unwrap();

        assert_eq!(json, r#"{"theme":"dark"}"#);
    }

    #[tokio::test]
    async fn test_preferences_default_and_toggle() {
        let preferences = Preferences::new(Theme::default());

        assert_eq!(preferences.theme().await, Theme::Light);
        assert_eq!(preferences.toggle_theme().await, Theme::Dark);
        assert_eq!(preferences.toggle_theme().await, Theme::Light);
    }

    #[tokio::test]
    async fn test_theme_handlers() {
        let preferences = Preferences::new(Theme::Light);

        let Json(body) = handle_set_theme(
            Extension(preferences.clone()),
            Json(ThemeBody { theme: Theme::Dark }),
        )
        .await;
        assert_eq!(body.theme, Theme::Dark);

        let Json(body) = handle_get_theme(Extension(preferences.clone())).await;
        assert_eq!(body.theme, Theme::Dark);

        let Json(body) = handle_toggle_theme(Extension(preferences)).await;
        assert_eq!(body.theme, Theme::Light);
    }
}
