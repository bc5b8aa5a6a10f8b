//! Pure UI helpers extracted from components for non-wasm testing.

use podfetch_api_models::ConfigModel;

/// API path prefix appended to the page origin.
pub const API_PREFIX: &str = "/api/v1";

/// What the login screen should render for the current configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginView {
    /// Configuration not loaded yet.
    Loading,
    /// Configuration loaded; flags say which login controls appear.
    Ready {
        /// Username/password form visible.
        basic_auth: bool,
        /// OIDC login control visible.
        oidc: bool,
    },
}

/// Decide which login controls to render.
#[must_use]
pub const fn login_view(config: Option<&ConfigModel>) -> LoginView {
    match config {
        None => LoginView::Loading,
        Some(config) => LoginView::Ready {
            basic_auth: config.basic_auth_enabled(),
            oidc: config.active_oidc().is_some(),
        },
    }
}

/// Whether content routes must redirect to the login screen.
#[must_use]
pub const fn needs_login(config: Option<&ConfigModel>, authenticated: bool) -> bool {
    match config {
        Some(config) => config.requires_login() && !authenticated,
        None => false,
    }
}

/// Classes for the routed content column; hidden on small screens while the
/// sidebar is expanded.
#[must_use]
pub fn content_column_classes(sidebar_collapsed: bool) -> String {
    let small = if sidebar_collapsed {
        "xs:col-span-5"
    } else {
        "hidden"
    };
    format!("col-span-6 md:col-span-5 {small} md:block w-full overflow-x-auto")
}

/// Build the API base URL from a build-time override or the page origin.
#[must_use]
pub fn api_base_url(override_url: Option<&str>, origin: &str) -> String {
    if let Some(url) = override_url.map(str::trim).filter(|url| !url.is_empty()) {
        return url.trim_end_matches('/').to_string();
    }
    format!("{}{API_PREFIX}", origin.trim_end_matches('/'))
}

/// Join an API base and a path with exactly one slash between them.
#[must_use]
pub fn api_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Text shown for a rejected request: the server body when present,
/// otherwise the status code.
#[must_use]
pub fn rejection_message(status: u16, body: &str) -> String {
    if body.trim().is_empty() {
        format!("HTTP {status}")
    } else {
        body.to_string()
    }
}

/// Parse the `:id` segment of `/podcasts/:id`.
#[must_use]
pub fn parse_podcast_id(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok().filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use podfetch_api_models::OidcConfig;

    fn oidc() -> OidcConfig {
        OidcConfig {
            authority: "https://id.example".to_string(),
            client_id: "podfetch".to_string(),
            redirect_uri: "https://pod.example/ui/login".to_string(),
            scope: "openid".to_string(),
        }
    }

    #[test]
    fn login_view_waits_for_config() {
        assert_eq!(login_view(None), LoginView::Loading);
    }

    #[test]
    fn basic_auth_form_follows_config_flag() {
        let enabled = ConfigModel {
            basic_auth: true,
            ..ConfigModel::default()
        };
        assert_eq!(
            login_view(Some(&enabled)),
            LoginView::Ready {
                basic_auth: true,
                oidc: false
            }
        );
        let disabled = ConfigModel::default();
        assert_eq!(
            login_view(Some(&disabled)),
            LoginView::Ready {
                basic_auth: false,
                oidc: false
            }
        );
    }

    #[test]
    fn oidc_control_needs_flag_and_settings() {
        let flag_only = ConfigModel {
            oidc_configured: true,
            ..ConfigModel::default()
        };
        assert_eq!(
            login_view(Some(&flag_only)),
            LoginView::Ready {
                basic_auth: false,
                oidc: false
            }
        );
        let settings_only = ConfigModel {
            oidc_config: Some(oidc()),
            ..ConfigModel::default()
        };
        assert!(matches!(
            login_view(Some(&settings_only)),
            LoginView::Ready { oidc: false, .. }
        ));
        let both = ConfigModel {
            oidc_configured: true,
            oidc_config: Some(oidc()),
            ..ConfigModel::default()
        };
        assert!(matches!(
            login_view(Some(&both)),
            LoginView::Ready { oidc: true, .. }
        ));
    }

    #[test]
    fn login_gate_only_applies_when_auth_enabled() {
        let open = ConfigModel::default();
        let guarded = ConfigModel {
            basic_auth: true,
            ..ConfigModel::default()
        };
        assert!(!needs_login(None, false));
        assert!(!needs_login(Some(&open), false));
        assert!(needs_login(Some(&guarded), false));
        assert!(!needs_login(Some(&guarded), true));

        let oidc_only = ConfigModel {
            oidc_configured: true,
            oidc_config: Some(oidc()),
            ..ConfigModel::default()
        };
        assert!(oidc_only.active_oidc().is_some());
        assert!(!needs_login(Some(&oidc_only), false));
    }

    #[test]
    fn content_column_hides_on_small_screens_when_sidebar_open() {
        assert!(content_column_classes(false).contains(" hidden "));
        assert!(content_column_classes(true).contains("xs:col-span-5"));
    }

    #[test]
    fn api_base_prefers_override() {
        assert_eq!(
            api_base_url(Some("https://pod.example/api/v1/"), "http://ignored"),
            "https://pod.example/api/v1"
        );
        assert_eq!(
            api_base_url(Some("  "), "http://localhost:8000/"),
            "http://localhost:8000/api/v1"
        );
        assert_eq!(
            api_base_url(None, "http://localhost:8000"),
            "http://localhost:8000/api/v1"
        );
    }

    #[test]
    fn api_url_joins_with_single_slash() {
        assert_eq!(api_url("http://h/api/v1/", "/login"), "http://h/api/v1/login");
        assert_eq!(
            api_url("http://h/api/v1", "podcast/3/episodes"),
            "http://h/api/v1/podcast/3/episodes"
        );
    }

    #[test]
    fn rejection_message_is_verbatim_body() {
        assert_eq!(rejection_message(401, "Wrong password"), "Wrong password");
        assert_eq!(rejection_message(500, "  "), "HTTP 500");
    }

    #[test]
    fn podcast_id_must_be_positive_integer() {
        assert_eq!(parse_podcast_id("42"), Some(42));
        assert_eq!(parse_podcast_id("0"), None);
        assert_eq!(parse_podcast_id("abc"), None);
    }
}
