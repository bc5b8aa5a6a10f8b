//! OIDC authorization-code redirect helpers.
//!
//! # Design
//! - Discover the authorization endpoint from the issuer instead of guessing provider paths.
//! - Token exchange happens server-side; the UI only starts the redirect.

use podfetch_api_models::OidcConfig;
use serde::Deserialize;

/// Session storage key holding the pending `state` value.
pub const OIDC_STATE_KEY: &str = "oidc.state";

/// Subset of the provider discovery document the UI needs.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DiscoveryDocument {
    /// Endpoint the browser is redirected to.
    pub authorization_endpoint: String,
}

/// Discovery document URL for an issuer.
#[must_use]
pub fn discovery_url(authority: &str) -> String {
    format!(
        "{}/.well-known/openid-configuration",
        authority.trim_end_matches('/')
    )
}

/// Authorization-code request URL for the provider.
#[must_use]
pub fn authorization_url(endpoint: &str, config: &OidcConfig, state: &str) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    let params = [
        ("response_type", "code"),
        ("client_id", config.client_id.as_str()),
        ("redirect_uri", config.redirect_uri.as_str()),
        ("scope", config.scope.as_str()),
        ("state", state),
    ];
    let query = params
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{endpoint}{separator}{query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> OidcConfig {
        OidcConfig {
            authority: "https://id.example/realms/pod/".to_string(),
            client_id: "podfetch".to_string(),
            redirect_uri: "https://pod.example/ui/login".to_string(),
            scope: "openid profile".to_string(),
        }
    }

    #[test]
    fn discovery_url_strips_trailing_slash() {
        assert_eq!(
            discovery_url(&config().authority),
            "https://id.example/realms/pod/.well-known/openid-configuration"
        );
    }

    #[test]
    fn authorization_url_encodes_parameters() {
        let url = authorization_url("https://id.example/auth", &config(), "abc");
        assert_eq!(
            url,
            "https://id.example/auth?response_type=code&client_id=podfetch\
             &redirect_uri=https%3A%2F%2Fpod.example%2Fui%2Flogin\
             &scope=openid%20profile&state=abc"
        );
    }

    #[test]
    fn authorization_url_appends_to_existing_query() {
        let url = authorization_url("https://id.example/auth?kc_idp_hint=x", &config(), "s");
        assert!(url.starts_with("https://id.example/auth?kc_idp_hint=x&response_type=code"));
    }

    #[test]
    fn discovery_document_ignores_extra_fields() {
        let doc: DiscoveryDocument = serde_json::from_str(
            r#"{"issuer":"https://id.example","authorization_endpoint":"https://id.example/auth"}"#,
        )
        .expect("parse discovery");
        assert_eq!(doc.authorization_endpoint, "https://id.example/auth");
    }
}
