#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(
    unused,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
//! Shared HTTP DTOs for the PodFetch API.
//!
//! These types describe the JSON contract between the web UI and the PodFetch
//! server. They compile natively so wire names and the basic-auth token codec
//! can be tested without a browser.

use std::fmt;

use base64::{Engine as _, engine::general_purpose};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Body posted to `/login` when the user submits the sign-in form.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    /// Account name entered in the form.
    pub username: String,
    /// Plain-text password entered in the form.
    pub password: String,
    /// Whether the derived credential should outlive the browser session.
    #[serde(default)]
    pub remember_me: bool,
}

impl LoginData {
    /// Derive the basic-auth token for this credential pair.
    #[must_use]
    pub fn token(&self) -> BasicAuthToken {
        BasicAuthToken::encode(&self.username, &self.password)
    }
}

impl fmt::Debug for LoginData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginData")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

/// Errors raised while reading a stored basic-auth token.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The stored value was blank.
    #[error("credential token is empty")]
    Empty,
    /// The stored value is not valid base64.
    #[error("credential token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The decoded bytes are not UTF-8.
    #[error("credential token is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    /// The decoded payload lacks the `username:password` separator.
    #[error("credential token is missing the ':' separator")]
    MissingSeparator,
}

/// Decoded `username:password` pair carried by a [`BasicAuthToken`].
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Base64-encoded `username:password` string used for HTTP basic auth.
///
/// Matches the browser's `btoa` output for Latin-1 input and encodes UTF-8
/// bytes verbatim beyond that range.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuthToken(String);

impl BasicAuthToken {
    /// Encode a username/password pair.
    #[must_use]
    pub fn encode(username: &str, password: &str) -> Self {
        let raw = format!("{username}:{password}");
        Self(general_purpose::STANDARD.encode(raw.as_bytes()))
    }

    /// Wrap an already-encoded token, validating that it decodes cleanly.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError`] when the value is blank, not base64, not UTF-8,
    /// or lacks a `:` separator.
    pub fn from_encoded(value: impl Into<String>) -> Result<Self, TokenError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(TokenError::Empty);
        }
        let token = Self(trimmed.to_string());
        token.decode()?;
        Ok(token)
    }

    /// Encoded representation as persisted in browser storage.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` request header.
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("Basic {}", self.0)
    }

    /// Recover the username/password pair.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError`] when the payload cannot be decoded.
    pub fn decode(&self) -> Result<Credentials, TokenError> {
        let bytes = general_purpose::STANDARD.decode(self.0.as_bytes())?;
        let raw = String::from_utf8(bytes)?;
        let (username, password) = raw.split_once(':').ok_or(TokenError::MissingSeparator)?;
        Ok(Credentials {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

impl fmt::Debug for BasicAuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BasicAuthToken(<redacted>)")
    }
}

/// OIDC client settings published by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OidcConfig {
    /// Issuer base URL; discovery lives under `/.well-known/openid-configuration`.
    pub authority: String,
    /// Registered client identifier.
    pub client_id: String,
    /// Redirect target registered with the provider.
    pub redirect_uri: String,
    /// Space-separated scope list.
    pub scope: String,
}

/// Server configuration served from `/sys/config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConfigModel {
    /// Whether a Podcast Index API key is configured on the server.
    #[serde(default)]
    pub podindex_configured: bool,
    /// Public RSS feed URL of the server.
    #[serde(default)]
    pub rss_feed: String,
    /// Public base URL of the server.
    #[serde(default)]
    pub server_url: String,
    /// Whether username/password login is enabled.
    #[serde(default)]
    pub basic_auth: bool,
    /// Whether OIDC login is enabled.
    #[serde(default)]
    pub oidc_configured: bool,
    /// OIDC client settings, present only when the server has them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oidc_config: Option<OidcConfig>,
}

impl ConfigModel {
    /// Whether the username/password form should be offered.
    #[must_use]
    pub const fn basic_auth_enabled(&self) -> bool {
        self.basic_auth
    }

    /// OIDC settings when OIDC is both switched on and configured.
    #[must_use]
    pub const fn active_oidc(&self) -> Option<&OidcConfig> {
        if self.oidc_configured {
            self.oidc_config.as_ref()
        } else {
            None
        }
    }

    /// Whether content routes need stored credentials first.
    ///
    /// Only basic auth gates the UI; an OIDC login is offered on the login
    /// screen but never forced.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        self.basic_auth
    }
}

/// Podcast subscription as listed by `/podcasts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Podcast {
    /// Server-side identifier.
    pub id: i32,
    /// Display title.
    pub name: String,
    /// Feed identifier on the server.
    #[serde(default)]
    pub directory: String,
    /// Upstream RSS feed URL.
    pub rssfeed: String,
    /// Cover art URL served by PodFetch.
    pub image_url: String,
    /// Feed summary text.
    #[serde(default)]
    pub summary: Option<String>,
    /// Feed language.
    #[serde(default)]
    pub language: Option<String>,
    /// Explicit content marker as published by the feed.
    #[serde(default)]
    pub explicit: Option<String>,
    /// Comma-separated feed keywords.
    #[serde(default)]
    pub keywords: Option<String>,
    /// Feed author.
    #[serde(default)]
    pub author: Option<String>,
    /// Whether the server still polls this feed.
    #[serde(default = "default_true")]
    pub active: bool,
    /// Whether the current user marked it as a favorite.
    #[serde(default)]
    pub favorites: bool,
}

impl Podcast {
    /// Keywords split on commas with whitespace trimmed and blanks dropped.
    #[must_use]
    pub fn keyword_list(&self) -> Vec<String> {
        self.keywords
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
            .map(ToString::to_string)
            .collect()
    }
}

const fn default_true() -> bool {
    true
}

/// Episode belonging to a podcast, as served by `/podcast/{id}/episodes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodcastEpisode {
    /// Server-side identifier.
    pub id: i32,
    /// Owning podcast identifier.
    pub podcast_id: i32,
    /// Stable episode GUID from the feed.
    pub episode_id: String,
    /// Episode title.
    pub name: String,
    /// Remote enclosure URL.
    pub url: String,
    /// Publication timestamp as published by the feed.
    pub date_of_recording: String,
    /// Remote artwork URL.
    pub image_url: String,
    /// Duration in seconds; zero when the feed omits it.
    #[serde(default)]
    pub total_time: i32,
    /// Server-local audio URL once downloaded.
    #[serde(default)]
    pub local_url: String,
    /// Server-local artwork URL once downloaded.
    #[serde(default)]
    pub local_image_url: String,
    /// Episode description (may contain HTML).
    #[serde(default)]
    pub description: String,
    /// Download status flag (`"D"` downloaded, `"N"` not downloaded).
    #[serde(default)]
    pub status: String,
    /// When the server finished downloading it.
    #[serde(default)]
    pub download_time: Option<NaiveDateTime>,
}

impl PodcastEpisode {
    /// Audio URL to stream, preferring the server-local copy.
    #[must_use]
    pub fn playback_url(&self) -> &str {
        if self.local_url.trim().is_empty() {
            &self.url
        } else {
            &self.local_url
        }
    }

    /// Artwork URL, preferring the server-local copy.
    #[must_use]
    pub fn artwork_url(&self) -> &str {
        if self.local_image_url.trim().is_empty() {
            &self.image_url
        } else {
            &self.local_image_url
        }
    }

    /// Whether the server holds a downloaded copy.
    #[must_use]
    pub fn is_downloaded(&self) -> bool {
        self.status == "D"
    }
}

/// Playback progress for an episode, as served by `/podcast/episode/lastwatched`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchedEpisode {
    /// History row identifier.
    pub id: i32,
    /// Podcast identifier.
    pub podcast_id: i32,
    /// Episode GUID.
    pub episode_id: String,
    /// Remote enclosure URL.
    pub url: String,
    /// Episode title.
    pub name: String,
    /// Artwork URL.
    pub image_url: String,
    /// Last reported playback position in seconds.
    pub watched_time: i32,
    /// When the position was recorded.
    pub date: NaiveDateTime,
    /// Episode duration in seconds.
    pub total_time: i32,
    /// Full episode record.
    pub podcast_episode: PodcastEpisode,
    /// Owning podcast.
    pub podcast: Podcast,
}

impl WatchedEpisode {
    /// Fraction of the episode already played, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.total_time <= 0 {
            return 0.0;
        }
        let watched = f64::from(self.watched_time.max(0));
        let total = f64::from(self.total_time);
        #[allow(clippy::cast_possible_truncation)]
        let ratio = (watched / total).clamp(0.0, 1.0) as f32;
        ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn episode() -> PodcastEpisode {
        PodcastEpisode {
            id: 7,
            podcast_id: 3,
            episode_id: "guid-7".to_string(),
            name: "Pilot".to_string(),
            url: "https://cdn.example/pilot.mp3".to_string(),
            date_of_recording: "2023-04-01T10:00:00".to_string(),
            image_url: "https://cdn.example/pilot.jpg".to_string(),
            total_time: 1800,
            local_url: String::new(),
            local_image_url: String::new(),
            description: String::new(),
            status: "N".to_string(),
            download_time: None,
        }
    }

    #[test]
    fn login_data_uses_camel_case_wire_names() {
        let data = LoginData {
            username: "alice".to_string(),
            password: "s3cret".to_string(),
            remember_me: true,
        };
        let value = serde_json::to_value(&data).expect("serialize login");
        assert_eq!(
            value,
            json!({"username": "alice", "password": "s3cret", "rememberMe": true})
        );
    }

    #[test]
    fn login_data_debug_hides_password() {
        let data = LoginData {
            username: "alice".to_string(),
            password: "s3cret".to_string(),
            remember_me: false,
        };
        let rendered = format!("{data:?}");
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("s3cret"));
    }

    #[test]
    fn token_matches_btoa_output() {
        let token = BasicAuthToken::encode("admin", "password");
        assert_eq!(token.as_str(), "YWRtaW46cGFzc3dvcmQ=");
        assert_eq!(token.header_value(), "Basic YWRtaW46cGFzc3dvcmQ=");
    }

    #[test]
    fn token_decodes_passwords_containing_colons() {
        let token = BasicAuthToken::encode("admin", "a:b:c");
        let creds = token.decode().expect("decode token");
        assert_eq!(creds.username, "admin");
        assert_eq!(creds.password, "a:b:c");
    }

    #[test]
    fn from_encoded_rejects_garbage() {
        assert!(matches!(
            BasicAuthToken::from_encoded("  "),
            Err(TokenError::Empty)
        ));
        assert!(matches!(
            BasicAuthToken::from_encoded("not base64!"),
            Err(TokenError::Base64(_))
        ));
        let no_colon = general_purpose::STANDARD.encode(b"adminpassword");
        assert!(matches!(
            BasicAuthToken::from_encoded(no_colon),
            Err(TokenError::MissingSeparator)
        ));
        let token = BasicAuthToken::from_encoded(" YWRtaW46cGFzc3dvcmQ= ").expect("valid token");
        assert_eq!(token.as_str(), "YWRtaW46cGFzc3dvcmQ=");
    }

    #[test]
    fn config_model_parses_server_payload() {
        let config: ConfigModel = serde_json::from_value(json!({
            "podindexConfigured": true,
            "rssFeed": "http://localhost:8000/rss",
            "serverUrl": "http://localhost:8000/",
            "basicAuth": true,
            "oidcConfigured": false
        }))
        .expect("parse config");
        assert!(config.basic_auth_enabled());
        assert!(config.active_oidc().is_none());
        assert!(config.requires_login());
    }

    #[test]
    fn oidc_requires_flag_and_settings() {
        let settings = OidcConfig {
            authority: "https://id.example".to_string(),
            client_id: "podfetch".to_string(),
            redirect_uri: "https://pod.example/ui/login".to_string(),
            scope: "openid profile".to_string(),
        };
        let flag_only = ConfigModel {
            oidc_configured: true,
            ..ConfigModel::default()
        };
        assert!(flag_only.active_oidc().is_none());
        let settings_only = ConfigModel {
            oidc_config: Some(settings.clone()),
            ..ConfigModel::default()
        };
        assert!(settings_only.active_oidc().is_none());
        assert!(!settings_only.requires_login());
        let both = ConfigModel {
            oidc_configured: true,
            oidc_config: Some(settings.clone()),
            ..ConfigModel::default()
        };
        assert_eq!(both.active_oidc(), Some(&settings));
        assert!(!both.requires_login());
    }

    #[test]
    fn episode_prefers_local_copies() {
        let mut ep = episode();
        assert_eq!(ep.playback_url(), "https://cdn.example/pilot.mp3");
        assert_eq!(ep.artwork_url(), "https://cdn.example/pilot.jpg");
        assert!(!ep.is_downloaded());
        ep.local_url = "/podcasts/3/pilot.mp3".to_string();
        ep.local_image_url = "/podcasts/3/pilot.jpg".to_string();
        ep.status = "D".to_string();
        assert_eq!(ep.playback_url(), "/podcasts/3/pilot.mp3");
        assert_eq!(ep.artwork_url(), "/podcasts/3/pilot.jpg");
        assert!(ep.is_downloaded());
    }

    #[test]
    fn podcast_keywords_are_split_and_trimmed() {
        let podcast: Podcast = serde_json::from_value(json!({
            "id": 3,
            "name": "Rust Radio",
            "rssfeed": "https://feeds.example/rust",
            "image_url": "/podcasts/3/image.jpg",
            "keywords": "rust, systems,, wasm "
        }))
        .expect("parse podcast");
        assert!(podcast.active);
        assert!(!podcast.favorites);
        assert_eq!(podcast.keyword_list(), vec!["rust", "systems", "wasm"]);
    }

    #[test]
    fn watched_episode_uses_camel_case_wire_names() {
        let watched: WatchedEpisode = serde_json::from_value(json!({
            "id": 11,
            "podcastId": 3,
            "episodeId": "guid-7",
            "url": "https://cdn.example/pilot.mp3",
            "name": "Pilot",
            "imageUrl": "https://cdn.example/pilot.jpg",
            "watchedTime": 120,
            "date": "2023-04-01T10:00:00",
            "totalTime": 1800,
            "podcastEpisode": serde_json::to_value(episode()).expect("serialize episode"),
            "podcast": {
                "id": 3,
                "name": "Rust Radio",
                "rssfeed": "https://feeds.example/rust",
                "image_url": "/podcasts/3/image.jpg"
            }
        }))
        .expect("parse watched episode");
        assert_eq!(watched.podcast_id, 3);
        assert_eq!(watched.watched_time, 120);
        assert_eq!(watched.podcast_episode.id, 7);
        assert_eq!(watched.podcast.name, "Rust Radio");

        let value = serde_json::to_value(&watched).expect("serialize watched episode");
        let mut keys: Vec<&str> = value
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "date",
                "episodeId",
                "id",
                "imageUrl",
                "name",
                "podcast",
                "podcastEpisode",
                "podcastId",
                "totalTime",
                "url",
                "watchedTime",
            ]
        );
    }

    #[test]
    fn watched_progress_is_clamped() {
        let podcast: Podcast = serde_json::from_value(json!({
            "id": 3,
            "name": "Rust Radio",
            "rssfeed": "https://feeds.example/rust",
            "image_url": "/podcasts/3/image.jpg"
        }))
        .expect("parse podcast");
        let date = NaiveDateTime::parse_from_str("2023-04-01 10:00:00", "%Y-%m-%d %H:%M:%S")
            .expect("parse date");
        let mut watched = WatchedEpisode {
            id: 1,
            podcast_id: 3,
            episode_id: "guid-7".to_string(),
            url: "https://cdn.example/pilot.mp3".to_string(),
            name: "Pilot".to_string(),
            image_url: "https://cdn.example/pilot.jpg".to_string(),
            watched_time: 900,
            date,
            total_time: 1800,
            podcast_episode: episode(),
            podcast,
        };
        assert!((watched.progress() - 0.5).abs() < f32::EPSILON);
        watched.watched_time = 5000;
        assert!((watched.progress() - 1.0).abs() < f32::EPSILON);
        watched.total_time = 0;
        assert!(watched.progress().abs() < f32::EPSILON);
    }
}
