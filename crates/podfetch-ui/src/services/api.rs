//! HTTP client helpers (REST).
//!
//! # Design
//! - One client per app boot; the basic-auth header is swapped in place.
//! - Rejections keep the server body verbatim so views can show it unchanged.

use crate::core::logic::{api_url, rejection_message};
use crate::core::oidc::DiscoveryDocument;
use gloo_net::http::{Request, Response};
use podfetch_api_models::{
    BasicAuthToken, ConfigModel, LoginData, Podcast, PodcastEpisode, WatchedEpisode,
};
use serde::de::DeserializeOwned;
use std::cell::RefCell;

/// Error surfaced by API calls.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub(crate) struct ApiError {
    /// HTTP status for rejections; `None` for transport or decode failures.
    pub status: Option<u16>,
    /// Server body for rejections, otherwise the underlying error text.
    pub message: String,
}

impl ApiError {
    fn rejected(status: u16, body: &str) -> Self {
        Self {
            status: Some(status),
            message: rejection_message(status, body),
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        Self {
            status: None,
            message: err.to_string(),
        }
    }
}

/// REST client for the PodFetch server.
#[derive(Debug)]
pub(crate) struct ApiClient {
    base_url: String,
    auth: RefCell<Option<BasicAuthToken>>,
}

impl ApiClient {
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth: RefCell::new(None),
        }
    }

    /// Replace the default `Authorization` credential for later requests.
    pub(crate) fn set_auth(&self, token: Option<BasicAuthToken>) {
        *self.auth.borrow_mut() = token;
    }

    fn url(&self, path: &str) -> String {
        api_url(&self.base_url, path)
    }

    fn authorize(&self, request: Request) -> Request {
        match self.auth.borrow().as_ref() {
            Some(token) => request.header("Authorization", &token.header_value()),
            None => request,
        }
    }

    async fn send(&self, request: Request) -> Result<Response, ApiError> {
        let response = self.authorize(request).send().await?;
        if response.ok() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::rejected(status, &body))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(Request::get(&self.url(path))).await?;
        Ok(response.json::<T>().await?)
    }

    /// Verify credentials with the server.
    pub(crate) async fn login(&self, data: &LoginData) -> Result<(), ApiError> {
        let request = Request::post(&self.url("/login")).json(data)?;
        self.send(request).await?;
        Ok(())
    }

    pub(crate) async fn fetch_config(&self) -> Result<ConfigModel, ApiError> {
        self.get_json("/sys/config").await
    }

    pub(crate) async fn fetch_podcasts(&self) -> Result<Vec<Podcast>, ApiError> {
        self.get_json("/podcasts").await
    }

    pub(crate) async fn fetch_podcast(&self, id: i32) -> Result<Podcast, ApiError> {
        self.get_json(&format!("/podcast/{id}")).await
    }

    pub(crate) async fn fetch_episodes(&self, id: i32) -> Result<Vec<PodcastEpisode>, ApiError> {
        self.get_json(&format!("/podcast/{id}/episodes")).await
    }

    pub(crate) async fn fetch_last_watched(&self) -> Result<Vec<WatchedEpisode>, ApiError> {
        self.get_json("/podcast/episode/lastwatched").await
    }

    /// Fetch an OIDC discovery document. Goes to the provider, so no auth header.
    pub(crate) async fn fetch_oidc_discovery(
        &self,
        url: &str,
    ) -> Result<DiscoveryDocument, ApiError> {
        let response = Request::get(url).send().await?;
        if !response.ok() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::rejected(status, &body));
        }
        Ok(response.json::<DiscoveryDocument>().await?)
    }
}
