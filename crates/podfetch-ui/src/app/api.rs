//! Shared PodFetch client plus the credential lifecycle around it.
//!
//! Storage and the client's `Authorization` header always change together,
//! so every sign-in, restore, and sign-out goes through [`ApiCtx`].

use crate::app::preferences::{clear_tokens, load_stored_tokens, persist_token};
use crate::core::auth::{LoginSuccess, SessionUser, restore_session};
use crate::services::api::ApiClient;
use std::rc::Rc;

#[derive(Clone)]
pub(crate) struct ApiCtx {
    pub client: Rc<ApiClient>,
}

impl ApiCtx {
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Rc::new(ApiClient::new(base_url)),
        }
    }

    /// Pick up a token left by an earlier visit, session scope first.
    pub(crate) fn restore(&self) -> Option<SessionUser> {
        let (session, durable) = load_stored_tokens();
        let (token, _, user) = restore_session(session, durable)?;
        self.client.set_auth(Some(token));
        Some(user)
    }

    /// Persist an accepted login and attach it to later requests.
    pub(crate) fn sign_in(&self, success: &LoginSuccess) {
        persist_token(&success.token, success.scope);
        self.client.set_auth(Some(success.token.clone()));
    }

    /// Forget the token in both scopes and on the client.
    pub(crate) fn sign_out(&self) {
        clear_tokens();
        self.client.set_auth(None);
    }
}

impl PartialEq for ApiCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
    }
}
