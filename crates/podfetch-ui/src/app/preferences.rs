//! Persistence and environment helpers for the app shell.

use crate::core::auth::{AUTH_STORAGE_KEY, CredentialScope, TokenStoragePlan};
use crate::core::logic;
use crate::core::oidc::OIDC_STATE_KEY;
use crate::i18n::{DEFAULT_LOCALE, LocaleCode};
use gloo::console;
use gloo::storage::{LocalStorage, SessionStorage, Storage};
use gloo::utils::window;
use podfetch_api_models::BasicAuthToken;
use serde::Serialize;

pub(crate) const LOCALE_KEY: &str = "podfetch.locale";
pub(crate) const SIDEBAR_COLLAPSED_KEY: &str = "podfetch.sidebar_collapsed";

pub(crate) fn load_locale() -> LocaleCode {
    if let Ok(value) = LocalStorage::get::<String>(LOCALE_KEY) {
        if let Some(locale) = LocaleCode::from_lang_tag(&value) {
            return locale;
        }
    }
    if let Some(nav) = window().navigator().language() {
        if let Some(locale) = LocaleCode::from_lang_tag(&nav) {
            return locale;
        }
    }
    DEFAULT_LOCALE
}

pub(crate) fn persist_locale(locale: LocaleCode) {
    set_storage(LOCALE_KEY, locale.code());
}

pub(crate) fn load_sidebar_collapsed() -> bool {
    LocalStorage::get::<bool>(SIDEBAR_COLLAPSED_KEY).unwrap_or(false)
}

pub(crate) fn persist_sidebar_collapsed(collapsed: bool) {
    set_storage(SIDEBAR_COLLAPSED_KEY, collapsed);
}

/// Raw `auth` values as `(session, durable)`.
///
/// The token is stored unquoted so it stays readable by anything that uses
/// `getItem("auth")` directly; gloo's JSON helpers are bypassed for it.
pub(crate) fn load_stored_tokens() -> (Option<String>, Option<String>) {
    (
        read_raw(CredentialScope::Session),
        read_raw(CredentialScope::Durable),
    )
}

/// Write the token to `scope` and drop any token held by the other scope.
pub(crate) fn persist_token(token: &BasicAuthToken, scope: CredentialScope) {
    let plan = TokenStoragePlan::for_scope(scope);
    if let Err(err) = raw_storage(plan.write).set_item(AUTH_STORAGE_KEY, token.as_str()) {
        log_storage_error("set", AUTH_STORAGE_KEY, &format!("{err:?}"));
    }
    remove_raw(plan.clear);
}

pub(crate) fn clear_tokens() {
    remove_raw(CredentialScope::Durable);
    remove_raw(CredentialScope::Session);
}

pub(crate) fn persist_oidc_state(state: &str) {
    if let Err(err) = SessionStorage::set(OIDC_STATE_KEY, state) {
        log_storage_error("set", OIDC_STATE_KEY, &err.to_string());
    }
}

pub(crate) fn api_base_url() -> String {
    let origin = window()
        .location()
        .origin()
        .unwrap_or_else(|_| "http://localhost:8000".to_string());
    logic::api_base_url(option_env!("PODFETCH_API_URL"), &origin)
}

fn raw_storage(scope: CredentialScope) -> web_sys::Storage {
    match scope {
        CredentialScope::Durable => LocalStorage::raw(),
        CredentialScope::Session => SessionStorage::raw(),
    }
}

fn read_raw(scope: CredentialScope) -> Option<String> {
    match raw_storage(scope).get_item(AUTH_STORAGE_KEY) {
        Ok(value) => value,
        Err(err) => {
            log_storage_error("get", AUTH_STORAGE_KEY, &format!("{err:?}"));
            None
        }
    }
}

fn remove_raw(scope: CredentialScope) {
    if let Err(err) = raw_storage(scope).remove_item(AUTH_STORAGE_KEY) {
        log_storage_error("delete", AUTH_STORAGE_KEY, &format!("{err:?}"));
    }
}

fn set_storage<T: Serialize>(key: &'static str, value: T) {
    if let Err(err) = LocalStorage::set(key, value) {
        log_storage_error("set", key, &err.to_string());
    }
}

fn log_storage_error(operation: &'static str, key: &'static str, detail: &str) {
    console::error!("storage operation failed", operation, key, detail);
}
