//! Authentication primitives shared across the UI.
//!
//! # Design
//! - Keep login state as plain data so callers persist/clear it without side effects.
//! - Pick the storage scope from the remember-me flag; the view layer only writes it.
//! - Leave browser storage and header wiring to the app layer to keep core DOM-free.

use podfetch_api_models::{BasicAuthToken, LoginData};

/// Storage key holding the encoded basic-auth token in either scope.
pub const AUTH_STORAGE_KEY: &str = "auth";

/// Delay between a successful login and the redirect away from the form.
pub const LOGIN_REDIRECT_DELAY_MS: u32 = 100;

/// Browser storage scope used for the credential token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialScope {
    /// `localStorage`; survives browser restarts.
    Durable,
    /// `sessionStorage`; cleared with the tab.
    Session,
}

impl CredentialScope {
    /// Scope selected by the login form's remember-me flag.
    #[must_use]
    pub const fn for_remember_me(remember_me: bool) -> Self {
        if remember_me {
            Self::Durable
        } else {
            Self::Session
        }
    }

    /// The opposite scope, cleared when a token is written so only one stays active.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Durable => Self::Session,
            Self::Session => Self::Durable,
        }
    }
}

/// Storage writes for a fresh token: set `write`, remove `clear`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenStoragePlan {
    /// Scope receiving the token.
    pub write: CredentialScope,
    /// Scope whose stale token is removed.
    pub clear: CredentialScope,
}

impl TokenStoragePlan {
    /// Plan for a token persisted in `scope`; the other scope is always cleared.
    #[must_use]
    pub const fn for_scope(scope: CredentialScope) -> Self {
        Self {
            write: scope,
            clear: scope.other(),
        }
    }
}

/// Signed-in user as kept in the `common` slice. The password never lands here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionUser {
    /// Account name.
    pub username: String,
    /// Whether the token lives in durable storage.
    pub remembered: bool,
}

/// Raw login form inputs, kept as strings for lossless editing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Username input value.
    pub username: String,
    /// Password input value.
    pub password: String,
    /// Remember-me checkbox state.
    pub remember_me: bool,
}

/// Client-side validation failures for the login form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginFormError {
    /// Username left blank.
    MissingUsername,
    /// Password left blank.
    MissingPassword,
}

impl LoginFormError {
    /// Translation key describing the failure.
    #[must_use]
    pub const fn message_key(self) -> &'static str {
        match self {
            Self::MissingUsername => "login.username_required",
            Self::MissingPassword => "login.password_required",
        }
    }
}

impl LoginForm {
    /// Validate required fields and build the request payload.
    ///
    /// Values are sent exactly as typed; trimming only decides blankness.
    ///
    /// # Errors
    ///
    /// Returns the first missing field.
    pub fn validate(&self) -> Result<LoginData, LoginFormError> {
        if self.username.trim().is_empty() {
            return Err(LoginFormError::MissingUsername);
        }
        if self.password.is_empty() {
            return Err(LoginFormError::MissingPassword);
        }
        Ok(LoginData {
            username: self.username.clone(),
            password: self.password.clone(),
            remember_me: self.remember_me,
        })
    }
}

/// Everything the app layer applies after the server accepts a login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginSuccess {
    /// Token to persist and attach as the default `Authorization` header.
    pub token: BasicAuthToken,
    /// Storage scope for the token.
    pub scope: CredentialScope,
    /// Session state for the store.
    pub user: SessionUser,
}

impl LoginSuccess {
    /// Derive token, scope, and session state from an accepted login.
    #[must_use]
    pub fn from_login(data: &LoginData) -> Self {
        Self {
            token: data.token(),
            scope: CredentialScope::for_remember_me(data.remember_me),
            user: SessionUser {
                username: data.username.clone(),
                remembered: data.remember_me,
            },
        }
    }
}

/// Result of a login round-trip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The server accepted the credentials.
    Authenticated(LoginSuccess),
    /// The server rejected the request; the text is shown verbatim.
    Rejected(String),
}

impl LoginOutcome {
    /// Fold the server response into an outcome.
    #[must_use]
    pub fn resolve(data: &LoginData, response: Result<(), String>) -> Self {
        match response {
            Ok(()) => Self::Authenticated(LoginSuccess::from_login(data)),
            Err(message) => Self::Rejected(message),
        }
    }

    /// Whether the UI should leave the login screen.
    #[must_use]
    pub const fn should_navigate(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Alert text to show inline, if any.
    #[must_use]
    pub fn alert(&self) -> Option<&str> {
        match self {
            Self::Authenticated(_) => None,
            Self::Rejected(message) => Some(message),
        }
    }
}

/// Pick the token to restore at boot. Session scope wins over durable scope;
/// unreadable values are skipped.
#[must_use]
pub fn restore_session(
    session: Option<String>,
    durable: Option<String>,
) -> Option<(BasicAuthToken, CredentialScope, SessionUser)> {
    [
        (session, CredentialScope::Session),
        (durable, CredentialScope::Durable),
    ]
    .into_iter()
    .find_map(|(value, scope)| {
        let token = BasicAuthToken::from_encoded(value?).ok()?;
        let creds = token.decode().ok()?;
        let user = SessionUser {
            username: creds.username,
            remembered: scope == CredentialScope::Durable,
        };
        Some((token, scope, user))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(username: &str, password: &str, remember_me: bool) -> LoginForm {
        LoginForm {
            username: username.to_string(),
            password: password.to_string(),
            remember_me,
        }
    }

    #[test]
    fn remember_me_selects_durable_storage() {
        let data = form("alice", "pw", true).validate().expect("valid form");
        let success = LoginSuccess::from_login(&data);
        assert_eq!(success.scope, CredentialScope::Durable);
        assert_eq!(success.scope.other(), CredentialScope::Session);
        assert!(success.user.remembered);
    }

    #[test]
    fn unchecked_remember_me_selects_session_storage() {
        let data = form("alice", "pw", false).validate().expect("valid form");
        let success = LoginSuccess::from_login(&data);
        assert_eq!(success.scope, CredentialScope::Session);
        assert_eq!(success.token, BasicAuthToken::encode("alice", "pw"));
        assert_eq!(success.user.username, "alice");
    }

    #[test]
    fn form_validation_requires_both_fields() {
        assert_eq!(
            form("  ", "pw", false).validate(),
            Err(LoginFormError::MissingUsername)
        );
        assert_eq!(
            form("alice", "", false).validate(),
            Err(LoginFormError::MissingPassword)
        );
    }

    #[test]
    fn form_values_reach_the_credential_untrimmed() {
        let data = form(" alice ", " pw ", false).validate().expect("valid");
        assert_eq!(data.username, " alice ");
        assert_eq!(data.password, " pw ");
        let success = LoginSuccess::from_login(&data);
        assert_eq!(success.token, BasicAuthToken::encode(" alice ", " pw "));
    }

    #[test]
    fn new_login_clears_the_other_scope() {
        let remembered = form("alice", "pw", true).validate().expect("valid");
        let plan = TokenStoragePlan::for_scope(LoginSuccess::from_login(&remembered).scope);
        assert_eq!(plan.write, CredentialScope::Durable);
        assert_eq!(plan.clear, CredentialScope::Session);

        let transient = form("alice", "pw", false).validate().expect("valid");
        let plan = TokenStoragePlan::for_scope(LoginSuccess::from_login(&transient).scope);
        assert_eq!(plan.write, CredentialScope::Session);
        assert_eq!(plan.clear, CredentialScope::Durable);
        assert_ne!(plan.write, plan.clear);
    }

    #[test]
    fn rejected_login_keeps_user_on_form_with_server_text() {
        let data = form("alice", "wrong", true).validate().expect("valid");
        let outcome = LoginOutcome::resolve(&data, Err("Invalid credentials".to_string()));
        assert!(!outcome.should_navigate());
        assert_eq!(outcome.alert(), Some("Invalid credentials"));
    }

    #[test]
    fn accepted_login_navigates_without_alert() {
        let data = form("alice", "pw", true).validate().expect("valid");
        let outcome = LoginOutcome::resolve(&data, Ok(()));
        assert!(outcome.should_navigate());
        assert_eq!(outcome.alert(), None);
    }

    #[test]
    fn restore_prefers_session_scope() {
        let session = BasicAuthToken::encode("sess", "a").as_str().to_string();
        let durable = BasicAuthToken::encode("dur", "b").as_str().to_string();
        let (token, scope, user) =
            restore_session(Some(session.clone()), Some(durable)).expect("restored");
        assert_eq!(token.as_str(), session);
        assert_eq!(scope, CredentialScope::Session);
        assert_eq!(user.username, "sess");
        assert!(!user.remembered);
    }

    #[test]
    fn restore_skips_corrupt_values() {
        let durable = BasicAuthToken::encode("dur", "b").as_str().to_string();
        let (_, scope, user) =
            restore_session(Some("%%%".to_string()), Some(durable)).expect("restored");
        assert_eq!(scope, CredentialScope::Durable);
        assert!(user.remembered);
        assert!(restore_session(None, None).is_none());
        assert!(restore_session(Some(String::new()), None).is_none());
    }
}
