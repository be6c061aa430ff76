//! Session ownership: single source of truth for "who is logged in".
//!
//! The manager is an explicit, injected object; consumers receive a
//! reference (usually behind an `Arc`) and read through [`SessionManager::snapshot`]
//! or the accessors. Only the manager writes the session, and `user` and
//! `token` always change together in one write-lock transition.

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::access::{can_register, Role};
use crate::api::auth::LoginResponse;
use crate::api::types::User;
use crate::api::RegistryClient;
use crate::error::ApiResult;
use crate::token_store::TokenStore;

/// Client-held record of the authenticated identity.
/// Invariant: `user` is present iff `token` is present.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub user: Option<User>,
    pub token: Option<String>,
    pub loading: bool,
}

pub struct SessionManager {
    client: RegistryClient,
    store: Box<dyn TokenStore>,
    state: RwLock<Session>,
}

impl SessionManager {
    /// Starts in the loading state; callers must treat the session as
    /// unknown (not logged out) until [`restore`](Self::restore) completes.
    pub fn new(client: RegistryClient, store: Box<dyn TokenStore>) -> Self {
        Self {
            client,
            store,
            state: RwLock::new(Session { user: None, token: None, loading: true }),
        }
    }

    pub fn snapshot(&self) -> Session {
        self.state.read().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().user.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.read().token.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().user.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.state.read().user.as_ref().map(|u| Role::parse(&u.role))
    }

    /// Advisory registration gate for the current user; false when logged
    /// out. The documents service re-checks on every create.
    pub fn can_register(&self) -> bool {
        self.role().map(|r| can_register(&r)).unwrap_or(false)
    }

    /// Revive a persisted session at startup. With no stored token the
    /// session resolves to logged-out without any network call. A stored
    /// token that the auth service rejects (expired, revoked, or the
    /// service is unreachable) is deleted and the session cleared — the
    /// check-and-clear is silent, nothing is surfaced to the caller.
    pub async fn restore(&self) {
        let Some(token) = self.store.load() else {
            self.install(None, None);
            debug!("session.restore no stored token");
            return;
        };
        match self.client.current_user(&token).await {
            Ok(user) => {
                info!(user = %user.email, "session.restore ok");
                self.install(Some(user), Some(token));
            }
            Err(err) => {
                debug!(error = %err, "session.restore stale token cleared");
                self.store.clear();
                self.install(None, None);
            }
        }
    }

    /// Authenticate and persist the token. On failure the session is left
    /// exactly as it was and the error propagates to the caller.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<User> {
        let LoginResponse { token, user } = self.client.login(email, password).await?;
        if let Err(err) = self.store.save(&token) {
            // Session still works for this run; only the restart path is lost.
            debug!(error = %err, "session.login token not persisted");
        }
        info!(user = %user.email, "session.login ok");
        self.install(Some(user.clone()), Some(token));
        Ok(user)
    }

    /// Clear the session and the persisted token. Infallible and idempotent.
    pub fn logout(&self) {
        self.store.clear();
        self.install(None, None);
        info!("session.logout");
    }

    /// The only writer of session state: user and token move together and
    /// loading ends with the first transition.
    fn install(&self, user: Option<User>, token: Option<String>) {
        debug_assert_eq!(user.is_some(), token.is_some());
        let mut s = self.state.write();
        s.user = user;
        s.token = token;
        s.loading = false;
    }
}
