//! In-memory session synchronized with a credential store

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use super::store::{CredentialStore, LEGACY_REFRESH_KEY, LEGACY_TOKEN_KEY, TOKEN_KEY, USER_KEY};

/// Action run after every `logout()`, e.g. navigating to the login screen
pub type LogoutCallback = Arc<dyn Fn() + Send + Sync>;

/// Current authentication status
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Bearer token; present and non-empty iff authenticated
    pub token: Option<String>,
    /// Display name only. May be absent while a token is present.
    pub user: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Owner of the session and its persisted copy.
///
/// Shared as `Arc<SessionState>` between the navigator and the API client.
/// `login` and `logout` are the only mutators.
pub struct SessionState {
    store: Box<dyn CredentialStore>,
    session: Mutex<Session>,
    on_logout: Mutex<Option<LogoutCallback>>,
}

impl SessionState {
    /// Load whatever the store holds. Run once at process start.
    pub fn initialize(store: impl CredentialStore + 'static) -> Self {
        let mut token = non_empty(store.get(TOKEN_KEY));

        if token.is_none() {
            if let Some(legacy) = non_empty(store.get(LEGACY_TOKEN_KEY)) {
                tracing::info!("Migrating token from legacy '{}' key", LEGACY_TOKEN_KEY);
                persist(store.set(TOKEN_KEY, &legacy), TOKEN_KEY);
                persist(store.remove(LEGACY_TOKEN_KEY), LEGACY_TOKEN_KEY);
                token = Some(legacy);
            }
        }

        let user = non_empty(store.get(USER_KEY));
        tracing::debug!(
            authenticated = token.is_some(),
            user = user.as_deref().unwrap_or("-"),
            "Session initialized"
        );

        Self {
            store: Box::new(store),
            session: Mutex::new(Session { token, user }),
            on_logout: Mutex::new(None),
        }
    }

    /// Snapshot of the current session
    pub fn current(&self) -> Session {
        self.lock_session().clone()
    }

    /// Token as of this instant; read per request, never cached
    pub fn token(&self) -> Option<String> {
        self.lock_session().token.clone()
    }

    pub fn user(&self) -> Option<String> {
        self.lock_session().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock_session().is_authenticated()
    }

    /// Record a freshly issued token.
    ///
    /// The caller vouches that `token` came from a successful authentication
    /// response. An empty token is ignored so that the session never looks
    /// authenticated without a credential.
    pub fn login(&self, token: &str, user: Option<&str>) {
        if token.is_empty() {
            tracing::warn!("Ignoring login with an empty token");
            return;
        }
        let user = user.filter(|u| !u.is_empty());

        {
            let mut session = self.lock_session();
            session.token = Some(token.to_string());
            session.user = user.map(str::to_string);

            persist(self.store.set(TOKEN_KEY, token), TOKEN_KEY);
            match user {
                Some(u) => persist(self.store.set(USER_KEY, u), USER_KEY),
                None => persist(self.store.remove(USER_KEY), USER_KEY),
            }
        }

        tracing::info!(user = user.unwrap_or("-"), "Logged in");
    }

    /// Clear the session and its persisted copy, then run the logout callback.
    ///
    /// Idempotent apart from the callback, which fires on every call.
    pub fn logout(&self) {
        {
            let mut session = self.lock_session();
            let was_authenticated = session.is_authenticated();
            *session = Session::default();

            for key in [TOKEN_KEY, USER_KEY, LEGACY_TOKEN_KEY, LEGACY_REFRESH_KEY] {
                persist(self.store.remove(key), key);
            }

            if was_authenticated {
                tracing::info!("Logged out");
            }
        }

        // Cloned out so the callback may call back into this object
        let callback = self
            .on_logout
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        if let Some(callback) = callback {
            callback();
        }
    }

    /// Replace the logout callback; `None` disables it
    pub fn set_logout_callback(&self, callback: Option<LogoutCallback>) {
        *self.on_logout.lock().unwrap_or_else(|e| e.into_inner()) = callback;
    }

    fn lock_session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.lock_session();
        f.debug_struct("SessionState")
            .field("authenticated", &session.is_authenticated())
            .field("user", &session.user)
            .finish_non_exhaustive()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// In-memory state stays authoritative when the store cannot be written;
/// the next `initialize()` reconciles from whatever did land on disk.
fn persist(result: crate::error::Result<()>, key: &str) {
    if let Err(e) = result {
        tracing::warn!("Failed to persist credential '{}': {}", key, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, LogoutCallback) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let callback: LogoutCallback = Arc::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        (count, callback)
    }

    #[test]
    fn test_initialize_empty_store() {
        let state = SessionState::initialize(MemoryStore::new());
        assert_eq!(state.current(), Session::default());
        assert!(!state.is_authenticated());
    }

    #[test]
    fn test_initialize_reads_token_and_user() {
        let store = MemoryStore::with_entries([(TOKEN_KEY, "abc"), (USER_KEY, "alice")]);
        let state = SessionState::initialize(store);
        assert_eq!(state.token().as_deref(), Some("abc"));
        assert_eq!(state.user().as_deref(), Some("alice"));
    }

    #[test]
    fn test_initialize_migrates_legacy_token() {
        let store = MemoryStore::with_entries([(LEGACY_TOKEN_KEY, "old")]);
        let state = SessionState::initialize(store.clone());

        assert_eq!(state.token().as_deref(), Some("old"));
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("old"));
        assert!(!store.contains(LEGACY_TOKEN_KEY));
    }

    #[test]
    fn test_canonical_token_wins_over_legacy() {
        let store = MemoryStore::with_entries([(TOKEN_KEY, "new"), (LEGACY_TOKEN_KEY, "old")]);
        let state = SessionState::initialize(store);
        assert_eq!(state.token().as_deref(), Some("new"));
    }

    #[test]
    fn test_token_without_user_is_authenticated() {
        let store = MemoryStore::with_entries([(TOKEN_KEY, "abc")]);
        let state = SessionState::initialize(store);
        assert!(state.is_authenticated());
        assert_eq!(state.user(), None);
    }

    #[test]
    fn test_empty_login_is_ignored() {
        let store = MemoryStore::new();
        let state = SessionState::initialize(store.clone());
        state.login("", Some("alice"));
        assert_eq!(state.current(), Session::default());
        assert!(store.is_empty());
    }

    #[test]
    fn test_logout_fires_callback_even_when_logged_out() {
        let state = SessionState::initialize(MemoryStore::new());
        let (count, callback) = counter();
        state.set_logout_callback(Some(callback));

        state.logout();
        state.logout();

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_logout_without_callback_still_clears() {
        let store = MemoryStore::new();
        let state = SessionState::initialize(store.clone());
        state.login("abc", Some("alice"));
        state.logout();
        assert!(!state.is_authenticated());
        assert!(store.is_empty());
    }

    #[test]
    fn test_callback_may_read_session() {
        let state = Arc::new(SessionState::initialize(MemoryStore::new()));
        let seen = Arc::new(Mutex::new(None));
        {
            let state_ref = Arc::downgrade(&state);
            let seen = Arc::clone(&seen);
            state.set_logout_callback(Some(Arc::new(move || {
                if let Some(s) = state_ref.upgrade() {
                    *seen.lock().unwrap() = Some(s.is_authenticated());
                }
            })));
        }

        state.login("abc", None);
        state.logout();

        assert_eq!(*seen.lock().unwrap(), Some(false));
    }
}
