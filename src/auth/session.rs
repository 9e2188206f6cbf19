//! Process-wide admin session
//!
//! Every component reads the session through one `SessionManager` and can
//! subscribe to its `AuthState`, so a logout or a rejected token is seen by
//! all views at once.

use parking_lot::RwLock;
use tokio::sync::watch;

use crate::auth::models::Session;
use crate::auth::store::SessionStore;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// The persisted session has not been read yet
    Unknown,
    Authenticated,
    Unauthenticated,
}

pub struct SessionManager {
    store: Box<dyn SessionStore>,
    current: RwLock<Option<Session>>,
    state_tx: watch::Sender<AuthState>,
}

impl SessionManager {
    pub fn new(store: impl SessionStore + 'static) -> Self {
        let (state_tx, _) = watch::channel(AuthState::Unknown);
        Self {
            store: Box::new(store),
            current: RwLock::new(None),
            state_tx,
        }
    }

    /// Read the persisted session. No network call is made; holding a token
    /// counts as signed in until the API says otherwise.
    pub fn restore(&self) -> Result<AuthState> {
        let loaded = self.store.load()?;
        let state = if loaded.is_some() {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        };
        *self.current.write() = loaded;
        self.state_tx.send_replace(state);
        tracing::debug!(?state, "Session restored");
        Ok(state)
    }

    pub fn login(&self, session: Session) -> Result<()> {
        self.store.save(&session)?;
        tracing::info!(name = %session.name, role = %session.role, "Admin signed in");
        *self.current.write() = Some(session);
        self.state_tx.send_replace(AuthState::Authenticated);
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        let cleared = self.store.clear();
        *self.current.write() = None;
        self.state_tx.send_replace(AuthState::Unauthenticated);
        tracing::info!("Admin signed out");
        cleared
    }

    /// Drop the session after the server rejected it.
    pub fn invalidate(&self, reason: &str) {
        let had_session = self.current.write().take().is_some();
        if let Err(e) = self.store.clear() {
            tracing::error!(error = %e, "Failed to clear persisted session");
        }
        self.state_tx.send_replace(AuthState::Unauthenticated);
        if had_session {
            tracing::warn!(reason, "Session invalidated");
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.current.read().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.current.read().as_ref().map(|s| s.token.clone())
    }

    pub fn state(&self) -> AuthState {
        *self.state_tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::store::MemorySessionStore;

    fn sample() -> Session {
        Session {
            token: "tkn".into(),
            role: "ADMIN".into(),
            name: "Ops".into(),
        }
    }

    #[test]
    fn starts_unknown_until_restored() {
        let manager = SessionManager::new(MemorySessionStore::new());
        assert_eq!(manager.state(), AuthState::Unknown);
        assert_eq!(manager.restore().unwrap(), AuthState::Unauthenticated);
    }

    #[test]
    fn restore_picks_up_persisted_session() {
        let manager = SessionManager::new(MemorySessionStore::with_session(sample()));
        assert_eq!(manager.restore().unwrap(), AuthState::Authenticated);
        assert_eq!(manager.token().as_deref(), Some("tkn"));
    }

    #[tokio::test]
    async fn subscribers_see_login_and_logout() {
        let manager = SessionManager::new(MemorySessionStore::new());
        manager.restore().unwrap();
        let mut rx = manager.subscribe();

        manager.login(sample()).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), AuthState::Authenticated);

        manager.logout().unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), AuthState::Unauthenticated);
        assert!(manager.current().is_none());
    }

    #[test]
    fn invalidate_clears_store() {
        let manager = SessionManager::new(MemorySessionStore::with_session(sample()));
        manager.restore().unwrap();

        manager.invalidate("401 from /admin/users");

        assert_eq!(manager.state(), AuthState::Unauthenticated);
        assert!(manager.token().is_none());
        // a fresh restore sees nothing persisted
        assert_eq!(manager.restore().unwrap(), AuthState::Unauthenticated);
    }
}
