//! # App Module
//!
//! Builds the shared context every command runs against.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api::{AdminApi, HttpClient};
use crate::auth::{AuthGate, FileSessionStore, Route, RouteDecision, SessionManager, SessionStore};
use crate::config::Config;

/// Application state shared across all commands
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub session: Arc<SessionManager>,
    pub api: AdminApi,
}

impl AppState {
    /// Context backed by the session file named in the configuration.
    pub fn new(config: Config) -> Result<Self> {
        let store = FileSessionStore::new(config.session.path.clone());
        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: impl SessionStore + 'static) -> Result<Self> {
        let session = Arc::new(SessionManager::new(store));
        let state = session.restore().context("Failed to read the saved session")?;
        tracing::debug!(?state, "Session state at start-up");

        let http = HttpClient::new(&config.api, Arc::clone(&session))
            .context("Failed to build the HTTP client")?;

        Ok(Self {
            config: Arc::new(config),
            session,
            api: AdminApi::new(Arc::new(http)),
        })
    }

    pub fn gate(&self, route: Route) -> RouteDecision {
        AuthGate::evaluate(route, self.session.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{MemorySessionStore, Session};
    use crate::config::{ApiConfig, SessionConfig, UiConfig};

    fn config() -> Config {
        Config {
            api: ApiConfig::new("http://127.0.0.1:9/api").unwrap(),
            session: SessionConfig {
                path: "unused.json".into(),
            },
            ui: UiConfig::default(),
        }
    }

    #[test]
    fn restores_session_on_start() {
        let store = MemorySessionStore::with_session(Session {
            token: "tkn".into(),
            role: "ADMIN".into(),
            name: "Ops".into(),
        });
        let app = AppState::with_store(config(), store).unwrap();
        assert_eq!(app.gate(Route::Panel), RouteDecision::Render);
        assert_eq!(app.gate(Route::Login), RouteDecision::Redirect(Route::Panel));
    }

    #[test]
    fn empty_store_redirects_panel_to_login() {
        let app = AppState::with_store(config(), MemorySessionStore::new()).unwrap();
        assert_eq!(app.gate(Route::Panel), RouteDecision::Redirect(Route::Login));
    }
}
