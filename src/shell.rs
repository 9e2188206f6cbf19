//! # Shell Module
//!
//! Top-level navigation of the admin panel: the active tab, sign-out, and the
//! notification composer shown on the default tab.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::auth::{AuthGate, Route, RouteDecision, SessionManager};
use crate::error::{Result, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Notifications,
    UserManagement,
    InfluencerManagement,
    InviteUser,
    TokenDetails,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Notifications,
        Tab::UserManagement,
        Tab::InfluencerManagement,
        Tab::InviteUser,
        Tab::TokenDetails,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Notifications => "Notifications",
            Tab::UserManagement => "User Management",
            Tab::InfluencerManagement => "Influencer Management",
            Tab::InviteUser => "Invite User",
            Tab::TokenDetails => "Token Details",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tab: {s}"))
    }
}

/// Notification composer draft. There is no delivery endpoint yet, so a
/// send only records the draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationDraft {
    pub title: String,
    pub description: String,
}

impl NotificationDraft {
    /// Take the draft, leaving the composer empty.
    pub fn send(&mut self) -> Result<NotificationDraft, ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::TitleRequired);
        }
        let sent = std::mem::take(self);
        tracing::info!(title = %sent.title, description = %sent.description, "Sending notification");
        Ok(sent)
    }
}

pub struct Shell {
    session: Arc<SessionManager>,
    active: Tab,
    pub notification: NotificationDraft,
}

impl Shell {
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self {
            session,
            active: Tab::default(),
            notification: NotificationDraft::default(),
        }
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn select(&mut self, tab: Tab) {
        if self.active != tab {
            tracing::debug!(from = %self.active, to = %tab, "Tab selected");
        }
        self.active = tab;
    }

    /// Gate decision for the panel under the current session.
    pub fn route(&self) -> RouteDecision {
        AuthGate::evaluate(Route::Panel, self.session.state())
    }

    /// Clear the session; the panel then redirects to sign-in.
    pub fn logout(&mut self) -> Result<RouteDecision> {
        self.session.logout()?;
        self.active = Tab::default();
        Ok(self.route())
    }
}
