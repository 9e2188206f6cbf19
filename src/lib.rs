//! # Rizz Admin
//!
//! Admin console for the Rizz mobile backend: end users, influencer
//! invitations and access, push notifications, and model token usage. All
//! data lives behind the remote admin API; this crate holds the session,
//! the screen state, and the rules that decide what an operator may do.
//!
//! ## Architecture
//! - `config`: environment variable configuration
//! - `auth`: session persistence, auth state, route gating
//! - `api`: HTTP adapter, endpoint paths, wire models, typed operations
//! - `listing`: generic paginated list, search debouncing, pager, screens
//! - `influencer`: lifecycle rules, detail editor, invite form, deep links
//! - `shell`: tab navigation and the notification composer
//! - `commands`: the `rizz-admin` command line
//!
//! ## Environment Setup
//! ```bash
//! export ADMIN_API_BASE_URL=https://api.example.com/api
//! rizz-admin login --email ops@example.com --password '...'
//! rizz-admin influencers --search ali
//! ```

pub mod api;
pub mod app;
pub mod auth;
pub mod commands;
pub mod config;
pub mod dates;
pub mod error;
pub mod influencer;
pub mod listing;
pub mod shell;

pub use app::AppState;
pub use config::Config;
pub use error::{AdminError, Result, ValidationError};
