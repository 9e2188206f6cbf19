//! # Authentication Module
//!
//! Holds the signed-in admin session, persists it between runs, and decides
//! whether a route may render or must redirect.

pub mod gate;
pub mod models;
pub mod session;
pub mod store;

pub use gate::{AuthGate, Route, RouteDecision};
pub use models::{LoginData, LoginRequest, Session};
pub use session::{AuthState, SessionManager};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
