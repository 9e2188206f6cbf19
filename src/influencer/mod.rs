//! # Influencer Module
//!
//! Lifecycle rules, the detail editor, the invite form, and invite deep
//! links.

pub mod deeplink;
pub mod editor;
pub mod invite;
pub mod lifecycle;
pub mod validation;

pub use deeplink::invite_link;
pub use editor::{EditorState, InfluencerEditor, MutationOutcome};
pub use invite::InviteForm;
pub use lifecycle::{Lifecycle, LifecycleState, ListStatus, Revocation, is_revoked};
pub use validation::AccessForm;
