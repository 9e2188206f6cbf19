//! Detail editor for one influencer.
//!
//! Loads the record, derives its [`Lifecycle`], and gates every mutation on
//! it. Request payloads are built from an [`EditorState`] snapshot so the
//! rules can be checked without a server.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use crate::api::{
    AccessType, AdminApi, Influencer, MutationAck, RevokeInfluencerRequest, UpdateInfluencerRequest,
};
use crate::dates;
use crate::error::{AdminError, Result, ValidationError};
use crate::influencer::lifecycle::{Lifecycle, Revocation, revocation};
use crate::influencer::validation::AccessForm;
use crate::listing::LoadOutcome;

pub const LOAD_FAILED: &str = "Failed to load influencer details";
pub const UPDATE_FAILED: &str = "Failed to update influencer";
pub const REVOKE_FAILED: &str = "Failed to revoke access";
pub const REGENERATE_FAILED: &str = "Failed to regenerate link";

/// A successful mutation. The caller shows `message`, then returns to the
/// list once `return_after` has elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    pub message: String,
    pub return_after: Duration,
}

impl MutationOutcome {
    /// Wait out the confirmation delay.
    pub async fn settle(&self) {
        tokio::time::sleep(self.return_after).await;
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorState {
    pub influencer: Option<Influencer>,
    pub lifecycle: Option<Lifecycle>,
    pub revocation: Option<Revocation>,
    pub form: AccessForm,
    pub invite_token: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl EditorState {
    fn loaded(&self) -> Result<(&Influencer, Lifecycle)> {
        match (&self.influencer, self.lifecycle) {
            (Some(inf), Some(lc)) => Ok((inf, lc)),
            _ => Err(AdminError::InvalidState("Influencer details are not loaded".into())),
        }
    }

    fn apply(&mut self, influencer: Influencer) {
        self.form = AccessForm {
            access_type: influencer.access_type,
            start_date: dates::form_day(influencer.start_date.as_deref()),
            expiry_date: dates::form_day(influencer.expiry_date.as_deref()),
        };
        self.invite_token = influencer.invite_token.clone().filter(|t| !t.trim().is_empty());
        self.lifecycle = Some(Lifecycle::of(&influencer));
        self.revocation = revocation(&influencer);
        self.influencer = Some(influencer);
        self.error = None;
    }

    /// Field update payload; dates travel only with `LIMITED` access.
    pub fn update_request(&self) -> Result<UpdateInfluencerRequest> {
        let (influencer, lifecycle) = self.loaded()?;
        if !lifecycle.editable() {
            return Err(AdminError::InvalidState(
                "Revoked influencers are read-only".into(),
            ));
        }
        let access_type = self.form.validate()?;
        let (start_date, expiry_date) = match self.form.limited_dates() {
            Some((start, expiry)) => (Some(start), Some(expiry)),
            None => (None, None),
        };
        Ok(UpdateInfluencerRequest {
            invite_id: influencer.id.clone(),
            access_type,
            start_date,
            expiry_date,
            source: lifecycle.update_source(),
        })
    }

    pub fn revoke_request(&self, comment: &str) -> Result<RevokeInfluencerRequest> {
        let (influencer, lifecycle) = self.loaded()?;
        if comment.trim().is_empty() {
            return Err(ValidationError::RevokeCommentRequired.into());
        }
        if !lifecycle.can_revoke() {
            return Err(AdminError::InvalidState(
                "Only active, unrevoked influencers can be revoked".into(),
            ));
        }
        Ok(RevokeInfluencerRequest {
            influencer_id: influencer.id.clone(),
            comment: comment.to_string(),
        })
    }

    /// Id to regenerate the invite link for.
    pub fn regenerate_target(&self) -> Result<String> {
        let (influencer, lifecycle) = self.loaded()?;
        if !lifecycle.can_regenerate_link() {
            return Err(AdminError::InvalidState(
                "Invite links can only be regenerated for pending invites".into(),
            ));
        }
        Ok(influencer.id.clone())
    }

    /// Invite deep link, when the lifecycle offers one.
    pub fn invite_link(&self, scheme: &str) -> Option<String> {
        let lifecycle = self.lifecycle?;
        let token = self.invite_token.as_deref();
        lifecycle
            .shows_invite_link(token)
            .then(|| token.map(|t| super::invite_link(scheme, t)))
            .flatten()
    }
}

pub struct InfluencerEditor {
    api: AdminApi,
    confirmation_delay: Duration,
    state: Mutex<EditorState>,
    generation: AtomicU64,
}

impl InfluencerEditor {
    pub fn new(api: AdminApi, confirmation_delay: Duration) -> Self {
        Self {
            api,
            confirmation_delay,
            state: Mutex::new(EditorState::default()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> EditorState {
        self.state.lock().clone()
    }

    pub fn edit_form(&self, edit: impl FnOnce(&mut AccessForm)) {
        edit(&mut self.state.lock().form);
    }

    pub fn set_access_type(&self, access_type: AccessType) {
        self.edit_form(|form| form.access_type = Some(access_type));
    }

    /// Fetch the detail record. Only the latest load may fill the form.
    pub async fn load(&self, id: &str) -> LoadOutcome {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.lock().loading = true;

        let result = self.api.get_influencer(id).await;

        let mut state = self.state.lock();
        if self.generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!(generation = ticket, influencer_id = %id, "Discarding superseded detail load");
            return LoadOutcome::Superseded;
        }
        state.loading = false;

        match result {
            Ok(influencer) => {
                state.apply(influencer);
                tracing::debug!(influencer_id = %id, lifecycle = ?state.lifecycle, "Influencer loaded");
                LoadOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(influencer_id = %id, error = %e, "Influencer load failed");
                let message = e.user_message(LOAD_FAILED);
                state.error = Some(message.clone());
                LoadOutcome::Failed(message)
            }
        }
    }

    pub async fn update(&self) -> Result<MutationOutcome> {
        let request = self.state.lock().update_request()?;
        let ack = self.api.update_influencer(&request).await?;
        tracing::info!(influencer_id = %request.invite_id, source = %request.source, "Influencer updated");
        Ok(self.outcome(ack, "Influencer updated successfully!"))
    }

    pub async fn revoke(&self, comment: &str) -> Result<MutationOutcome> {
        let request = self.state.lock().revoke_request(comment)?;
        let ack = self.api.revoke_influencer(&request).await?;
        tracing::info!(influencer_id = %request.influencer_id, "Influencer access revoked");
        Ok(self.outcome(ack, "Access revoked successfully!"))
    }

    pub async fn regenerate_link(&self) -> Result<MutationOutcome> {
        let id = self.state.lock().regenerate_target()?;
        let ack = self.api.regenerate_invite_link(&id).await?;
        if let Some(token) = ack.invite_token() {
            self.state.lock().invite_token = Some(token);
        }
        tracing::info!(influencer_id = %id, "Invite link regenerated");
        Ok(self.outcome(ack, "Invite link regenerated successfully!"))
    }

    fn outcome(&self, ack: MutationAck, default_message: &str) -> MutationOutcome {
        MutationOutcome {
            message: ack
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| default_message.to_string()),
            return_after: self.confirmation_delay,
        }
    }
}
