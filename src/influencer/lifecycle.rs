//! Influencer lifecycle: invited, active, revoked.
//!
//! A record counts as revoked when it carries both a revoke comment and a
//! revoke timestamp. `revokedByAdminId` is informational only. The list
//! status and the editor use this same rule.

use std::fmt;

use crate::api::{Influencer, Source};

fn present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

pub fn is_revoked(influencer: &Influencer) -> bool {
    present(influencer.revoke_comment.as_deref()) && present(influencer.revoked_at.as_deref())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revocation {
    pub comment: String,
    pub revoked_at: String,
    pub revoked_by: Option<String>,
}

pub fn revocation(influencer: &Influencer) -> Option<Revocation> {
    if !is_revoked(influencer) {
        return None;
    }
    Some(Revocation {
        comment: influencer.revoke_comment.clone().unwrap_or_default(),
        revoked_at: influencer.revoked_at.clone().unwrap_or_default(),
        revoked_by: influencer
            .revoked_by_admin_id
            .clone()
            .filter(|id| !id.trim().is_empty()),
    })
}

/// Status column of the influencer table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus {
    Active,
    Revoked,
    Inactive,
}

impl ListStatus {
    pub fn of(influencer: &Influencer) -> Self {
        if influencer.is_active {
            ListStatus::Active
        } else if is_revoked(influencer) {
            ListStatus::Revoked
        } else {
            ListStatus::Inactive
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ListStatus::Active => "Active",
            ListStatus::Revoked => "Revoked",
            ListStatus::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for ListStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Invitation sent, no end-user account linked yet
    Invited,
    /// Accepted (or active) and not revoked; editable
    Active,
    /// Terminal and read-only
    Revoked,
}

/// Flags derived from one influencer record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifecycle {
    pub is_invited: bool,
    pub is_active: bool,
    pub is_revoked: bool,
}

impl Lifecycle {
    pub fn of(influencer: &Influencer) -> Self {
        Self {
            is_invited: influencer.source == Some(Source::Invite) && influencer.user_data.is_none(),
            is_active: influencer.is_active,
            is_revoked: is_revoked(influencer),
        }
    }

    pub fn state(&self) -> LifecycleState {
        if self.is_revoked {
            LifecycleState::Revoked
        } else if self.is_active || !self.is_invited {
            LifecycleState::Active
        } else {
            LifecycleState::Invited
        }
    }

    pub fn editable(&self) -> bool {
        !self.is_revoked
    }

    pub fn can_revoke(&self) -> bool {
        !self.is_revoked && self.is_active
    }

    pub fn can_regenerate_link(&self) -> bool {
        !self.is_revoked && !self.is_active && self.is_invited
    }

    /// Whether the shareable invite link is offered at all.
    pub fn shows_invite_link(&self, token: Option<&str>) -> bool {
        self.is_invited && !self.is_active && !self.is_revoked && present(token)
    }

    /// Tag sent with field updates so the backend can tell an accepted
    /// influencer from a pending invite.
    pub fn update_source(&self) -> Source {
        if self.is_active || !self.is_invited {
            Source::Influencer
        } else {
            Source::Invite
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::UserRecord;

    fn base() -> Influencer {
        Influencer {
            id: "inf1".into(),
            name: "Lina".into(),
            ..Influencer::default()
        }
    }

    fn with_revoke(comment: Option<&str>, at: Option<&str>, by: Option<&str>) -> Influencer {
        Influencer {
            revoke_comment: comment.map(str::to_string),
            revoked_at: at.map(str::to_string),
            revoked_by_admin_id: by.map(str::to_string),
            ..base()
        }
    }

    #[test]
    fn all_three_revoke_fields_present_is_revoked() {
        let inf = with_revoke(Some("fraud"), Some("2025-05-01T00:00:00Z"), Some("adm1"));
        assert_eq!(ListStatus::of(&inf), ListStatus::Revoked);
        assert_eq!(revocation(&inf).unwrap().revoked_by.as_deref(), Some("adm1"));
    }

    #[test]
    fn comment_and_timestamp_without_admin_is_revoked() {
        let inf = with_revoke(Some("fraud"), Some("2025-05-01T00:00:00Z"), None);
        assert_eq!(ListStatus::of(&inf), ListStatus::Revoked);
        assert!(Lifecycle::of(&inf).is_revoked);
    }

    #[test]
    fn partial_revoke_fields_are_inactive() {
        for inf in [
            with_revoke(Some("fraud"), None, Some("adm1")),
            with_revoke(None, Some("2025-05-01T00:00:00Z"), Some("adm1")),
            with_revoke(Some("   "), Some("2025-05-01T00:00:00Z"), None),
            with_revoke(None, None, None),
        ] {
            assert_eq!(ListStatus::of(&inf), ListStatus::Inactive, "{inf:?}");
            assert!(Lifecycle::of(&inf).editable());
        }
    }

    #[test]
    fn active_flag_wins_in_list_status() {
        let inf = Influencer {
            is_active: true,
            ..base()
        };
        assert_eq!(ListStatus::of(&inf), ListStatus::Active);
    }

    #[test]
    fn revoked_is_read_only_regardless_of_other_flags() {
        let inf = Influencer {
            is_active: true,
            source: Some(Source::Invite),
            ..with_revoke(Some("done"), Some("2025-05-01T00:00:00Z"), None)
        };
        let lc = Lifecycle::of(&inf);
        assert_eq!(lc.state(), LifecycleState::Revoked);
        assert!(!lc.editable());
        assert!(!lc.can_revoke());
        assert!(!lc.can_regenerate_link());
        assert!(!lc.shows_invite_link(Some("tok")));
    }

    #[test]
    fn pending_invite_can_regenerate_and_updates_as_invite() {
        let inf = Influencer {
            source: Some(Source::Invite),
            invite_token: Some("tok".into()),
            ..base()
        };
        let lc = Lifecycle::of(&inf);
        assert_eq!(lc.state(), LifecycleState::Invited);
        assert!(lc.can_regenerate_link());
        assert!(!lc.can_revoke());
        assert!(lc.shows_invite_link(inf.invite_token.as_deref()));
        assert_eq!(lc.update_source(), Source::Invite);
    }

    #[test]
    fn linked_user_data_turns_invite_into_influencer() {
        let inf = Influencer {
            source: Some(Source::Invite),
            user_data: Some(UserRecord::default()),
            ..base()
        };
        let lc = Lifecycle::of(&inf);
        assert!(!lc.is_invited);
        assert_eq!(lc.state(), LifecycleState::Active);
        assert_eq!(lc.update_source(), Source::Influencer);
        assert!(!lc.can_regenerate_link());
    }

    #[test]
    fn active_invite_updates_as_influencer() {
        let inf = Influencer {
            source: Some(Source::Invite),
            is_active: true,
            ..base()
        };
        let lc = Lifecycle::of(&inf);
        assert_eq!(lc.update_source(), Source::Influencer);
        assert!(lc.can_revoke());
    }
}
