//! Invite form for onboarding a new influencer.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::api::{AdminApi, InviteInfluencerRequest, MutationAck};
use crate::error::{Result, ValidationError};
use crate::influencer::validation::AccessForm;

pub const INVITE_FAILED: &str = "Failed to send invite";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InviteForm {
    pub name: String,
    pub email: String,
    pub instagram: String,
    pub tiktok: String,
    pub access: AccessForm,
}

impl InviteForm {
    /// Checks run in order and stop at the first failure.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::NameRequired);
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::EmailRequired);
        }
        if !EMAIL_RE.is_match(&self.email) {
            return Err(ValidationError::EmailInvalid);
        }
        self.access.validate()?;
        Ok(())
    }

    /// Validated payload. Unlimited invites carry empty date strings.
    pub fn to_request(&self) -> Result<InviteInfluencerRequest, ValidationError> {
        self.validate()?;
        let access_type = self.access.validate()?;
        let (start_date, expiry_date) = self.access.limited_dates().unwrap_or_default();
        Ok(InviteInfluencerRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            instagram: self.instagram.clone(),
            tiktok: self.tiktok.clone(),
            access_type,
            start_date,
            expiry_date,
        })
    }

    /// Send the invite; the form is emptied only when the server accepts it.
    pub async fn submit(&mut self, api: &AdminApi) -> Result<MutationAck> {
        let request = self.to_request()?;
        let ack = api.invite_influencer(&request).await?;
        tracing::info!(access_type = %request.access_type, "Influencer invite sent");
        self.reset();
        Ok(ack)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AccessType;

    fn filled() -> InviteForm {
        InviteForm {
            name: "Lina".into(),
            email: "lina@example.com".into(),
            instagram: "@lina".into(),
            tiktok: String::new(),
            access: AccessForm {
                access_type: Some(AccessType::Unlimited),
                ..AccessForm::default()
            },
        }
    }

    #[test]
    fn first_failing_rule_wins() {
        let empty = InviteForm::default();
        assert_eq!(empty.validate(), Err(ValidationError::NameRequired));

        let no_email = InviteForm {
            email: " ".into(),
            ..filled()
        };
        assert_eq!(no_email.validate(), Err(ValidationError::EmailRequired));

        let bad_email = InviteForm {
            email: "lina@example".into(),
            access: AccessForm::default(),
            ..filled()
        };
        assert_eq!(bad_email.validate(), Err(ValidationError::EmailInvalid));

        let no_access = InviteForm {
            access: AccessForm::default(),
            ..filled()
        };
        assert_eq!(no_access.validate(), Err(ValidationError::AccessTypeRequired));
    }

    #[test]
    fn email_shape() {
        for ok in ["a@b.co", "first.last@sub.example.org"] {
            assert!(EMAIL_RE.is_match(ok), "{ok}");
        }
        for bad in ["a b@c.de", "a@b", "@b.co", "a@@b.co", "a@b.co "] {
            assert!(!EMAIL_RE.is_match(bad), "{bad}");
        }
    }

    #[test]
    fn unlimited_payload_has_empty_dates() {
        let request = filled().to_request().unwrap();
        assert_eq!(request.access_type, AccessType::Unlimited);
        assert_eq!(request.start_date, "");
        assert_eq!(request.expiry_date, "");

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["startDate"], "");
        assert_eq!(json["accessType"], "UNLIMITED");
    }

    #[test]
    fn limited_payload_keeps_dates() {
        let form = InviteForm {
            access: AccessForm {
                access_type: Some(AccessType::Limited),
                start_date: "2025-05-10".into(),
                expiry_date: "2025-05-11".into(),
            },
            ..filled()
        };
        let request = form.to_request().unwrap();
        assert_eq!(request.start_date, "2025-05-10");
        assert_eq!(request.expiry_date, "2025-05-11");
    }

    #[test]
    fn reset_empties_form() {
        let mut form = filled();
        form.reset();
        assert_eq!(form, InviteForm::default());
    }
}
