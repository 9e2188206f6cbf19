//! Access-policy validation shared by the invite form and the editor.

use crate::api::AccessType;
use crate::dates;
use crate::error::ValidationError;

/// Access type plus raw date fields as typed into a form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessForm {
    pub access_type: Option<AccessType>,
    pub start_date: String,
    pub expiry_date: String,
}

impl AccessForm {
    /// Access type must be chosen; `LIMITED` needs both dates with the start
    /// strictly before the expiry. Dates compare as calendar days.
    pub fn validate(&self) -> Result<AccessType, ValidationError> {
        let access_type = self.access_type.ok_or(ValidationError::AccessTypeRequired)?;
        if access_type == AccessType::Unlimited {
            return Ok(access_type);
        }

        let start = self.start_date.trim();
        if start.is_empty() {
            return Err(ValidationError::StartDateRequired);
        }
        let expiry = self.expiry_date.trim();
        if expiry.is_empty() {
            return Err(ValidationError::ExpiryDateRequired);
        }

        let start_day = dates::parse_day(start).ok_or_else(|| ValidationError::DateInvalid {
            field: "start date",
            value: start.to_string(),
        })?;
        let expiry_day = dates::parse_day(expiry).ok_or_else(|| ValidationError::DateInvalid {
            field: "expiry date",
            value: expiry.to_string(),
        })?;

        if start_day >= expiry_day {
            return Err(ValidationError::ExpiryNotAfterStart);
        }
        Ok(access_type)
    }

    /// Dates to send: the typed values for `LIMITED`, nothing otherwise.
    pub fn limited_dates(&self) -> Option<(String, String)> {
        match self.access_type {
            Some(AccessType::Limited) => Some((
                self.start_date.trim().to_string(),
                self.expiry_date.trim().to_string(),
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limited(start: &str, expiry: &str) -> AccessForm {
        AccessForm {
            access_type: Some(AccessType::Limited),
            start_date: start.into(),
            expiry_date: expiry.into(),
        }
    }

    #[test]
    fn same_day_is_rejected_next_day_accepted() {
        assert_eq!(
            limited("2025-05-10", "2025-05-10").validate(),
            Err(ValidationError::ExpiryNotAfterStart)
        );
        assert_eq!(
            limited("2025-05-10", "2025-05-11").validate(),
            Ok(AccessType::Limited)
        );
    }

    #[test]
    fn expiry_before_start_is_rejected() {
        assert_eq!(
            limited("2025-06-01", "2025-05-01").validate(),
            Err(ValidationError::ExpiryNotAfterStart)
        );
    }

    #[test]
    fn missing_pieces_fail_in_order() {
        assert_eq!(AccessForm::default().validate(), Err(ValidationError::AccessTypeRequired));
        assert_eq!(limited("", "").validate(), Err(ValidationError::StartDateRequired));
        assert_eq!(
            limited("2025-05-10", " ").validate(),
            Err(ValidationError::ExpiryDateRequired)
        );
    }

    #[test]
    fn unreadable_date_is_rejected() {
        assert!(matches!(
            limited("tomorrow", "2025-05-11").validate(),
            Err(ValidationError::DateInvalid { field: "start date", .. })
        ));
    }

    #[test]
    fn unlimited_ignores_dates() {
        let form = AccessForm {
            access_type: Some(AccessType::Unlimited),
            start_date: "garbage".into(),
            expiry_date: String::new(),
        };
        assert_eq!(form.validate(), Ok(AccessType::Unlimited));
        assert_eq!(form.limited_dates(), None);
    }
}
