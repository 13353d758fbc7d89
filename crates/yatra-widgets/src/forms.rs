#![forbid(unsafe_code)]

//! Contact and newsletter form validation.
//!
//! Validation never mutates anything on failure: the caller gets a
//! [`ValidationError`], the notifier gets exactly one error message, and the
//! form keeps its values so the visitor can fix them.

use std::sync::OnceLock;

use regex::Regex;

use crate::notification_queue::Notifier;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields.";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";
pub const CONTACT_SENT_MESSAGE: &str = "Thank you! Your message has been sent successfully.";
pub const NEWSLETTER_SUBSCRIBED_MESSAGE: &str = "Successfully subscribed to newsletter!";

static EMAIL_RE: OnceLock<Option<Regex>> = OnceLock::new();

/// `local@domain.tld` with no whitespace and exactly one `@` per part.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(email))
}

/// Why a form was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required fields are blank (ids in form order).
    MissingFields(Vec<String>),
    InvalidEmail,
}

impl ValidationError {
    /// Message shown to the visitor.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::MissingFields(_) => REQUIRED_FIELDS_MESSAGE,
            Self::InvalidEmail => INVALID_EMAIL_MESSAGE,
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields(fields) => {
                write!(f, "missing required fields: {}", fields.join(", "))
            }
            Self::InvalidEmail => write!(f, "invalid email address"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Values of the contact form, keyed by the form's `name` attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub destination: String,
    pub travelers: String,
    pub message: String,
}

impl ContactForm {
    /// Build from `(name, value)` pairs as produced by `FormData`.
    /// Unknown names are ignored.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut form = Self::default();
        for (name, value) in pairs {
            if let Some(slot) = form.field_mut(name) {
                value.clone_into(slot);
            }
        }
        form
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        Some(match name {
            "firstName" => &mut self.first_name,
            "lastName" => &mut self.last_name,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "destination" => &mut self.destination,
            "travelers" => &mut self.travelers,
            "message" => &mut self.message,
            _ => return None,
        })
    }

    /// Check required fields, then the email format.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing: Vec<String> = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("email", &self.email),
            ("destination", &self.destination),
            ("travelers", &self.travelers),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name.to_owned())
        .collect();

        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }
        if !is_valid_email(self.email.trim()) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }

    /// Validate, notify, and clear the form on success.
    pub fn submit(&mut self, notifier: &mut dyn Notifier) -> Result<(), ValidationError> {
        match self.validate() {
            Ok(()) => {
                notifier.success(CONTACT_SENT_MESSAGE);
                *self = Self::default();
                Ok(())
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(message = "forms.contact.rejected", error = %err);
                notifier.error(err.user_message());
                Err(err)
            }
        }
    }
}

/// Subscribe `email` to the newsletter.
pub fn subscribe_newsletter(email: &str, notifier: &mut dyn Notifier) -> Result<(), ValidationError> {
    if is_valid_email(email.trim()) {
        notifier.success(NEWSLETTER_SUBSCRIBED_MESSAGE);
        Ok(())
    } else {
        notifier.error(INVALID_EMAIL_MESSAGE);
        Err(ValidationError::InvalidEmail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::ToastKind;

    fn filled() -> ContactForm {
        ContactForm::from_pairs([
            ("firstName", "Asha"),
            ("lastName", "Rao"),
            ("email", "asha@example.in"),
            ("destination", "kerala"),
            ("travelers", "2"),
            ("unknown", "ignored"),
        ])
    }

    #[test]
    fn email_validator_cases() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("a@@b.com"));
    }

    #[test]
    fn contact_success_clears_form() {
        let mut form = filled();
        let mut sink: Vec<(ToastKind, String)> = Vec::new();
        assert!(form.submit(&mut sink).is_ok());
        assert_eq!(form, ContactForm::default());
        assert_eq!(sink, vec![(ToastKind::Success, CONTACT_SENT_MESSAGE.to_string())]);
    }

    #[test]
    fn contact_missing_fields_keeps_values() {
        let mut form = filled();
        form.travelers = "  ".into();
        let mut sink: Vec<(ToastKind, String)> = Vec::new();
        let err = form.submit(&mut sink).unwrap_err();
        assert_eq!(err, ValidationError::MissingFields(vec!["travelers".into()]));
        assert_eq!(form.first_name, "Asha");
        assert_eq!(sink, vec![(ToastKind::Error, REQUIRED_FIELDS_MESSAGE.to_string())]);
    }

    #[test]
    fn contact_bad_email_reported_after_required_check() {
        let mut form = filled();
        form.email = "asha@example".into();
        assert_eq!(form.validate(), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn newsletter_messages() {
        let mut sink: Vec<(ToastKind, String)> = Vec::new();
        assert!(subscribe_newsletter("x@y.org", &mut sink).is_ok());
        assert!(subscribe_newsletter("nope", &mut sink).is_err());
        assert_eq!(
            sink,
            vec![
                (ToastKind::Success, NEWSLETTER_SUBSCRIBED_MESSAGE.to_string()),
                (ToastKind::Error, INVALID_EMAIL_MESSAGE.to_string()),
            ]
        );
    }
}
