//! Contact form validation.
//!
//! Nothing is sent anywhere; a valid submission only produces the
//! confirmation text.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ContactError;

pub const SUCCESS_MESSAGE: &str = "Thank you for your message! I'll get back to you soon.";
pub const FAILURE_MESSAGE: &str = "Please fill in all fields correctly.";

const MIN_NAME_CHARS: usize = 2;
const MIN_MESSAGE_CHARS: usize = 10;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static e-mail pattern"));

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    /// Checks run in field order; the first failure is reported.
    pub fn validate(&self) -> Result<(), ContactError> {
        if self.name.trim().chars().count() < MIN_NAME_CHARS {
            return Err(ContactError::NameTooShort);
        }
        if !EMAIL.is_match(&self.email) {
            return Err(ContactError::InvalidEmail);
        }
        if self.message.trim().chars().count() < MIN_MESSAGE_CHARS {
            return Err(ContactError::MessageTooShort);
        }
        Ok(())
    }

    /// The text shown to the visitor after submitting.
    pub fn outcome_message(&self) -> &'static str {
        match self.validate() {
            Ok(()) => SUCCESS_MESSAGE,
            Err(_) => FAILURE_MESSAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    #[test]
    fn accepts_reasonable_submission() {
        let f = form("Al", "al@example.com", "Hello there, nice site");
        assert_eq!(f.validate(), Ok(()));
        assert_eq!(f.outcome_message(), SUCCESS_MESSAGE);
    }

    #[test]
    fn name_is_trimmed_before_length_check() {
        assert_eq!(
            form("  A  ", "a@b.co", "long enough message").validate(),
            Err(ContactError::NameTooShort)
        );
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in ["", "plain", "a@b", "a b@c.d", "@b.c", "a@@b.c"] {
            assert_eq!(
                form("Al", email, "long enough message").validate(),
                Err(ContactError::InvalidEmail),
                "{email}"
            );
        }
    }

    #[test]
    fn message_needs_ten_visible_chars() {
        let f = form("Al", "a@b.co", "   short    ");
        assert_eq!(f.validate(), Err(ContactError::MessageTooShort));
        assert_eq!(f.outcome_message(), FAILURE_MESSAGE);
    }
}
