use serde::Serialize;
use thiserror::Error;

use crate::macros::nutype_string;

/// Rendered in place of the mobile number when the submitter left it empty.
pub const MOBILE_NOT_PROVIDED: &str = "Not provided";

/// A validated message sent through the contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub mobile: Option<ContactMobile>,
    pub message: ContactMessage,
}

nutype_string!(ContactName);
nutype_string!(
    /// The submitter's email address. Only presence is checked here, the
    /// address is parsed when the reply-to header is built.
    ContactEmail
);
nutype_string!(ContactMobile);
nutype_string!(ContactMessage);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Missing required fields")]
pub struct ContactSubmissionMissingFields;

impl ContactSubmission {
    /// Validate the raw fields of a submission.
    ///
    /// `name`, `email` and `message` must be present and non-empty. Whitespace
    /// is not trimmed. An empty `mobile` is treated as absent.
    pub fn new(
        name: Option<String>,
        email: Option<String>,
        mobile: Option<String>,
        message: Option<String>,
    ) -> Result<Self, ContactSubmissionMissingFields> {
        let (Some(name), Some(email), Some(message)) = (
            name.and_then(|x| ContactName::try_new(x).ok()),
            email.and_then(|x| ContactEmail::try_new(x).ok()),
            message.and_then(|x| ContactMessage::try_new(x).ok()),
        ) else {
            return Err(ContactSubmissionMissingFields);
        };

        Ok(Self {
            name,
            email,
            mobile: mobile.and_then(|x| ContactMobile::try_new(x).ok()),
            message,
        })
    }

    pub fn mobile_or_default(&self) -> &str {
        self.mobile
            .as_deref()
            .map_or(MOBILE_NOT_PROVIDED, String::as_str)
    }
}

/// The unvalidated input buffer of the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactFormData {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mobile: String,
    pub message: String,
}

impl ContactFormData {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use portfolio_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    fn some(x: &str) -> Option<String> {
        Some(x.into())
    }

    #[test]
    fn valid_without_mobile() {
        let submission =
            ContactSubmission::new(some("Ada"), some("ada@example.com"), None, some("Hello"))
                .unwrap();

        assert_eq!(submission.name.as_str(), "Ada");
        assert_eq!(submission.email.as_str(), "ada@example.com");
        assert_eq!(submission.mobile, None);
        assert_eq!(submission.message.as_str(), "Hello");
        assert_eq!(submission.mobile_or_default(), "Not provided");
    }

    #[test]
    fn valid_with_mobile() {
        let submission = ContactSubmission::new(
            some("Ada"),
            some("ada@example.com"),
            some("+44 20 7946 0000"),
            some("Hello"),
        )
        .unwrap();

        assert_eq!(submission.mobile_or_default(), "+44 20 7946 0000");
    }

    #[test]
    fn empty_mobile_is_absent() {
        let submission =
            ContactSubmission::new(some("Ada"), some("ada@example.com"), some(""), some("Hello"))
                .unwrap();

        assert_eq!(submission.mobile, None);
    }

    #[test]
    fn whitespace_counts_as_present() {
        let result = ContactSubmission::new(some(" "), some(" "), None, some("\n"));
        assert_matches!(result, Ok(_));
    }

    #[test]
    fn missing_fields() {
        for (name, email, message) in [
            (None, some("ada@example.com"), some("Hello")),
            (some("Ada"), None, some("Hello")),
            (some("Ada"), some("ada@example.com"), None),
            (some(""), some("ada@example.com"), some("Hello")),
            (some("Ada"), some(""), some("Hello")),
            (some("Ada"), some("ada@example.com"), some("")),
            (None, None, None),
        ] {
            let result = ContactSubmission::new(name, email, some("123"), message);
            assert_eq!(result, Err(ContactSubmissionMissingFields));
        }
    }

    #[test]
    fn form_data_skips_empty_mobile() {
        let data = ContactFormData {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            mobile: String::new(),
            message: "Hello".into(),
        };

        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            serde_json::json!({"name": "Ada", "email": "ada@example.com", "message": "Hello"})
        );
    }

    #[test]
    fn form_data_clear() {
        let mut data = ContactFormData {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            mobile: "123".into(),
            message: "Hello".into(),
        };

        data.clear();

        assert_eq!(data, ContactFormData::default());
    }
}
