use portfolio_models::contact::{ContactSubmission, ContactSubmissionMissingFields};
use serde::{de::Error, Deserialize, Deserializer};
use serde_json::Value;

/// Request body of the contact endpoint. Presence of the required fields is
/// checked when converting into a [`ContactSubmission`].
///
/// Numbers and booleans are accepted in place of strings. `null`, `false` and
/// `0` count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiContactSubmission {
    /// Full name of the submitter
    #[serde(deserialize_with = "scalar")]
    pub name: Option<String>,
    /// Email address of the submitter
    #[serde(deserialize_with = "scalar")]
    pub email: Option<String>,
    /// Optional phone number
    #[serde(deserialize_with = "scalar")]
    pub mobile: Option<String>,
    /// Content of the message
    #[serde(deserialize_with = "scalar")]
    pub message: Option<String>,
}

fn scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".into()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s),
        other @ (Value::Array(_) | Value::Object(_)) => {
            return Err(D::Error::custom(format!("expected a string, got {other}")));
        }
    })
}

impl TryFrom<ApiContactSubmission> for ContactSubmission {
    type Error = ContactSubmissionMissingFields;

    fn try_from(value: ApiContactSubmission) -> Result<Self, Self::Error> {
        ContactSubmission::new(value.name, value.email, value.mobile, value.message)
    }
}
