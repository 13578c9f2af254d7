//! Contact data types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validation::{validate_email_shape, validate_submission, SubmissionError};

/// A stored contact message. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub ip_address: Option<String>,
}

/// A validated, trimmed contact ready to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub ip_address: Option<String>,
}

/// The contact form as received, before validation
///
/// Every field is optional here; [`validate_submission`] decides which ones
/// are missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl ContactSubmission {
    /// Build a submission from a decoded JSON body
    ///
    /// Anything other than a non-empty object is treated as "no data".
    /// Strings are taken verbatim, numbers and booleans are rendered as text,
    /// and `null`, arrays or nested objects count as absent.
    pub fn from_json(body: &Value) -> Result<Self, SubmissionError> {
        let fields = match body {
            Value::Object(map) if !map.is_empty() => map,
            _ => return Err(SubmissionError::NoData),
        };

        let text = |key: &str| fields.get(key).and_then(field_text);

        Ok(Self {
            name: text("name"),
            email: text("email"),
            subject: text("subject"),
            message: text("message"),
        })
    }

    /// Look up a field by its wire name
    pub fn field(&self, key: &str) -> Option<&str> {
        match key {
            "name" => self.name.as_deref(),
            "email" => self.email.as_deref(),
            "subject" => self.subject.as_deref(),
            "message" => self.message.as_deref(),
            _ => None,
        }
    }

    /// Validate and trim the submission, attaching the caller's address
    pub fn into_new_contact(
        self,
        ip_address: Option<String>,
    ) -> Result<NewContact, SubmissionError> {
        let missing = validate_submission(&self);
        let (Some(name), Some(email), Some(subject), Some(message), true) = (
            self.name,
            self.email,
            self.subject,
            self.message,
            missing.is_empty(),
        ) else {
            return Err(SubmissionError::MissingFields(missing));
        };

        let email = email.trim();
        if !validate_email_shape(email) {
            return Err(SubmissionError::InvalidEmail);
        }

        Ok(NewContact {
            name: name.trim().to_string(),
            email: email.to_string(),
            subject: subject.trim().to_string(),
            message: message.trim().to_string(),
            ip_address,
        })
    }
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
