//! Validation module
//!
//! Stateless checks for incoming contact submissions. Nothing here touches
//! the store or the network.

use thiserror::Error;

use super::model::ContactSubmission;

/// Fields every submission must carry, in the order they are reported
pub const REQUIRED_FIELDS: [&str; 4] = ["name", "email", "subject", "message"];

/// Reasons a submission is refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("No data provided")]
    NoData,

    #[error("Missing required fields")]
    MissingFields(Vec<&'static str>),

    #[error("Invalid email")]
    InvalidEmail,
}

impl SubmissionError {
    /// Human-readable hint for the submitter
    pub fn message(&self) -> String {
        match self {
            SubmissionError::NoData => "Please send JSON data".to_string(),
            SubmissionError::MissingFields(fields) => {
                format!("Please provide: {}", fields.join(", "))
            }
            SubmissionError::InvalidEmail => "Please provide a valid email address".to_string(),
        }
    }
}

/// Names of required fields that are absent or blank after trimming
///
/// An empty result means the submission is complete.
pub fn validate_submission(submission: &ContactSubmission) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|key| {
            submission
                .field(key)
                .map_or(true, |value| value.trim().is_empty())
        })
        .collect()
}

/// Coarse email shape check: the trimmed address contains both `@` and `.`
///
/// Not RFC validation and not a security boundary.
pub fn validate_email_shape(email: &str) -> bool {
    let email = email.trim();
    email.contains('@') && email.contains('.')
}
