//! Request/Response types for the HTTP API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contact::ContactRecord;

// ============================================================================
// Admin Types
// ============================================================================

/// `?password=` query parameter on admin routes
#[derive(Debug, Clone, Default)]
pub struct CredentialQuery {
    pub password: String,
}

impl CredentialQuery {
    /// First `password` pair wins; repeats are ignored
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let password = pairs
            .into_iter()
            .find(|(key, _)| key == "password")
            .map(|(_, value)| value)
            .unwrap_or_default();
        Self { password }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactListResponse {
    pub success: bool,
    pub count: usize,
    pub contacts: Vec<ContactRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

// ============================================================================
// Submission Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedContact {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    pub data: SubmittedContact,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<String>>,
}
