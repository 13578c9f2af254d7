//! HTTP API handlers

use super::error::{ApiError, ApiResult, GENERIC_FAILURE};
use super::state::AppState;
use super::types::*;
use crate::contact::{ContactSubmission, SubmissionError};
use crate::health::HealthReport;
use crate::metrics::{
    record_counter, ADMIN_UNAUTHORIZED, CONTACTS_DELETED, CONTACTS_REJECTED, CONTACTS_SUBMITTED,
    STORE_FAILURES,
};
use crate::store::StoreError;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        ConnectInfo, Path, Query, State,
    },
    http::{StatusCode, Uri},
    response::Html,
    Json,
};
use chrono::Utc;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info};

const INDEX_PAGE: &str = include_str!("index.html");

/// Run a store call on the blocking pool
async fn blocking<T, F>(f: F) -> anyhow::Result<T>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(f).await?;
    result.map_err(|e| {
        record_counter(STORE_FAILURES, 1);
        e.into()
    })
}

fn rejected(err: SubmissionError) -> ApiError {
    debug!("Rejected submission: {}", err);
    record_counter(CONTACTS_REJECTED, 1);
    ApiError::BadRequest(err)
}

type RawQuery = Result<Query<Vec<(String, String)>>, QueryRejection>;

fn require_admin(state: &AppState, query: RawQuery) -> ApiResult<()> {
    let credentials = match query {
        Ok(Query(pairs)) => CredentialQuery::from_pairs(pairs),
        Err(rejection) => {
            debug!("Unreadable admin query: {}", rejection);
            CredentialQuery::default()
        }
    };

    if state.guard.authorize(&credentials.password) {
        Ok(())
    } else {
        record_counter(ADMIN_UNAUTHORIZED, 1);
        Err(ApiError::Unauthorized)
    }
}

// ============================================================================
// Public Handlers
// ============================================================================

/// GET / - API documentation page
pub async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

/// GET /api/health - Liveness check
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthReport> {
    Json(state.health.check_health())
}

/// POST /api/contact - Store a contact form submission
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    peer: Option<ConnectInfo<SocketAddr>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SubmitResponse>)> {
    let Json(body) = body.map_err(|rejection| {
        debug!("Unreadable submission body: {}", rejection);
        rejected(SubmissionError::NoData)
    })?;

    let ip_address = peer.map(|ConnectInfo(addr)| addr.ip().to_string());
    let contact = ContactSubmission::from_json(&body)
        .and_then(|submission| submission.into_new_contact(ip_address))
        .map_err(rejected)?;

    let store = state.store.clone();
    let row = contact.clone();
    let id = blocking(move || store.insert(&row))
        .await
        .map_err(|e| ApiError::internal(GENERIC_FAILURE, e, false))?;

    info!(
        id,
        name = %contact.name,
        email = %contact.email,
        subject = %contact.subject,
        ip = contact.ip_address.as_deref().unwrap_or("unknown"),
        "New contact received"
    );
    record_counter(CONTACTS_SUBMITTED, 1);

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            success: true,
            message: "Thank you for your message! I will get back to you soon.".to_string(),
            data: SubmittedContact {
                id,
                name: contact.name,
                email: contact.email,
                subject: contact.subject,
            },
            timestamp: Utc::now(),
        }),
    ))
}

// ============================================================================
// Admin Handlers
// ============================================================================

/// GET /api/contacts?password= - List every contact, newest first
pub async fn list_contacts(
    State(state): State<Arc<AppState>>,
    query: RawQuery,
) -> ApiResult<Json<ContactListResponse>> {
    require_admin(&state, query)?;

    let store = state.store.clone();
    let contacts = blocking(move || store.list_all()).await.map_err(|e| {
        ApiError::internal(
            "Failed to fetch contacts",
            e,
            state.expose_internal_errors,
        )
    })?;

    Ok(Json(ContactListResponse {
        success: true,
        count: contacts.len(),
        contacts,
    }))
}

/// DELETE /api/contacts/:id?password= - Delete one contact
pub async fn delete_contact(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    query: RawQuery,
) -> ApiResult<Json<DeleteResponse>> {
    require_admin(&state, query)?;

    let not_found = || ApiError::NotFound(format!("Contact {} not found", raw_id));
    let id: i64 = raw_id.parse().map_err(|_| not_found())?;

    let store = state.store.clone();
    let deleted = blocking(move || store.delete(id)).await.map_err(|e| {
        ApiError::internal(
            "Failed to delete contact",
            e,
            state.expose_internal_errors,
        )
    })?;

    if !deleted {
        return Err(not_found());
    }

    info!(id, "Contact deleted");
    record_counter(CONTACTS_DELETED, 1);

    Ok(Json(DeleteResponse {
        success: true,
        message: format!("Contact {} deleted successfully", id),
    }))
}

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No endpoint at {}", uri.path()))
}
