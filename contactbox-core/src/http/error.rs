//! API error taxonomy and its translation into HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::fmt::Display;
use thiserror::Error;
use tracing::{error, warn};

use super::types::ErrorResponse;
use crate::contact::SubmissionError;

/// Message shown to submitters when something breaks on our side
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again later.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    BadRequest(#[from] SubmissionError),

    #[error("Invalid password")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("{action}: {detail}")]
    Internal {
        /// What the caller was trying to do, shown as the response message
        action: &'static str,
        /// Raw error text; always logged, returned only when `expose` is set
        detail: String,
        expose: bool,
    },
}

impl ApiError {
    /// Wrap an unexpected failure
    pub fn internal(action: &'static str, err: impl Display, expose: bool) -> Self {
        ApiError::Internal {
            action,
            detail: err.to_string(),
            expose,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            ApiError::BadRequest(err) => ErrorResponse {
                error: err.to_string(),
                message: err.message(),
                missing: match err {
                    SubmissionError::MissingFields(fields) => {
                        Some(fields.iter().map(|f| f.to_string()).collect())
                    }
                    _ => None,
                },
            },
            ApiError::Unauthorized => {
                warn!("Rejected admin request with invalid password");
                ErrorResponse {
                    error: "Unauthorized".to_string(),
                    message: "Invalid password".to_string(),
                    missing: None,
                }
            }
            ApiError::NotFound(message) => ErrorResponse {
                error: "Not found".to_string(),
                message,
                missing: None,
            },
            ApiError::Internal {
                action,
                detail,
                expose,
            } => {
                error!(detail = %detail, "{}", action);
                if expose {
                    ErrorResponse {
                        error: detail,
                        message: action.to_string(),
                        missing: None,
                    }
                } else {
                    ErrorResponse {
                        error: "Internal server error".to_string(),
                        message: action.to_string(),
                        missing: None,
                    }
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
