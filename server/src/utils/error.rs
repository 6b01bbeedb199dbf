use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::utils::response::error as error_response;
use crate::validation::Rejection;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Rejected: {0}")]
    Rejected(#[from] Rejection),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal server error")]
    InternalServerError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Rejected(Rejection::EventNotFound) => StatusCode::NOT_FOUND,
            AppError::Rejected(_) => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Rejected(rejection) => rejection.code(),
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::Rejected(rejection) => {
                warn!(code = rejection.code(), reason = %rejection, "Request rejected");
            }
            AppError::BadRequest(msg) => {
                warn!(message = %msg, "Malformed request");
            }
            AppError::NotFound(msg) => {
                warn!(message = %msg, "Resource not found");
            }
            AppError::InternalServerError(msg) => {
                error!(error = ?self, message = %msg, "Application error");
            }
            AppError::DatabaseError(e) => {
                error!(error = ?e, "Database error");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        // Log internal details
        self.log();

        // Only expose high-level message to the client
        let public_message = match &self {
            AppError::Rejected(rejection) => rejection.to_string(),
            AppError::BadRequest(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::InternalServerError(_) => "An internal error occurred".to_string(),
            AppError::DatabaseError(_) => "A database error occurred".to_string(),
        };

        let details = match &self {
            AppError::Rejected(Rejection::MissingRequiredField(field)) => {
                Some(json!({ "field": field }))
            }
            AppError::Rejected(Rejection::FieldTooLong { field, max }) => {
                Some(json!({ "field": field, "max": max }))
            }
            _ => None,
        };

        error_response(code, public_message, details, status)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
