//! # REST API Interface Layer
//!
//! HTTP endpoints for the expense tracker.
//!
//! ## Key Responsibilities
//!
//! - **API Endpoints**: accounts, expenses and monthly summaries
//! - **Error Handling**: converting domain errors to HTTP responses
//! - **Logging**: one log line per request, plus the error on failure
//!
//! Handlers are thin: they map DTOs to commands, call a service, and map the
//! result back through [`mappers`].

pub mod account_apis;
pub mod expense_apis;
pub mod mappers;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::domain::models::{AccountError, ExpenseValidationError};
use crate::domain::ExpandError;

/// Translate a service error into a status code and JSON error body
pub fn error_response(err: &anyhow::Error) -> Response {
    let (status, code) = if err.downcast_ref::<ExpenseValidationError>().is_some() {
        (StatusCode::BAD_REQUEST, "INVALID_EXPENSE")
    } else if let Some(account_error) = err.downcast_ref::<AccountError>() {
        match account_error {
            AccountError::NotFound(_) => (StatusCode::NOT_FOUND, "ACCOUNT_NOT_FOUND"),
            _ => (StatusCode::BAD_REQUEST, "INVALID_ACCOUNT"),
        }
    } else if let Some(expand_error) = err.downcast_ref::<ExpandError>() {
        match expand_error {
            ExpandError::InvalidRange { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_DATE_RANGE")
            }
            ExpandError::Overflow { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "TOTAL_OVERFLOW"),
        }
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
    };

    // Storage failures carry driver details that stay in the logs
    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        "Internal server error".to_string()
    } else {
        err.to_string()
    };

    (status, Json(json!({ "error": message, "code": code }))).into_response()
}
