//! # REST API for Accounts
//!
//! Endpoints for listing and creating a user's expense accounts.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::{error, info};

use crate::domain::commands::accounts::CreateAccountCommand;
use crate::io::rest::{error_response, mappers::AccountMapper};
use crate::AppState;
use shared::CreateAccountRequest;

/// Create the account API router
pub fn router() -> Router<AppState> {
    Router::new().route("/users/:user_id/accounts", get(list_accounts).post(create_account))
}

/// List a user's accounts, oldest first
pub async fn list_accounts(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/users/{}/accounts", user_id);

    match state.account_service.list_accounts(&user_id).await {
        Ok(accounts) => {
            (StatusCode::OK, Json(AccountMapper::to_account_list_dto(accounts))).into_response()
        }
        Err(e) => {
            error!("Failed to list accounts: {:#}", e);
            error_response(&e)
        }
    }
}

/// Create a named account for a user
pub async fn create_account(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<CreateAccountRequest>,
) -> impl IntoResponse {
    info!("POST /api/users/{}/accounts - request: {:?}", user_id, request);

    let command = CreateAccountCommand {
        user_id,
        name: request.name,
    };
    match state.account_service.create_account(command).await {
        Ok(account) => (StatusCode::CREATED, Json(AccountMapper::to_dto(account))).into_response(),
        Err(e) => {
            error!("Failed to create account: {:#}", e);
            error_response(&e)
        }
    }
}
