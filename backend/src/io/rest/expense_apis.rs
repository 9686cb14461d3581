//! # REST API for Expenses
//!
//! Endpoints for recording, listing and deleting expenses, and for the monthly
//! summary that drives the spending chart and the grouped listing.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get},
    Router,
};
use tracing::{error, info};

use crate::domain::commands::expenses::DeleteExpenseCommand;
use crate::io::rest::{error_response, mappers::ExpenseMapper};
use crate::AppState;
use shared::CreateExpenseRequest;

/// Create the expense API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/:user_id/expenses", get(list_expenses).post(create_expense))
        .route("/users/:user_id/expenses/monthly", get(get_user_monthly_expenses))
        .route("/users/:user_id/expenses/:expense_id", delete(delete_expense))
        .route("/accounts/:account_id/expenses/monthly", get(get_account_monthly_expenses))
}

/// Record a new expense for a user
pub async fn create_expense(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<CreateExpenseRequest>,
) -> impl IntoResponse {
    info!("POST /api/users/{}/expenses - request: {:?}", user_id, request);

    let command = ExpenseMapper::to_create_command(user_id, request);
    match state.expense_service.create_expense(command).await {
        Ok(expense) => (StatusCode::CREATED, Json(ExpenseMapper::to_dto(expense))).into_response(),
        Err(e) => {
            error!("Failed to create expense: {:#}", e);
            error_response(&e)
        }
    }
}

/// List every expense the user has recorded
pub async fn list_expenses(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/users/{}/expenses", user_id);

    match state.expense_service.list_expenses(&user_id).await {
        Ok(expenses) => {
            (StatusCode::OK, Json(ExpenseMapper::to_expense_list_dto(expenses))).into_response()
        }
        Err(e) => {
            error!("Failed to list expenses: {:#}", e);
            error_response(&e)
        }
    }
}

/// Delete one of the user's expenses
pub async fn delete_expense(
    State(state): State<AppState>,
    Path((user_id, expense_id)): Path<(String, String)>,
) -> impl IntoResponse {
    info!("DELETE /api/users/{}/expenses/{}", user_id, expense_id);

    let command = DeleteExpenseCommand { user_id, expense_id };
    match state.expense_service.delete_expense(command).await {
        Ok(result) => {
            let status = if result.deleted {
                StatusCode::OK
            } else {
                StatusCode::NOT_FOUND
            };
            (status, Json(ExpenseMapper::to_delete_dto(result))).into_response()
        }
        Err(e) => {
            error!("Failed to delete expense: {:#}", e);
            error_response(&e)
        }
    }
}

/// Monthly totals and grouped details across all of the user's accounts
pub async fn get_user_monthly_expenses(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/users/{}/expenses/monthly", user_id);

    match state.expense_service.monthly_summary_for_user(&user_id).await {
        Ok(summary) => {
            (StatusCode::OK, Json(ExpenseMapper::to_monthly_dto(summary))).into_response()
        }
        Err(e) => {
            error!("Failed to summarize expenses for user {}: {:#}", user_id, e);
            error_response(&e)
        }
    }
}

/// Monthly totals and grouped details for a single account
pub async fn get_account_monthly_expenses(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/accounts/{}/expenses/monthly", account_id);

    match state.expense_service.monthly_summary_for_account(&account_id).await {
        Ok(summary) => {
            (StatusCode::OK, Json(ExpenseMapper::to_monthly_dto(summary))).into_response()
        }
        Err(e) => {
            error!("Failed to summarize expenses for account {}: {:#}", account_id, e);
            error_response(&e)
        }
    }
}
