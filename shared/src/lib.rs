use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Expense ID in format: "expense::epoch_millis::nonce"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    /// ID of the account this expense belongs to
    pub account_id: String,
    /// Label shown in listings and chart tooltips
    pub name: String,
    /// One-time amount, or the principal of a long-term expense
    pub amount: Decimal,
    pub is_long_term: bool,
    /// Interest rate in percent (long-term only)
    pub interest_rate: Option<Decimal>,
    /// Anchor date (ISO 8601, "YYYY-MM-DD")
    pub start_date: NaiveDate,
    /// Last date covered by a long-term expense
    pub end_date: Option<NaiveDate>,
    /// Per-month installment derived when a long-term expense is recorded
    pub monthly_expense: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    /// Target account; the user's default account is used when omitted
    #[serde(default)]
    pub account_id: Option<String>,
    pub name: String,
    pub amount: Decimal,
    #[serde(default)]
    pub is_long_term: bool,
    #[serde(default)]
    pub interest_rate: Option<Decimal>,
    /// "YYYY-MM-DD"
    pub start_date: String,
    /// "YYYY-MM-DD", required when `is_long_term` is set
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<Expense>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteExpenseResponse {
    pub deleted: bool,
    pub success_message: String,
}

/// Account ID in format: "account::epoch_millis::nonce"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub user_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountListResponse {
    pub accounts: Vec<Account>,
}

/// Data consumed by the monthly bar chart.
///
/// `month[i]` pairs with `expenses[i]`; months ascend and are formatted "YYYY-MM".
/// Months without any expense are absent rather than zero-filled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyChartData {
    pub month: Vec<String>,
    pub expenses: Vec<Decimal>,
}

/// One expense's contribution to a single month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyExpenseDetail {
    pub expense_id: String,
    pub name: String,
    /// Amount contributed to this month
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// Expenses grouped under one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyExpenseGroup {
    /// "YYYY-MM"
    pub month: String,
    /// e.g., "August 2025"
    pub label: String,
    pub total: Decimal,
    pub expenses: Vec<MonthlyExpenseDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyExpensesResponse {
    pub chart: MonthlyChartData,
    pub groups: Vec<MonthlyExpenseGroup>,
    pub grand_total: Decimal,
}

impl Expense {
    /// Generate an expense ID from a timestamp and a uniqueness nonce
    pub fn generate_id(epoch_millis: u64, nonce: &str) -> String {
        format!("expense::{}::{}", epoch_millis, nonce)
    }
}

impl Account {
    /// Generate an account ID from a timestamp and a uniqueness nonce
    pub fn generate_id(epoch_millis: u64, nonce: &str) -> String {
        format!("account::{}::{}", epoch_millis, nonce)
    }

    /// Name given to the account created on a user's first expense
    pub fn default_name(user_id: &str) -> String {
        format!("{}'s Account", user_id)
    }
}
