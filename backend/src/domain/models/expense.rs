//! Domain model for a recorded expense.
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: String,
    pub account_id: String,
    pub name: String,
    pub amount: Decimal,
    pub is_long_term: bool,
    pub interest_rate: Option<Decimal>, // percent, long-term only
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>, // long-term only
    pub monthly_expense: Option<Decimal>, // derived installment, long-term only
}

impl ExpenseRecord {
    /// A one-time expense dated `start_date`
    pub fn one_time(
        id: &str,
        account_id: &str,
        name: &str,
        amount: Decimal,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.to_string(),
            account_id: account_id.to_string(),
            name: name.to_string(),
            amount,
            is_long_term: false,
            interest_rate: None,
            start_date,
            end_date: None,
            monthly_expense: None,
        }
    }

    /// The installment actually charged per month, if this record has a usable one
    pub fn positive_installment(&self) -> Option<Decimal> {
        self.monthly_expense.filter(|m| m.is_sign_positive() && !m.is_zero())
    }
}

/// Maximum length of an expense name, in characters
pub const MAX_NAME_LENGTH: usize = 100;

/// Largest accepted amount for a single expense (one trillion)
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExpenseValidationError {
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Name is too long ({0} characters, at most 100 allowed)")]
    NameTooLong(usize),
    #[error("Amount must be positive")]
    NonPositiveAmount,
    #[error("Amount exceeds the maximum of 1000000000000")]
    AmountTooLarge,
    #[error("Interest rate cannot be negative")]
    NegativeInterestRate,
    #[error("Invalid {field} '{value}', expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },
    #[error("Long-term expenses require an end date")]
    MissingEndDate,
    #[error("End date {end_date} is before start date {start_date}")]
    EndBeforeStart { start_date: NaiveDate, end_date: NaiveDate },
    #[error("Could not derive a positive monthly installment for this expense")]
    NonPositiveInstallment,
    #[error("Account {0} does not exist for this user")]
    UnknownAccount(String),
}
