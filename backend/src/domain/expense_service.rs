//! Expense service domain logic for the expense tracker.
//!
//! Records expenses (deriving the monthly installment of long-term ones),
//! lists and deletes them, and builds the monthly summary that feeds both the
//! chart and the grouped listing.

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

use crate::domain::{
    account_service::AccountService,
    aggregation::aggregate,
    commands::expenses::{
        CreateExpenseCommand, DeleteExpenseCommand, DeleteExpenseResult, MonthlySummary,
    },
    installment::InstallmentStrategy,
    models::{
        expense::{MAX_AMOUNT, MAX_NAME_LENGTH},
        DomainAccount, ExpenseRecord, ExpenseValidationError,
    },
    series::format_series,
};
use crate::storage::{Connection, ExpenseStorage};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone)]
pub struct ExpenseService<C: Connection> {
    expense_repository: C::ExpenseRepository,
    account_service: AccountService<C>,
    installment_strategy: Arc<dyn InstallmentStrategy>,
}

/// Validated and normalized expense fields, before an account is attached
#[derive(Debug, Clone, PartialEq)]
struct ValidatedExpense {
    name: String,
    amount: Decimal,
    is_long_term: bool,
    interest_rate: Option<Decimal>,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    monthly_expense: Option<Decimal>,
}

impl<C: Connection> ExpenseService<C> {
    pub fn new(
        connection: Arc<C>,
        account_service: AccountService<C>,
        installment_strategy: Arc<dyn InstallmentStrategy>,
    ) -> Self {
        let expense_repository = connection.create_expense_repository();
        Self {
            expense_repository,
            account_service,
            installment_strategy,
        }
    }

    pub async fn create_expense(&self, command: CreateExpenseCommand) -> Result<ExpenseRecord> {
        let validated = self.validate(&command)?;
        let account = self.resolve_account(&command.user_id, command.account_id.as_deref()).await?;

        let now_millis = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64;
        let nonce = uuid::Uuid::new_v4().simple().to_string();

        let expense = ExpenseRecord {
            id: shared::Expense::generate_id(now_millis, &nonce[..8]),
            account_id: account.id,
            name: validated.name,
            amount: validated.amount,
            is_long_term: validated.is_long_term,
            interest_rate: validated.interest_rate,
            start_date: validated.start_date,
            end_date: validated.end_date,
            monthly_expense: validated.monthly_expense,
        };

        self.expense_repository.store_expense(&expense).await?;

        info!(
            "Recorded expense {} '{}' ({}) for user {}",
            expense.id,
            expense.name,
            match expense.monthly_expense {
                Some(monthly) => format!("{} per month", monthly),
                None => expense.amount.to_string(),
            },
            command.user_id
        );
        Ok(expense)
    }

    /// All of a user's expenses across their accounts
    pub async fn list_expenses(&self, user_id: &str) -> Result<Vec<ExpenseRecord>> {
        let expenses = self.expense_repository.list_expenses_for_user(user_id).await?;
        info!("Found {} expenses for user {}", expenses.len(), user_id);
        Ok(expenses)
    }

    pub async fn delete_expense(
        &self,
        command: DeleteExpenseCommand,
    ) -> Result<DeleteExpenseResult> {
        let deleted = self
            .expense_repository
            .delete_expense(&command.user_id, &command.expense_id)
            .await?;

        let success_message = if deleted {
            info!("Deleted expense {} for user {}", command.expense_id, command.user_id);
            "Expense deleted".to_string()
        } else {
            warn!("Expense {} not found for user {}", command.expense_id, command.user_id);
            "Expense not found".to_string()
        };

        Ok(DeleteExpenseResult { deleted, success_message })
    }

    /// Monthly summary across every account the user owns
    pub async fn monthly_summary_for_user(&self, user_id: &str) -> Result<MonthlySummary> {
        let records = self.expense_repository.list_expenses_for_user(user_id).await?;
        Self::summarize(&records)
    }

    /// Monthly summary of a single account
    pub async fn monthly_summary_for_account(&self, account_id: &str) -> Result<MonthlySummary> {
        let account = self.account_service.get_account(account_id).await?;
        let records = self.expense_repository.list_expenses_for_account(&account.id).await?;
        Self::summarize(&records)
    }

    fn summarize(records: &[ExpenseRecord]) -> Result<MonthlySummary> {
        let series = aggregate(records)?;
        let chart = format_series(&series);

        info!(
            "Summarized {} expenses into {} months (total {})",
            records.len(),
            chart.len(),
            series.grand_total()
        );
        Ok(MonthlySummary { series, chart })
    }

    async fn resolve_account(
        &self,
        user_id: &str,
        account_id: Option<&str>,
    ) -> Result<DomainAccount> {
        match account_id {
            Some(account_id) => self
                .account_service
                .get_owned_account(user_id, account_id)
                .await?
                .ok_or_else(|| {
                    ExpenseValidationError::UnknownAccount(account_id.to_string()).into()
                }),
            None => self.account_service.get_or_create_default_account(user_id).await,
        }
    }

    /// Check the command and normalize it: one-time expenses drop the
    /// long-term-only fields, long-term expenses get their derived installment.
    fn validate(
        &self,
        command: &CreateExpenseCommand,
    ) -> Result<ValidatedExpense, ExpenseValidationError> {
        let name = command.name.trim();
        if name.is_empty() {
            return Err(ExpenseValidationError::EmptyName);
        }
        let name_length = name.chars().count();
        if name_length > MAX_NAME_LENGTH {
            return Err(ExpenseValidationError::NameTooLong(name_length));
        }

        if command.amount <= Decimal::ZERO {
            return Err(ExpenseValidationError::NonPositiveAmount);
        }
        if command.amount > MAX_AMOUNT {
            return Err(ExpenseValidationError::AmountTooLarge);
        }

        let start_date = parse_date("start_date", &command.start_date)?;

        if !command.is_long_term {
            return Ok(ValidatedExpense {
                name: name.to_string(),
                amount: command.amount,
                is_long_term: false,
                interest_rate: None,
                start_date,
                end_date: None,
                monthly_expense: None,
            });
        }

        if command.interest_rate.is_some_and(|rate| rate < Decimal::ZERO) {
            return Err(ExpenseValidationError::NegativeInterestRate);
        }

        let end_date = match command.end_date.as_deref() {
            Some(raw) if !raw.trim().is_empty() => parse_date("end_date", raw)?,
            _ => return Err(ExpenseValidationError::MissingEndDate),
        };
        if end_date < start_date {
            return Err(ExpenseValidationError::EndBeforeStart { start_date, end_date });
        }

        let monthly_expense = self
            .installment_strategy
            .monthly_installment(command.amount, command.interest_rate, start_date, end_date)
            .filter(|monthly| *monthly > Decimal::ZERO)
            .ok_or(ExpenseValidationError::NonPositiveInstallment)?;

        Ok(ValidatedExpense {
            name: name.to_string(),
            amount: command.amount,
            is_long_term: true,
            interest_rate: command.interest_rate,
            start_date,
            end_date: Some(end_date),
            monthly_expense: Some(monthly_expense),
        })
    }
}

fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, ExpenseValidationError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        ExpenseValidationError::InvalidDate {
            field,
            value: raw.to_string(),
        }
    })
}
