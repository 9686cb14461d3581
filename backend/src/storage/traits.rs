//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{DomainAccount, ExpenseRecord};

/// Trait defining the interface for expense storage operations
#[async_trait]
pub trait ExpenseStorage: Send + Sync {
    /// Store a new expense
    async fn store_expense(&self, expense: &ExpenseRecord) -> Result<()>;

    /// Retrieve a specific expense by ID
    async fn get_expense(&self, expense_id: &str) -> Result<Option<ExpenseRecord>>;

    /// List the expenses of one account, ordered by start date then insertion order
    async fn list_expenses_for_account(&self, account_id: &str) -> Result<Vec<ExpenseRecord>>;

    /// List the expenses of every account owned by a user,
    /// ordered by start date then insertion order
    async fn list_expenses_for_user(&self, user_id: &str) -> Result<Vec<ExpenseRecord>>;

    /// Delete an expense if it belongs to one of the user's accounts
    /// Returns true if the expense was found and deleted, false otherwise
    async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<bool>;
}

/// Trait defining the interface for account storage operations
#[async_trait]
pub trait AccountStorage: Send + Sync {
    /// Store a new account
    async fn store_account(&self, account: &DomainAccount) -> Result<()>;

    /// Retrieve a specific account by ID
    async fn get_account(&self, account_id: &str) -> Result<Option<DomainAccount>>;

    /// List a user's accounts in creation order
    async fn list_accounts(&self, user_id: &str) -> Result<Vec<DomainAccount>>;

    /// The user's earliest account, if any
    async fn get_first_account(&self, user_id: &str) -> Result<Option<DomainAccount>>;
}

/// Trait defining the interface for storage connections
///
/// Provides factory methods for creating repositories so the domain layer
/// can work with any storage backend without knowing the implementation details.
pub trait Connection: Send + Sync + Clone + 'static {
    type ExpenseRepository: ExpenseStorage + Clone;
    type AccountRepository: AccountStorage + Clone;

    fn create_expense_repository(&self) -> Self::ExpenseRepository;

    fn create_account_repository(&self) -> Self::AccountRepository;
}
