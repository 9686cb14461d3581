//! Account management for expense owners.
//!
//! A user owns one or more accounts. The first expense a user records without
//! naming an account lands in a default account created on demand.

use anyhow::Result;
use shared::Account as SharedAccount;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

use crate::domain::commands::accounts::CreateAccountCommand;
use crate::domain::models::{AccountError, DomainAccount};
use crate::storage::{AccountStorage, Connection};

const MAX_ACCOUNT_NAME_LENGTH: usize = 100;

#[derive(Clone)]
pub struct AccountService<C: Connection> {
    account_repository: C::AccountRepository,
}

impl<C: Connection> AccountService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let account_repository = connection.create_account_repository();
        Self { account_repository }
    }

    /// Fetch the user's default (earliest) account, creating it if the user has none
    pub async fn get_or_create_default_account(&self, user_id: &str) -> Result<DomainAccount> {
        if let Some(account) = self.account_repository.get_first_account(user_id).await? {
            return Ok(account);
        }

        info!("No account found for user {}, creating default account", user_id);
        self.insert_account(user_id, SharedAccount::default_name(user_id)).await
    }

    pub async fn create_account(&self, command: CreateAccountCommand) -> Result<DomainAccount> {
        let name = command.name.trim();
        if name.is_empty() {
            return Err(AccountError::EmptyName.into());
        }
        if name.chars().count() > MAX_ACCOUNT_NAME_LENGTH {
            return Err(AccountError::NameTooLong.into());
        }

        self.insert_account(&command.user_id, name.to_string()).await
    }

    pub async fn list_accounts(&self, user_id: &str) -> Result<Vec<DomainAccount>> {
        self.account_repository.list_accounts(user_id).await
    }

    /// Fetch an account, failing with [`AccountError::NotFound`] if it does not exist
    pub async fn get_account(&self, account_id: &str) -> Result<DomainAccount> {
        self.account_repository
            .get_account(account_id)
            .await?
            .ok_or_else(|| AccountError::NotFound(account_id.to_string()).into())
    }

    /// Fetch an account only if it belongs to the given user
    pub async fn get_owned_account(
        &self,
        user_id: &str,
        account_id: &str,
    ) -> Result<Option<DomainAccount>> {
        let account = self.account_repository.get_account(account_id).await?;
        Ok(account.filter(|a| a.user_id == user_id))
    }

    async fn insert_account(&self, user_id: &str, name: String) -> Result<DomainAccount> {
        let now_millis = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64;
        let nonce = uuid::Uuid::new_v4().simple().to_string();

        let account = DomainAccount {
            id: SharedAccount::generate_id(now_millis, &nonce[..8]),
            user_id: user_id.to_string(),
            name,
        };
        self.account_repository.store_account(&account).await?;

        info!("Created account {} ('{}') for user {}", account.id, account.name, user_id);
        Ok(account)
    }
}
