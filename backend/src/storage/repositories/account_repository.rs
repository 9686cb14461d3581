use anyhow::Result;
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row};

use crate::domain::models::DomainAccount;
use crate::storage::connection::DbConnection;
use crate::storage::traits::AccountStorage;

/// Repository for account operations
#[derive(Clone)]
pub struct AccountRepository {
    db: DbConnection,
}

impl AccountRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_account(row: &SqliteRow) -> DomainAccount {
        DomainAccount {
            id: row.get("id"),
            user_id: row.get("user_id"),
            name: row.get("name"),
        }
    }
}

#[async_trait]
impl AccountStorage for AccountRepository {
    async fn store_account(&self, account: &DomainAccount) -> Result<()> {
        sqlx::query("INSERT INTO accounts (id, user_id, name) VALUES (?, ?, ?)")
            .bind(&account.id)
            .bind(&account.user_id)
            .bind(&account.name)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    async fn get_account(&self, account_id: &str) -> Result<Option<DomainAccount>> {
        let row = sqlx::query("SELECT id, user_id, name FROM accounts WHERE id = ?")
            .bind(account_id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.as_ref().map(Self::row_to_account))
    }

    async fn list_accounts(&self, user_id: &str) -> Result<Vec<DomainAccount>> {
        let rows = sqlx::query(
            "SELECT id, user_id, name FROM accounts WHERE user_id = ? ORDER BY ROWID ASC",
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(Self::row_to_account).collect())
    }

    async fn get_first_account(&self, user_id: &str) -> Result<Option<DomainAccount>> {
        let row = sqlx::query(
            "SELECT id, user_id, name FROM accounts WHERE user_id = ? ORDER BY ROWID ASC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(Self::row_to_account))
    }
}
