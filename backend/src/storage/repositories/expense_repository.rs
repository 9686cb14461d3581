use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{sqlite::SqliteRow, Row};
use std::str::FromStr;

use crate::domain::models::ExpenseRecord;
use crate::storage::connection::DbConnection;
use crate::storage::traits::ExpenseStorage;

const DATE_FORMAT: &str = "%Y-%m-%d";

const EXPENSE_COLUMNS: &str = "e.id, e.account_id, e.name, e.amount, e.is_long_term, \
     e.interest_rate, e.start_date, e.end_date, e.monthly_expense";

/// Repository for expense operations
#[derive(Clone)]
pub struct ExpenseRepository {
    db: DbConnection,
}

impl ExpenseRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn parse_decimal(column: &str, raw: &str) -> Result<Decimal> {
        Decimal::from_str(raw)
            .with_context(|| format!("Invalid decimal in column {}: '{}'", column, raw))
    }

    fn parse_date(column: &str, raw: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .with_context(|| format!("Invalid date in column {}: '{}'", column, raw))
    }

    fn row_to_expense(row: &SqliteRow) -> Result<ExpenseRecord> {
        let amount: String = row.get("amount");
        let interest_rate: Option<String> = row.get("interest_rate");
        let start_date: String = row.get("start_date");
        let end_date: Option<String> = row.get("end_date");
        let monthly_expense: Option<String> = row.get("monthly_expense");

        Ok(ExpenseRecord {
            id: row.get("id"),
            account_id: row.get("account_id"),
            name: row.get("name"),
            amount: Self::parse_decimal("amount", &amount)?,
            is_long_term: row.get::<i64, _>("is_long_term") != 0,
            interest_rate: interest_rate
                .map(|raw| Self::parse_decimal("interest_rate", &raw))
                .transpose()?,
            start_date: Self::parse_date("start_date", &start_date)?,
            end_date: end_date.map(|raw| Self::parse_date("end_date", &raw)).transpose()?,
            monthly_expense: monthly_expense
                .map(|raw| Self::parse_decimal("monthly_expense", &raw))
                .transpose()?,
        })
    }
}

#[async_trait]
impl ExpenseStorage for ExpenseRepository {
    async fn store_expense(&self, expense: &ExpenseRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO expenses (
                id, account_id, name, amount, is_long_term,
                interest_rate, start_date, end_date, monthly_expense
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&expense.id)
        .bind(&expense.account_id)
        .bind(&expense.name)
        .bind(expense.amount.to_string())
        .bind(expense.is_long_term as i64)
        .bind(expense.interest_rate.map(|r| r.to_string()))
        .bind(expense.start_date.format(DATE_FORMAT).to_string())
        .bind(expense.end_date.map(|d| d.format(DATE_FORMAT).to_string()))
        .bind(expense.monthly_expense.map(|m| m.to_string()))
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_expense(&self, expense_id: &str) -> Result<Option<ExpenseRecord>> {
        let sql = format!("SELECT {} FROM expenses e WHERE e.id = ?", EXPENSE_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(expense_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(Self::row_to_expense).transpose()
    }

    async fn list_expenses_for_account(&self, account_id: &str) -> Result<Vec<ExpenseRecord>> {
        let sql = format!(
            "SELECT {} FROM expenses e \
             WHERE e.account_id = ? \
             ORDER BY e.start_date ASC, e.ROWID ASC",
            EXPENSE_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(account_id)
            .fetch_all(self.db.pool())
            .await?;

        rows.iter().map(Self::row_to_expense).collect()
    }

    async fn list_expenses_for_user(&self, user_id: &str) -> Result<Vec<ExpenseRecord>> {
        let sql = format!(
            "SELECT {} FROM expenses e \
             JOIN accounts a ON a.id = e.account_id \
             WHERE a.user_id = ? \
             ORDER BY e.start_date ASC, e.ROWID ASC",
            EXPENSE_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(user_id)
            .fetch_all(self.db.pool())
            .await?;

        rows.iter().map(Self::row_to_expense).collect()
    }

    async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM expenses
            WHERE id = ?
              AND account_id IN (SELECT id FROM accounts WHERE user_id = ?)
            "#,
        )
        .bind(expense_id)
        .bind(user_id)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::DomainAccount;
    use crate::storage::repositories::AccountRepository;
    use crate::storage::traits::AccountStorage;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn setup_test() -> (ExpenseRepository, AccountRepository) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let accounts = AccountRepository::new(db.clone());
        for (id, user) in [("acc-alice", "alice"), ("acc-alice-2", "alice"), ("acc-bob", "bob")] {
            accounts
                .store_account(&DomainAccount {
                    id: id.to_string(),
                    user_id: user.to_string(),
                    name: format!("{}'s Account", user),
                })
                .await
                .expect("Failed to store account");
        }
        (ExpenseRepository::new(db), accounts)
    }

    fn one_time(
        id: &str,
        account_id: &str,
        name: &str,
        amount: Decimal,
        day: NaiveDate,
    ) -> ExpenseRecord {
        ExpenseRecord::one_time(id, account_id, name, amount, day)
    }

    fn long_term(id: &str, account_id: &str) -> ExpenseRecord {
        ExpenseRecord {
            id: id.to_string(),
            account_id: account_id.to_string(),
            name: "Laptop financing".to_string(),
            amount: dec!(1999.99),
            is_long_term: true,
            interest_rate: Some(dec!(7.25)),
            start_date: date(2025, 2, 1),
            end_date: Some(date(2026, 1, 31)),
            monthly_expense: Some(dec!(179.77)),
        }
    }

    #[tokio::test]
    async fn test_store_and_get_preserves_all_fields() {
        let (repo, _) = setup_test().await;
        let expense = long_term("exp-1", "acc-alice");

        repo.store_expense(&expense).await.expect("Failed to store expense");
        let loaded = repo.get_expense("exp-1").await.expect("Query failed");

        assert_eq!(loaded, Some(expense));
    }

    #[tokio::test]
    async fn test_get_nonexistent_expense() {
        let (repo, _) = setup_test().await;

        let loaded = repo.get_expense("missing").await.expect("Query failed");
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_list_for_account_orders_by_start_date() {
        let (repo, _) = setup_test().await;
        repo.store_expense(&one_time("e1", "acc-alice", "March", dec!(3), date(2025, 3, 1)))
            .await
            .unwrap();
        repo.store_expense(&one_time("e2", "acc-alice", "January", dec!(1), date(2025, 1, 1)))
            .await
            .unwrap();
        repo.store_expense(&one_time("e3", "acc-alice", "March too", dec!(4), date(2025, 3, 1)))
            .await
            .unwrap();

        let expenses = repo.list_expenses_for_account("acc-alice").await.unwrap();
        let ids: Vec<&str> = expenses.iter().map(|e| e.id.as_str()).collect();

        assert_eq!(ids, vec!["e2", "e1", "e3"]);
    }

    #[tokio::test]
    async fn test_list_for_user_spans_accounts_and_excludes_others() {
        let (repo, _) = setup_test().await;
        repo.store_expense(&one_time("e1", "acc-alice", "A1", dec!(1), date(2025, 1, 1)))
            .await
            .unwrap();
        repo.store_expense(&one_time("e2", "acc-alice-2", "A2", dec!(2), date(2025, 1, 2)))
            .await
            .unwrap();
        repo.store_expense(&one_time("e3", "acc-bob", "B1", dec!(3), date(2025, 1, 3)))
            .await
            .unwrap();

        let alice = repo.list_expenses_for_user("alice").await.unwrap();
        let ids: Vec<&str> = alice.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e2"]);

        let nobody = repo.list_expenses_for_user("carol").await.unwrap();
        assert!(nobody.is_empty());
    }

    #[tokio::test]
    async fn test_delete_only_within_users_accounts() {
        let (repo, _) = setup_test().await;
        repo.store_expense(&long_term("exp-1", "acc-alice")).await.unwrap();

        let deleted_by_other = repo.delete_expense("bob", "exp-1").await.unwrap();
        assert!(!deleted_by_other, "Bob must not delete Alice's expense");

        let deleted = repo.delete_expense("alice", "exp-1").await.unwrap();
        assert!(deleted);

        let deleted_again = repo.delete_expense("alice", "exp-1").await.unwrap();
        assert!(!deleted_again);
        assert!(repo.get_expense("exp-1").await.unwrap().is_none());
    }
}
