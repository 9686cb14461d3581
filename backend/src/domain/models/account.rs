//! Domain model for an expense account owned by a user.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainAccount {
    pub id: String,
    pub user_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AccountError {
    #[error("Account {0} not found")]
    NotFound(String),
    #[error("Account name cannot be empty")]
    EmptyName,
    #[error("Account name is too long")]
    NameTooLong,
}
