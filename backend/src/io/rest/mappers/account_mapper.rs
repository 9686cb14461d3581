use crate::domain::models::DomainAccount;
use shared::{Account as SharedAccount, AccountListResponse};

/// Mapper from domain accounts to shared Account DTOs.
pub struct AccountMapper;

impl AccountMapper {
    pub fn to_dto(domain: DomainAccount) -> SharedAccount {
        SharedAccount {
            id: domain.id,
            user_id: domain.user_id,
            name: domain.name,
        }
    }

    pub fn to_account_list_dto(accounts: Vec<DomainAccount>) -> AccountListResponse {
        AccountListResponse {
            accounts: accounts.into_iter().map(Self::to_dto).collect(),
        }
    }
}
