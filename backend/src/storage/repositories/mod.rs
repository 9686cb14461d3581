// Repository modules
pub mod account_repository;
pub mod expense_repository;

// Re-export repository types
pub use account_repository::AccountRepository;
pub use expense_repository::ExpenseRepository;
