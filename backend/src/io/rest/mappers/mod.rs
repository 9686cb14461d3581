pub mod account_mapper;
pub mod expense_mapper;

pub use account_mapper::AccountMapper;
pub use expense_mapper::ExpenseMapper;
