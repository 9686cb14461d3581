pub mod account;
pub mod expense;
pub mod month_key;

pub use account::{AccountError, DomainAccount};
pub use expense::{ExpenseRecord, ExpenseValidationError};
pub use month_key::MonthKey;
