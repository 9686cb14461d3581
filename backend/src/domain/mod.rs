//! # Domain Module
//!
//! Business logic of the expense tracker.
//!
//! ## Key Responsibilities
//!
//! - **Amortization**: spreading long-term expenses over the months they cover
//! - **Aggregation**: folding every expense into per-month totals and details
//! - **Installments**: deriving the monthly payment of a long-term expense
//! - **Services**: recording, listing and deleting expenses and accounts
//!
//! The aggregation core ([`amortization`], [`aggregation`], [`series`]) is
//! pure and synchronous. Services wrap it with storage access and are generic
//! over the storage [`Connection`](crate::storage::Connection).

pub mod account_service;
pub mod aggregation;
pub mod amortization;
pub mod commands;
pub mod expense_service;
pub mod installment;
pub mod models;
pub mod series;

pub use account_service::AccountService;
pub use aggregation::{aggregate, AggregatedSeries, MonthBucket, MonthlyContribution};
pub use amortization::{expand, ExpandError, Expansion};
pub use expense_service::ExpenseService;
pub use installment::{Annuity, InstallmentStrategy, SimpleInterest};
pub use series::{format_series, ChartSeries};
