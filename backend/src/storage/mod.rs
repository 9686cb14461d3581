//! # Storage Module
//!
//! Handles all data persistence for the expense tracker.
//!
//! Domain services depend only on the traits in [`traits`]; the SQLite
//! implementation lives in [`connection`] and [`repositories`].
//!
//! ## Current Implementation
//!
//! - **Primary Storage**: SQLite database through SQLx
//! - **Money**: decimals persisted as TEXT so values round-trip exactly
//! - **Dates**: ISO `YYYY-MM-DD` TEXT

pub mod connection;
pub mod repositories;
pub mod traits;

// Re-export the main types that other modules need
pub use connection::DbConnection;
pub use repositories::{AccountRepository, ExpenseRepository};
pub use traits::{AccountStorage, Connection, ExpenseStorage};
