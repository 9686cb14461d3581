//! Runtime configuration, read from command-line flags with environment
//! variable fallbacks.

use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::installment::{Annuity, InstallmentStrategy, SimpleInterest};

#[derive(Debug, Clone, Parser)]
#[command(name = "expense-tracker", version, about = "Personal expense tracker backend")]
pub struct Config {
    /// SQLite connection URL
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:expenses.db")]
    pub database_url: String,

    /// Address the HTTP server listens on
    #[arg(long, env = "EXPENSE_TRACKER_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Origin allowed to call the API from a browser
    #[arg(long, env = "EXPENSE_TRACKER_CORS_ORIGIN", default_value = "http://localhost:8080")]
    pub cors_origin: String,

    /// How the monthly installment of a long-term expense is derived
    #[arg(
        long,
        env = "EXPENSE_TRACKER_INSTALLMENT_STRATEGY",
        value_enum,
        default_value_t = InstallmentMethod::Simple
    )]
    pub installment_strategy: InstallmentMethod,

    /// Directory of static frontend files served for non-API paths
    #[arg(long, env = "EXPENSE_TRACKER_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InstallmentMethod {
    /// Simple interest on the principal, spread evenly
    Simple,
    /// Amortized loan payment with monthly compounding
    Annuity,
}

impl InstallmentMethod {
    pub fn strategy(self) -> Arc<dyn InstallmentStrategy> {
        match self {
            InstallmentMethod::Simple => Arc::new(SimpleInterest),
            InstallmentMethod::Annuity => Arc::new(Annuity),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:expenses.db".to_string(),
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cors_origin: "http://localhost:8080".to_string(),
            installment_strategy: InstallmentMethod::Simple,
            static_dir: None,
        }
    }
}
